//! HTTP-level integration tests, run against the in-memory record store.

mod helpers;

mod container_test;
mod error_test;
mod folder_test;
mod health_test;
mod idea_test;
mod search_test;
