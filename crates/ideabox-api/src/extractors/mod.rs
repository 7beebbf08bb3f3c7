//! Custom request extractors.

pub mod multipart;

pub use multipart::FormData;
