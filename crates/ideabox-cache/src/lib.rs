//! # ideabox-cache
//!
//! Cache provider for Idea Box. Link previews are cached in-process with
//! [moka](https://crates.io/crates/moka), bounded by entry count and age.

pub mod keys;
pub mod memory;
pub mod provider;

pub use memory::MemoryCacheProvider;
pub use provider::CacheManager;
