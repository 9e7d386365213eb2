//! Data models
//!
//! Rust structs representing database entities.

mod cache_entry;

pub use cache_entry::CacheEntry;
