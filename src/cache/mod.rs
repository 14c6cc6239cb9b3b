// Cache module for the on-disk response cache.
// Stores raw search API responses so repeated queries skip the network.

pub mod paths;
pub mod store;

pub use paths::{CACHE_FILENAME, default_cache_path};
pub use store::{CacheStatus, CacheStore, Entries, build_key};
