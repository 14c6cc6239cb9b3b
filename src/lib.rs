// cotag library.
// Exposes the cache, ranker, API client, and query loop for the binary and integration tests.

pub mod cache;
pub mod config;
pub mod error;
pub mod ranker;
pub mod repl;
pub mod twitter;
