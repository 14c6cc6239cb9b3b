// Twitter API module.
// Provides the signed search client and the fetch seam the cache calls through.

pub mod client;
pub mod oauth;
pub mod types;

use serde_json::Value;

use crate::error::Result;

pub use client::TwitterClient;
pub use types::{Account, SearchResponse};

/// Standard search endpoint.
pub const SEARCH_URL: &str = "https://api.twitter.com/1.1/search/tweets.json";

/// Number of tweets requested per search by default.
pub const DEFAULT_COUNT: u32 = 100;

/// Something that can run a search request and return the raw JSON body.
#[allow(async_fn_in_trait)]
pub trait SearchFetcher {
    async fn fetch(&mut self, baseurl: &str, params: &[(&str, String)]) -> Result<Value>;
}

/// Query parameters for a hashtag search.
pub fn search_params(hashtag: &str, count: u32) -> [(&'static str, String); 2] {
    [("q", hashtag.to_string()), ("count", count.to_string())]
}
