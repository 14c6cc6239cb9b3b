// Twitter API response types.
// Only the fields the ranker and credential check read are modelled.

use serde::Deserialize;

/// Body of a `search/tweets.json` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub statuses: Vec<Status>,
}

/// A single tweet in a search result.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub entities: Entities,
}

/// Entities extracted from a tweet's text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<HashtagEntity>,
}

/// A hashtag attached to a tweet, without its leading `#`.
#[derive(Debug, Clone, Deserialize)]
pub struct HashtagEntity {
    pub text: String,
}

/// The authenticated account, from `account/verify_credentials.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub screen_name: String,
}

impl SearchResponse {
    /// Hashtag texts of every tweet, in response order.
    pub fn hashtags(&self) -> impl Iterator<Item = &str> {
        self.statuses
            .iter()
            .flat_map(|status| status.entities.hashtags.iter())
            .map(|hashtag| hashtag.text.as_str())
    }
}
