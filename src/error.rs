// Error types for cotag.
// Covers configuration, upstream API, cache persistence, and ranking errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CotagError {
    #[error("Search API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Authentication failed: check the Twitter API credentials")]
    Unauthorized,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    MalformedResponse(String),

    #[error("Missing credentials, set {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Could not sign request: {0}")]
    Signing(String),

    #[error("Not enough data: only {found} co-occurring hashtag(s) found")]
    InsufficientData { found: usize },

    #[error("Please include # to search hashtag (got {0:?})")]
    InvalidHashtag(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CotagError>;
