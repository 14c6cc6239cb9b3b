// OAuth 1.0a request signing.
// Builds the HMAC-SHA1 `Authorization` header the Twitter v1.1 API expects.

use std::sync::atomic::{AtomicU64, Ordering};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::{Digest, Sha1};

use crate::config::Credentials;
use crate::error::{CotagError, Result};

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

static NONCE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Percent-encode a value per RFC 3986 (everything but `A-Za-z0-9-._~`).
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Current OAuth timestamp, in seconds since the epoch.
pub fn timestamp() -> i64 {
    Utc::now().timestamp()
}

/// A fresh nonce: hex SHA-1 of the current time and a process-wide counter.
pub fn generate_nonce() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let counter = NONCE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let digest = Sha1::digest(format!("{}:{}:{}", nanos, std::process::id(), counter));
    hex::encode(digest)
}

/// The `oauth_*` protocol parameters, before signing.
fn protocol_params(
    credentials: &Credentials,
    nonce: &str,
    timestamp: i64,
) -> Vec<(&'static str, String)> {
    vec![
        ("oauth_consumer_key", credentials.api_key.clone()),
        ("oauth_nonce", nonce.to_string()),
        ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
        ("oauth_timestamp", timestamp.to_string()),
        ("oauth_token", credentials.access_token.clone()),
        ("oauth_version", OAUTH_VERSION.to_string()),
    ]
}

/// Build the signature base string from the method, base URL, and all parameters.
pub fn signature_base_string(method: &str, url: &str, params: &[(&str, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(name, value)| (percent_encode(name), percent_encode(value)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&parameter_string)
    )
}

/// Sign a base string with the consumer and token secrets.
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> Result<String> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| CotagError::Signing(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Build the `Authorization` header value for a request.
///
/// `url` must not carry a query string; query parameters go in `query`.
pub fn authorization_header(
    credentials: &Credentials,
    method: &str,
    url: &str,
    query: &[(&str, String)],
    nonce: &str,
    timestamp: i64,
) -> Result<String> {
    let mut oauth_params = protocol_params(credentials, nonce, timestamp);

    let mut all_params: Vec<(&str, String)> = query.to_vec();
    all_params.extend(oauth_params.iter().cloned());

    let base_string = signature_base_string(method, url, &all_params);
    let signature = sign(
        &base_string,
        &credentials.api_secret,
        &credentials.access_token_secret,
    )?;
    oauth_params.push(("oauth_signature", signature));
    oauth_params.sort();

    let fields = oauth_params
        .iter()
        .map(|(name, value)| format!("{}=\"{}\"", percent_encode(name), percent_encode(value)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", fields))
}
