// Twitter API HTTP client.
// Signs each request with OAuth 1.0a and converts error responses.

use reqwest::{
    Client, Response, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;
use tracing::debug;

use crate::config::Credentials;
use crate::error::{CotagError, Result};

use super::SearchFetcher;
use super::oauth;
use super::types::Account;

/// Endpoint used to check that the credentials are accepted.
pub const VERIFY_CREDENTIALS_URL: &str =
    "https://api.twitter.com/1.1/account/verify_credentials.json";

/// Twitter v1.1 client authenticated with user-context OAuth 1.0a credentials.
pub struct TwitterClient {
    client: Client,
    credentials: Credentials,
}

impl TwitterClient {
    /// Create a new client that signs requests with `credentials`.
    pub fn new(credentials: Credentials) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("cotag"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(CotagError::Request)?;

        Ok(Self {
            client,
            credentials,
        })
    }

    /// Make a signed GET request with query parameters.
    pub async fn get_with_params(&self, url: &str, params: &[(&str, String)]) -> Result<Response> {
        let authorization = oauth::authorization_header(
            &self.credentials,
            "GET",
            url,
            params,
            &oauth::generate_nonce(),
            oauth::timestamp(),
        )?;
        let authorization =
            HeaderValue::from_str(&authorization).map_err(|e| CotagError::Signing(e.to_string()))?;

        debug!("GET {} {:?}", url, params);
        let response = self
            .client
            .get(url)
            .query(params)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(CotagError::Request)?;

        self.check_response(response).await
    }

    /// Run a search and return the raw JSON body.
    pub async fn search(&self, baseurl: &str, params: &[(&str, String)]) -> Result<Value> {
        let response = self.get_with_params(baseurl, params).await?;
        let body: Value = response.json().await?;
        Ok(body)
    }

    /// Fetch the account the credentials belong to.
    pub async fn verify_credentials(&self) -> Result<Account> {
        let response = self.get_with_params(VERIFY_CREDENTIALS_URL, &[]).await?;
        let account: Account = response.json().await?;
        Ok(account)
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(CotagError::Unauthorized),
            status => Err(CotagError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

impl SearchFetcher for TwitterClient {
    async fn fetch(&mut self, baseurl: &str, params: &[(&str, String)]) -> Result<Value> {
        self.search(baseurl, params).await
    }
}
