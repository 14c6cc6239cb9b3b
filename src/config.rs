// Runtime configuration.
// Loads API credentials from the environment and parses command-line options.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::error::{CotagError, Result};
use crate::twitter::DEFAULT_COUNT;

pub const API_KEY_VAR: &str = "TWITTER_API_KEY";
pub const API_SECRET_VAR: &str = "TWITTER_API_SECRET";
pub const ACCESS_TOKEN_VAR: &str = "TWITTER_ACCESS_TOKEN";
pub const ACCESS_TOKEN_SECRET_VAR: &str = "TWITTER_ACCESS_TOKEN_SECRET";

/// When set to a non-empty value, `.env` files are not loaded.
pub const NO_DOTENV_VAR: &str = "COTAG_NO_DOTENV";

/// Load a `.env` file from the working directory or its parents, unless
/// `COTAG_NO_DOTENV` is set.
pub fn load_dotenv() {
    if std::env::var_os(NO_DOTENV_VAR).is_some_and(|v| !v.is_empty()) {
        return;
    }
    dotenvy::dotenv().ok();
}

/// Find the hashtags that most often appear alongside a searched hashtag
#[derive(Parser, Debug)]
#[command(name = "cotag")]
#[command(version)]
pub struct Cli {
    /// Number of tweets to request per search
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    pub count: u32,

    /// Response cache file (defaults to the user cache directory)
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// Check the credentials against the API and exit
    #[arg(long)]
    pub check_auth: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// OAuth 1.0a user-context credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`, failing if any value is missing or blank.
    ///
    /// Every missing variable is reported, not just the first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let credentials = Self {
            api_key: read(API_KEY_VAR),
            api_secret: read(API_SECRET_VAR),
            access_token: read(ACCESS_TOKEN_VAR),
            access_token_secret: read(ACCESS_TOKEN_SECRET_VAR),
        };

        if missing.is_empty() {
            Ok(credentials)
        } else {
            Err(CotagError::MissingCredentials(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_credentials_all_present() {
        let env = env_from(&[
            (API_KEY_VAR, "key"),
            (API_SECRET_VAR, "secret"),
            (ACCESS_TOKEN_VAR, "token"),
            (ACCESS_TOKEN_SECRET_VAR, "token-secret"),
        ]);

        let credentials = Credentials::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(credentials.api_key, "key");
        assert_eq!(credentials.access_token_secret, "token-secret");
    }

    #[test]
    fn test_credentials_reports_every_missing_value() {
        let env = env_from(&[(API_KEY_VAR, "key"), (ACCESS_TOKEN_VAR, "  ")]);

        let err = Credentials::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        match &err {
            CotagError::MissingCredentials(missing) => assert_eq!(
                missing,
                &vec![API_SECRET_VAR, ACCESS_TOKEN_VAR, ACCESS_TOKEN_SECRET_VAR]
            ),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains(API_SECRET_VAR));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["cotag"]);
        assert_eq!(cli.count, DEFAULT_COUNT);
        assert!(cli.cache_file.is_none());
        assert!(!cli.check_auth);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::parse_from(["cotag", "--count", "25", "--cache-file", "c.json", "-vv"]);
        assert_eq!(cli.count, 25);
        assert_eq!(cli.cache_file, Some(PathBuf::from("c.json")));
        assert_eq!(cli.log_level(), "debug");
    }
}
