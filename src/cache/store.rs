// Cache store for search API responses.
// Keys raw JSON responses by request parameters and persists them as one JSON object.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::twitter::{SearchFetcher, search_params};

use super::paths::temp_path_for;

/// Request key → raw response, ordered by key so saves are stable.
pub type Entries = BTreeMap<String, Value>;

/// Whether a lookup was served from the store or required a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Message shown to the user for this lookup.
    pub fn message(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "fetching cached data",
            CacheStatus::Miss => "making new request",
        }
    }
}

/// Build the cache key for a request.
///
/// Each parameter becomes `name_value`; the fragments are sorted and joined
/// with `_` after the base URL, so parameter order never changes the key.
pub fn build_key<K, V>(baseurl: &str, params: impl IntoIterator<Item = (K, V)>) -> String
where
    K: Display,
    V: Display,
{
    let mut fragments: Vec<String> = params
        .into_iter()
        .map(|(name, value)| format!("{}_{}", name, value))
        .collect();
    fragments.sort();
    format!("{}_{}", baseurl, fragments.join("_"))
}

/// In-memory response cache backed by a single JSON file.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
    entries: Entries,
}

impl CacheStore {
    /// Create an empty store that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Entries::new(),
        }
    }

    /// Load the store from `path`.
    ///
    /// A missing or unreadable file yields an empty store; the failure is
    /// logged and never returned.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(Some(entries)) => {
                debug!("Loaded {} cached responses from {}", entries.len(), path.display());
                entries
            }
            Ok(None) => {
                debug!("No cache file at {}, starting empty", path.display());
                Entries::new()
            }
            Err(e) => {
                warn!("Ignoring unreadable cache file {}: {}", path.display(), e);
                Entries::new()
            }
        };
        Self { path, entries }
    }

    /// Write every entry to disk, replacing the previous file.
    pub fn save(&self) -> Result<()> {
        write_entries(&self.path, &self.entries)
    }

    /// Look up the response for `hashtag`, requesting it through `fetcher` on a miss.
    ///
    /// A miss is persisted right away. A failed save is logged and the
    /// in-memory entry stays usable; a failed fetch leaves the store untouched.
    pub async fn fetch_with_cache<F: SearchFetcher>(
        &mut self,
        fetcher: &mut F,
        baseurl: &str,
        hashtag: &str,
        count: u32,
    ) -> Result<(&Value, CacheStatus)> {
        let params = search_params(hashtag, count);
        let key = build_key(baseurl, params.iter().map(|(name, value)| (name, value)));

        let status = if self.entries.contains_key(&key) {
            info!("fetching cached data for {}", key);
            CacheStatus::Hit
        } else {
            info!("making new request for {}", key);
            let response = fetcher.fetch(baseurl, &params).await?;
            self.entries.insert(key.clone(), response);
            if let Err(e) = self.save() {
                warn!("Failed to persist cache to {}: {}", self.path.display(), e);
            }
            CacheStatus::Miss
        };

        Ok((&self.entries[&key], status))
    }

    /// Get a cached response by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// All cached entries.
    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read the cache file, returning None if it does not exist.
fn read_entries(path: &Path) -> Result<Option<Entries>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let entries: Entries = serde_json::from_str(&contents)?;
    Ok(Some(entries))
}

/// Write the cache file.
fn write_entries(path: &Path, entries: &Entries) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(entries)?;

    // Write atomically via temp file
    let temp_path = temp_path_for(path);
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}
