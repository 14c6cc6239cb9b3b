// Cache path utilities.
// Resolves where the response cache file lives on disk.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// File name of the persisted response cache.
pub const CACHE_FILENAME: &str = "twitter_cache.json";

/// Get the base cache directory (~/.cache/cotag on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cotag").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Default path of the response cache file.
///
/// Falls back to the working directory when no home directory can be found.
pub fn default_cache_path() -> PathBuf {
    cache_dir()
        .map(|dir| dir.join(CACHE_FILENAME))
        .unwrap_or_else(|| PathBuf::from(CACHE_FILENAME))
}

/// Path of the temp file a save goes through before it is renamed into place.
///
/// `.tmp` is appended to the whole file name, so it never equals `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}
