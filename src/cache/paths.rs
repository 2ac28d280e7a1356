// Cache path utilities.
// Locates the on-disk result cache file.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Name of the result cache file.
pub const CACHE_FILE_NAME: &str = "fileCache";

/// Default cache location, relative to the process working directory.
pub fn default_cache_path() -> PathBuf {
    PathBuf::from(CACHE_FILE_NAME)
}

/// Get the per-user cache directory (~/.cache/mats on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mats").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Cache location inside the per-user cache directory.
pub fn user_cache_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(CACHE_FILE_NAME))
}
