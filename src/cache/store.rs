// File-backed key/value store.
// Holds every entry of one cache file in memory and writes the whole file on change.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{MatsError, Result};

/// Life of every cached entry: 8 hours.
pub const DEFAULT_LIFE: Duration = Duration::from_secs(8 * 3600);

/// Wrapper for cached data with expiry metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
    /// When the data stops being served.
    pub expires_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    /// Create a new entry expiring `life` from now.
    pub fn new(data: T, life: TimeDelta) -> Self {
        let cached_at = Utc::now();
        let expires_at = cached_at
            .checked_add_signed(life)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            data,
            cached_at,
            expires_at,
        }
    }

    /// Check if this entry has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Check if this entry is still valid (not expired).
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }
}

/// A single named cache file with a uniform entry life.
///
/// There is no locking: two processes writing the same file will race and the
/// last writer wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    life: TimeDelta,
    entries: BTreeMap<String, CachedData<Value>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries.
    /// A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>, life: Duration) -> Result<Self> {
        let path = path.into();
        let life = TimeDelta::from_std(life).map_err(|e| MatsError::Other(e.to_string()))?;
        let entries = read_entries(&path)?;

        info!(path = %path.display(), entries = entries.len(), "opened file cache");

        Ok(Self {
            path,
            life,
            entries,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a live entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_valid())
            .map(|entry| &entry.data)
    }

    /// Insert or overwrite an entry, restarting its life.
    pub fn set(&mut self, key: &str, data: Value) -> Result<()> {
        self.entries.retain(|_, entry| entry.is_valid());
        self.entries
            .insert(key.to_string(), CachedData::new(data, self.life));
        self.flush()
    }

    /// Expire a single entry immediately.
    pub fn expire(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_none() {
            debug!(key, "expire requested for absent key");
            return Ok(());
        }
        self.flush()
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.flush()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.values().filter(|entry| entry.is_valid()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn flush(&self) -> Result<()> {
        write_entries(&self.path, &self.entries)
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, CachedData<Value>>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let contents = fs::read_to_string(path)?;
    let entries = serde_json::from_str(&contents)?;
    Ok(entries)
}

fn write_entries(path: &Path, entries: &BTreeMap<String, CachedData<Value>>) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string(entries)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> FileStore {
        FileStore::open(dir.path().join("fileCache"), DEFAULT_LIFE).unwrap()
    }

    #[test]
    fn test_entry_expiry() {
        let mut entry = CachedData::new("test", TimeDelta::hours(8));
        assert!(entry.is_valid());

        // Move the expiry into the past
        entry.expires_at = Utc::now() - TimeDelta::seconds(1);
        assert!(entry.is_expired());
    }

    #[test]
    fn test_entry_life_window() {
        let entry = CachedData::new((), TimeDelta::hours(8));
        assert_eq!(entry.expires_at - entry.cached_at, TimeDelta::seconds(28_800));
    }

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);

        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store.set("q1", json!({"rows": [1, 2, 3]})).unwrap();

        assert_eq!(store.get("q1"), Some(&json!({"rows": [1, 2, 3]})));
        assert_eq!(store.get("q2"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_persists_across_open() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut store = open_store(&temp_dir);
            store.set("q1", json!("plot")).unwrap();
        }

        let store = open_store(&temp_dir);
        assert_eq!(store.get("q1"), Some(&json!("plot")));
    }

    #[test]
    fn test_expired_entry_not_served() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::open(temp_dir.path().join("fileCache"), Duration::ZERO).unwrap();

        store.set("q1", json!(1)).unwrap();

        assert_eq!(store.get("q1"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_prunes_expired() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store.set("old", json!(1)).unwrap();
        store.entries.get_mut("old").unwrap().expires_at = Utc::now() - TimeDelta::seconds(1);
        store.set("new", json!(2)).unwrap();

        assert!(!store.entries.contains_key("old"));
        assert_eq!(store.get("new"), Some(&json!(2)));
    }

    #[test]
    fn test_expire_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        store.set("a", json!(1)).unwrap();
        store.set("b", json!(2)).unwrap();

        store.expire("a").unwrap();
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some(&json!(2)));

        // Expiring an absent key is not an error
        store.expire("missing").unwrap();

        store.clear().unwrap();
        assert!(store.is_empty());

        let reopened = open_store(&temp_dir);
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fileCache");
        fs::write(&path, "not json").unwrap();

        let result = FileStore::open(&path, DEFAULT_LIFE);
        assert!(matches!(result, Err(MatsError::Json(_))));
    }
}
