// Result cache for expensive computations.
// Typed get/store/clear/expire on top of the file store.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::error::{MatsError, Result};

use super::paths::default_cache_path;
use super::store::{DEFAULT_LIFE, FileStore};

/// Location and entry life of the result cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Backing cache file.
    pub file: PathBuf,
    /// Life applied to every entry at write time.
    pub life: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            file: default_cache_path(),
            life: DEFAULT_LIFE,
        }
    }
}

/// Cache of computed results keyed by an opaque caller-chosen key.
///
/// Only a [`ServerContext`](crate::server::ServerContext) can open one.
#[derive(Debug)]
pub struct ResultCache {
    store: FileStore,
}

impl ResultCache {
    pub(crate) fn open(config: &CacheConfig) -> Result<Self> {
        let store = FileStore::open(&config.file, config.life)?;
        Ok(Self { store })
    }

    /// Get a cached result. Missing and expired keys yield `None`.
    pub fn get_result<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key) {
            Some(value) => {
                debug!(key, "result cache hit");
                Ok(Some(T::deserialize(value)?))
            }
            None => {
                debug!(key, "result cache miss");
                Ok(None)
            }
        }
    }

    /// Store a result, resetting its expiry.
    pub fn store_result<T: Serialize + ?Sized>(&mut self, key: &str, result: &T) -> Result<()> {
        let value = serde_json::to_value(result)?;
        self.store.set(key, value)?;
        debug!(key, "stored result");
        Ok(())
    }

    /// Remove every cached result.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()?;
        info!(path = %self.store.path().display(), "cleared result cache");
        Ok(())
    }

    /// Expire a single key now.
    pub fn expire_key(&mut self, key: &str) -> Result<()> {
        self.store.expire(key)?;
        debug!(key, "expired result");
        Ok(())
    }

    /// Serve `key` from the cache or compute and store it.
    ///
    /// A hit is stored again so its expiry restarts. With `force_expire` the key
    /// is dropped first and the result is always recomputed.
    pub fn get_or_compute<T, E, F>(
        &mut self,
        key: &str,
        force_expire: bool,
        compute: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<MatsError>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        if force_expire {
            self.expire_key(key)?;
        }

        if let Some(cached) = self.get_result::<T>(key)? {
            self.store_result(key, &cached)?;
            return Ok(cached);
        }

        let result = compute()?;
        self.store_result(key, &result)?;
        Ok(result)
    }

    /// Number of live cached results.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
