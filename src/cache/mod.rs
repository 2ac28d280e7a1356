// Cache module for computed results.
// Stores expensive results on local disk so identical requests are not recomputed.

pub mod fingerprint;
pub mod paths;
pub mod results;
pub mod store;

pub use fingerprint::fingerprint;
pub use paths::{CACHE_FILE_NAME, default_cache_path, user_cache_path};
pub use results::{CacheConfig, ResultCache};
pub use store::{CachedData, DEFAULT_LIFE, FileStore};
