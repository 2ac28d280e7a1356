// Server-side infrastructure for MATS.
// Deployment version info and an on-disk cache of computed plot results.

pub mod cache;
pub mod error;
pub mod server;
pub mod version;

pub use cache::{CacheConfig, ResultCache, fingerprint};
pub use error::{MatsError, Result};
pub use server::{ServerConfig, ServerContext};
pub use version::{VersionInfo, get_versions_from_env};
