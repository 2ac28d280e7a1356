// Server-side context.
// Owns the result cache and deployment info; only code handed this context can use the cache.

use crate::cache::{CacheConfig, ResultCache};
use crate::error::Result;
use crate::version::VersionInfo;

/// Value of `NODE_ENV` that marks a development server.
const DEVELOPMENT: &str = "development";

/// Server startup configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    pub cache: CacheConfig,
    /// Development servers never serve cached results.
    pub development: bool,
}

impl ServerConfig {
    /// Default configuration with development mode read from `NODE_ENV`.
    pub fn from_env() -> Self {
        let development = std::env::var("NODE_ENV").is_ok_and(|env| env == DEVELOPMENT);

        Self {
            development,
            ..Self::default()
        }
    }
}

/// Capability handle for the privileged server side.
#[derive(Debug)]
pub struct ServerContext {
    cache: ResultCache,
    versions: VersionInfo,
    development: bool,
}

impl ServerContext {
    /// Establish the server context: open the result cache and resolve versions.
    pub fn init(config: ServerConfig) -> Result<Self> {
        let cache = ResultCache::open(&config.cache)?;
        let versions = VersionInfo::from_env().or_local_defaults();

        tracing::info!(
            version = %versions.version,
            commit = %versions.commit,
            branch = %versions.branch,
            development = config.development,
            "server context initialized"
        );

        Ok(Self {
            cache,
            versions,
            development: config.development,
        })
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ResultCache {
        &mut self.cache
    }

    /// Deployment identifiers, with local defaults when no version is set.
    pub fn versions(&self) -> &VersionInfo {
        &self.versions
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    /// Whether a cached result must be dropped before serving a request.
    pub fn should_expire(&self, requested: bool) -> bool {
        self.development || requested
    }
}
