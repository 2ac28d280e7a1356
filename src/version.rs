// Deployment version info.
// Reads version, commit and branch identifiers from the process environment.

use serde::{Deserialize, Serialize};

/// Placeholder for any identifier missing from the environment.
pub const UNKNOWN: &str = "Unknown";

pub const VERSION_VAR: &str = "VERSION";
pub const COMMIT_VAR: &str = "COMMIT";
pub const BRANCH_VAR: &str = "BRANCH";

/// Snapshot of the deployment identifiers at the time it was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub commit: String,
    pub branch: String,
}

impl VersionInfo {
    /// Resolve from the `VERSION`, `COMMIT` and `BRANCH` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve using an arbitrary variable lookup.
    /// Unset and empty values both resolve to [`UNKNOWN`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };

        Self {
            version: resolve(VERSION_VAR),
            commit: resolve(COMMIT_VAR),
            branch: resolve(BRANCH_VAR),
        }
    }

    /// Whether a deployment version was found.
    pub fn is_known(&self) -> bool {
        self.version != UNKNOWN
    }

    /// Replace an unknown deployment with the identifiers used for local runs.
    pub fn or_local_defaults(self) -> Self {
        if self.is_known() {
            return self;
        }

        Self {
            version: "localhost".to_string(),
            commit: "HEAD".to_string(),
            branch: "feature".to_string(),
        }
    }
}

/// Read version info from the environment. Never fails.
pub fn get_versions_from_env() -> VersionInfo {
    VersionInfo::from_env()
}
