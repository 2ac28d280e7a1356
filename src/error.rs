// Error types for mats-cache.
// Backing store faults are wrapped as-is, never reinterpreted.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MatsError>;
