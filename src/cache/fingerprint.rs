// Request fingerprints.
// Derives stable cache keys from serializable request parameters.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Hex SHA-256 of the canonical JSON form of `params`.
///
/// Object keys are sorted before hashing, so field order does not affect the key.
pub fn fingerprint<T: Serialize + ?Sized>(params: &T) -> Result<String> {
    // serde_json::Map is ordered by key, so the Value round trip canonicalizes objects
    let canonical = serde_json::to_value(params)?;
    let bytes = serde_json::to_vec(&canonical)?;
    let digest = Sha256::digest(bytes);
    Ok(hex::encode(digest))
}
