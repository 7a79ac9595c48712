//! Content-addressed entry ids.

use sha2::{Digest, Sha256};

/// Compute the stable id of a cache entry from its canonical key.
pub fn entry_id(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check whether a string has the shape of an entry id.
pub fn is_entry_id(value: &str) -> bool {
    value.len() == 64 && value.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}
