//! URL Fingerprints
//!
//! Content hash of a URL, used only as the deduplication cache key. Lowercase
//! hex SHA-1 so keys line up with data written by existing deployments.

use sha1::{Digest, Sha1};

/// Length of a fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 40;

/// Returns the hex SHA-1 digest of `url`.
pub fn fingerprint(url: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}
