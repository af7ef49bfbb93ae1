//! Fingerprint digest and constant-time hex comparison.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 fingerprint of a canonical byte string.
///
/// Returns a lowercase 64-character hex string. Pure function — no side
/// effects, no failure modes.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Constant-time byte comparison.
///
/// Used wherever a stored digest is compared against a recomputed or
/// externally-supplied one, so the comparison does not short-circuit on the
/// first differing byte. Length differences return early — length is not
/// secret for hex digests of a fixed-width hash.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
