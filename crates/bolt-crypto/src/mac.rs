//! # HMAC-SHA256 Tags
//!
//! Envelope tags are computed over several byte slices fed to the MAC in
//! order, so callers never build an intermediate concatenation.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 tag in bytes.
pub const TAG_LEN: usize = 32;

/// An HMAC-SHA256 tag.
pub type Tag = [u8; TAG_LEN];

fn keyed(secret: &[u8], parts: &[&[u8]]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    for part in parts {
        mac.update(part);
    }
    mac
}

/// Computes the tag of `parts` (fed in order) under `secret`.
pub fn sign(secret: &[u8], parts: &[&[u8]]) -> Tag {
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&keyed(secret, parts).finalize().into_bytes());
    tag
}

/// Verifies `tag` against `parts` under `secret`.
///
/// # Security
///
/// Uses constant-time comparison to prevent timing attacks. A tag of the
/// wrong length is rejected.
pub fn verify(secret: &[u8], parts: &[&[u8]], tag: &[u8]) -> bool {
    keyed(secret, parts).verify_slice(tag).is_ok()
}
