//! # Group Authentication
//!
//! Binary credential check: is the presented `(name, secret)` pair one of the
//! registered groups?
//!
//! The registry is treated as a set of valid pairs, so a name configured twice
//! with two secrets accepts either secret. Every entry is compared in constant
//! time and the scan never stops early, so neither the position of a match nor
//! which half of the pair was wrong shows up in timing.

use crate::domain::registry::GroupRegistry;
use bolt_crypto::constant_time_eq;
use tracing::debug;

/// Returns true iff some group in `registry` has exactly this name and secret.
///
/// Never fails; an unknown name, a wrong secret and an empty registry all
/// yield `false`. The presented secret is never logged.
pub fn authenticate_group(
    name: &str,
    presented_secret: impl AsRef<[u8]>,
    registry: &GroupRegistry,
) -> bool {
    let presented_secret = presented_secret.as_ref();

    let mut matched = false;
    for group in registry.iter() {
        let name_matches = constant_time_eq(group.name().as_bytes(), name.as_bytes());
        let secret_matches = constant_time_eq(group.secret(), presented_secret);
        // `&` and `|=` on bool do not short-circuit.
        matched |= name_matches & secret_matches;
    }

    if !matched {
        debug!(group = %name, "Group authentication failed");
    }

    matched
}
