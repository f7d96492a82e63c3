//! # Clock-Skew Policy
//!
//! Freshness window for envelope timestamps.
//!
//! The window is symmetric: an envelope stamped `tolerance + 1` seconds in the
//! future fails exactly like one stamped `tolerance + 1` seconds in the past.
//! A skew of exactly `tolerance` seconds is accepted.
//!
//! The caller supplies `now`. Decoding reads the clock once and passes the
//! same reading here, so the comparison cannot drift mid-decode.

use bolt_types::DEFAULT_VERIFY_TIMEOUT_SECS;

/// Symmetric tolerance (seconds) between an envelope timestamp and `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSkewPolicy {
    tolerance_secs: u64,
}

/// A timestamp outside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkewViolation {
    pub timestamp: i64,
    pub now: i64,
    pub tolerance: u64,
}

impl ClockSkewPolicy {
    /// A policy accepting `|now - timestamp| <= tolerance_secs`.
    pub const fn new(tolerance_secs: u64) -> Self {
        Self { tolerance_secs }
    }

    /// Configured tolerance in seconds.
    pub const fn tolerance_secs(&self) -> u64 {
        self.tolerance_secs
    }

    /// Checks `timestamp` against `now`.
    pub fn check(&self, timestamp: i64, now: i64) -> Result<(), SkewViolation> {
        if now.abs_diff(timestamp) > self.tolerance_secs {
            return Err(SkewViolation {
                timestamp,
                now,
                tolerance: self.tolerance_secs,
            });
        }
        Ok(())
    }
}

impl Default for ClockSkewPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_VERIFY_TIMEOUT_SECS)
    }
}
