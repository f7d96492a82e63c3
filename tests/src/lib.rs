//! # Bolt Security Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── exploits/         # Attack simulations against the envelope and credential check
//! │   ├── forgery.rs    # Wrong keys, timestamp substitution, cross-group replay
//! │   ├── freshness.rs  # Stale and future-dated envelopes
//! │   ├── downgrade.rs  # Stripping or faking the confidentiality layer
//! │   └── malformed.rs  # Truncation, garbage, length lies
//! │
//! └── integration/      # Producer → queue → consumer flows, registry reload
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p bolt-tests
//!
//! # By category
//! cargo test -p bolt-tests integration::
//! cargo test -p bolt-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p bolt-tests
//! ```

pub mod exploits;
