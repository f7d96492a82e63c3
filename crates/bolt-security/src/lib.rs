//! # Bolt Security
//!
//! Authenticates callers and protects commands crossing the message queue.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): groups, the registry snapshot, the credential
//!   check, the clock-skew policy and the envelope codec. Pure, no I/O.
//! - **Ports Layer** (`ports/`): the inbound API trait and the outbound clock and
//!   payload-cipher traits
//! - **Service Layer** (`service.rs`): wires the active registry snapshot, a clock
//!   and the codec together
//!
//! ## Security Notes
//!
//! - **Integrity**: every envelope carries an HMAC-SHA256 tag over its header
//!   (including the timestamp) and payload
//! - **Freshness**: envelopes outside a symmetric `±tolerance` window are rejected
//!   with [`EnvelopeError::Expired`], which also carries the legacy sentinel
//!   string [`EXPIRED_SENTINEL`]
//! - **Constant time**: secrets and tags are never compared with `==`
//! - **No replay cache**: decoding the same envelope twice succeeds twice; freshness
//!   is the only replay bound

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::auth::authenticate_group;
pub use domain::clock::{ClockSkewPolicy, SkewViolation};
pub use domain::codec::{decode, encode, DecodeOutcome, EnvelopeCodec};
pub use domain::entities::{Group, GroupSecret};
pub use domain::envelope::{Envelope, EnvelopeHeader, ENVELOPE_VERSION, FLAG_ENCRYPTED};
pub use domain::errors::{
    EnvelopeError, InvalidReason, RegistryError, SecurityError, EXPIRED_SENTINEL,
};
pub use domain::registry::{GroupRegistry, SharedRegistry};
pub use ports::inbound::CommandSecurityApi;
pub use ports::outbound::{Clock, FixedClock, PayloadCipher, SystemClock};
pub use service::SecurityService;
