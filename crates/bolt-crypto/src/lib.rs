//! # Bolt Crypto - Envelope Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `mac` | HMAC-SHA256 | Envelope authentication tags |
//! | `compare` | `subtle` | Constant-time secret comparison |
//! | `symmetric` | AES-128-GCM / AES-256-GCM | Optional payload confidentiality |
//!
//! ## Security Properties
//!
//! - **Tag verification** goes through `Mac::verify_slice` (constant-time)
//! - **Secret comparison** never short-circuits on the first differing byte
//! - **Key material** is zeroized when dropped

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compare;
pub mod errors;
pub mod mac;
pub mod symmetric;

// Re-exports
pub use compare::constant_time_eq;
pub use errors::CryptoError;
pub use mac::{sign, verify, Tag, TAG_LEN};
pub use symmetric::{AesGcmCipher, ConfidentialityKey, Nonce, NONCE_LEN};
