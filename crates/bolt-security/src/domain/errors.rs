//! # Security Errors
//!
//! Error types for envelope decoding, registry construction and the
//! application service.
//!
//! None of these types carry secrets, keys or payload bytes, so they are safe
//! to log.

use bolt_crypto::CryptoError;
use bolt_types::ConfigError;
use thiserror::Error;

/// Value returned alongside [`EnvelopeError::Expired`] by the legacy
/// `(string, error)` decode contract. Downstream callers match on it verbatim.
pub const EXPIRED_SENTINEL: &str = "Error verifying time";

/// Why an envelope was rejected as invalid (malformed or tampered).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Not valid base64.
    Encoding,
    /// Too short to hold a header and a tag.
    Truncated,
    /// Declared payload length disagrees with the actual payload.
    LengthMismatch,
    /// Tag does not verify under the secret.
    BadMac,
    /// Unknown envelope version.
    UnsupportedVersion(u8),
    /// Reserved flag bits are set.
    UnknownFlags(u8),
    /// Payload is encrypted but no confidentiality key is configured.
    MissingConfidentialityKey,
    /// Payload is plaintext but a confidentiality key is configured.
    UnexpectedPlaintext,
    /// Authenticated decryption of the payload failed.
    DecryptionFailed,
    /// Payload is not UTF-8.
    NotUtf8,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encoding => write!(f, "not valid base64"),
            Self::Truncated => write!(f, "truncated"),
            Self::LengthMismatch => write!(f, "payload length mismatch"),
            Self::BadMac => write!(f, "authentication tag mismatch"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported version {}", v),
            Self::UnknownFlags(flags) => write!(f, "unknown flags {:#04x}", flags),
            Self::MissingConfidentialityKey => write!(f, "encrypted payload without a key"),
            Self::UnexpectedPlaintext => write!(f, "plaintext payload where encryption is required"),
            Self::DecryptionFailed => write!(f, "payload decryption failed"),
            Self::NotUtf8 => write!(f, "payload is not UTF-8"),
        }
    }
}

/// Errors from encoding or decoding an envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Malformed or tampered envelope. Never accompanied by plaintext.
    #[error("Invalid envelope: {0}")]
    Invalid(InvalidReason),

    /// Authentic envelope whose timestamp is outside the freshness window.
    #[error("Envelope timestamp {timestamp} is more than {tolerance}s from {now}")]
    Expired {
        timestamp: i64,
        now: i64,
        tolerance: u64,
    },

    /// Payload exceeds the 32-bit length field.
    #[error("Payload of {len} bytes is too large for an envelope")]
    PayloadTooLarge { len: usize },

    /// The confidentiality layer failed while sealing.
    #[error("Envelope encryption failed: {0}")]
    Encryption(CryptoError),
}

impl EnvelopeError {
    /// The legacy sentinel string, for [`EnvelopeError::Expired`] only.
    pub fn sentinel(&self) -> Option<&'static str> {
        match self {
            Self::Expired { .. } => Some(EXPIRED_SENTINEL),
            _ => None,
        }
    }

    /// True for the expired case.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired { .. })
    }

    /// True for malformed or tampered envelopes.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl From<InvalidReason> for EnvelopeError {
    fn from(reason: InvalidReason) -> Self {
        Self::Invalid(reason)
    }
}

/// Errors building a [`GroupRegistry`](crate::GroupRegistry) from configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The security section failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A confidentiality key was rejected by the cipher.
    #[error("Group {group}: {source}")]
    InvalidKey { group: String, source: CryptoError },
}

/// Errors surfaced by [`SecurityService`](crate::SecurityService).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecurityError {
    /// No group with this name is registered.
    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    /// Envelope encoding or decoding failed.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// Reloading the registry failed; the previous snapshot stays active.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
