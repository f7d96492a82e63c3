//! # Envelope Codec
//!
//! Wraps a command string in a MAC-protected, timestamped envelope and opens
//! it again on the consumer side.
//!
//! ## Decode order
//!
//! 1. Parse the frame (base64, minimum length, declared payload length)
//! 2. Verify the tag (constant time). Nothing below runs on a forged envelope.
//! 3. Validate version, flags and the encryption mode
//! 4. Freshness check against a single `now` reading
//! 5. Decrypt (if encrypted) and check UTF-8
//!
//! Each envelope carries a fresh random nonce, so encoding the same command at
//! the same second twice yields two different strings.

use crate::domain::clock::ClockSkewPolicy;
use crate::domain::entities::Group;
use crate::domain::envelope::{Envelope, EnvelopeHeader, ENVELOPE_VERSION, FLAG_ENCRYPTED};
use crate::domain::errors::{EnvelopeError, InvalidReason, EXPIRED_SENTINEL};
use crate::ports::outbound::{Clock, PayloadCipher, SystemClock};
use bolt_crypto::Nonce;
use std::sync::Arc;
use tracing::debug;

/// Encoder/decoder for command envelopes.
///
/// Without a cipher the payload travels as authenticated plaintext. With a
/// cipher every envelope is encrypted, and plaintext envelopes are rejected.
#[derive(Clone, Default)]
pub struct EnvelopeCodec {
    cipher: Option<Arc<dyn PayloadCipher>>,
}

impl std::fmt::Debug for EnvelopeCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeCodec")
            .field("encrypted", &self.cipher.is_some())
            .finish()
    }
}

impl EnvelopeCodec {
    /// A codec producing authenticated plaintext envelopes.
    pub fn new() -> Self {
        Self::default()
    }

    /// A codec that encrypts payloads with `cipher`.
    pub fn with_cipher(cipher: Arc<dyn PayloadCipher>) -> Self {
        Self {
            cipher: Some(cipher),
        }
    }

    /// The codec matching a group's configuration: encrypted iff the group
    /// has a confidentiality key.
    pub fn for_group(group: &Group) -> Self {
        match group.cipher() {
            Some(cipher) => Self::with_cipher(Arc::new(cipher)),
            None => Self::new(),
        }
    }

    /// Whether this codec encrypts payloads.
    pub fn is_encrypted(&self) -> bool {
        self.cipher.is_some()
    }

    /// Wraps `plaintext` in an envelope stamped with `timestamp`.
    ///
    /// # Errors
    ///
    /// - `EnvelopeError::PayloadTooLarge` if the payload exceeds `u32::MAX` bytes
    /// - `EnvelopeError::Encryption` if the cipher fails
    pub fn encode(
        &self,
        secret: &[u8],
        plaintext: &str,
        timestamp: i64,
    ) -> Result<String, EnvelopeError> {
        let mut header = EnvelopeHeader {
            version: ENVELOPE_VERSION,
            flags: if self.cipher.is_some() { FLAG_ENCRYPTED } else { 0 },
            timestamp,
            nonce: Nonce::generate(),
            payload_len: 0,
        };

        let payload = match &self.cipher {
            Some(cipher) => cipher
                .seal(&header.nonce, plaintext.as_bytes(), &header.aad())
                .map_err(EnvelopeError::Encryption)?,
            None => plaintext.as_bytes().to_vec(),
        };

        header.payload_len = u32::try_from(payload.len()).map_err(|_| {
            EnvelopeError::PayloadTooLarge {
                len: payload.len(),
            }
        })?;

        Ok(Envelope::seal(secret, header, payload).to_wire())
    }

    /// Opens an envelope, reading the system clock once.
    pub fn decode(
        &self,
        secret: &[u8],
        envelope: &str,
        tolerance_secs: u64,
    ) -> Result<String, EnvelopeError> {
        self.decode_at(
            secret,
            envelope,
            ClockSkewPolicy::new(tolerance_secs),
            SystemClock.now(),
        )
    }

    /// Opens an envelope against an explicit `now`.
    ///
    /// # Errors
    ///
    /// - `EnvelopeError::Invalid` for malformed, forged or tampered envelopes
    /// - `EnvelopeError::Expired` for authentic envelopes outside the window
    pub fn decode_at(
        &self,
        secret: &[u8],
        envelope: &str,
        policy: ClockSkewPolicy,
        now: i64,
    ) -> Result<String, EnvelopeError> {
        let envelope = Envelope::from_wire(envelope)?;

        if !envelope.verify(secret) {
            return Err(InvalidReason::BadMac.into());
        }

        let header = envelope.header;
        header.validate()?;

        match (header.is_encrypted(), self.cipher.is_some()) {
            (true, false) => return Err(InvalidReason::MissingConfidentialityKey.into()),
            (false, true) => return Err(InvalidReason::UnexpectedPlaintext.into()),
            _ => {}
        }

        if let Err(violation) = policy.check(header.timestamp, now) {
            debug!(
                timestamp = violation.timestamp,
                now = violation.now,
                tolerance = violation.tolerance,
                "Envelope outside freshness window"
            );
            return Err(EnvelopeError::Expired {
                timestamp: violation.timestamp,
                now: violation.now,
                tolerance: violation.tolerance,
            });
        }

        let plaintext = match &self.cipher {
            Some(cipher) => cipher
                .open(&header.nonce, &envelope.payload, &header.aad())
                .map_err(|_| InvalidReason::DecryptionFailed)?,
            None => envelope.payload,
        };

        String::from_utf8(plaintext).map_err(|_| InvalidReason::NotUtf8.into())
    }
}

/// Wraps `plaintext` in an authenticated plaintext envelope.
pub fn encode(secret: &[u8], plaintext: &str, timestamp: i64) -> Result<String, EnvelopeError> {
    EnvelopeCodec::new().encode(secret, plaintext, timestamp)
}

/// Opens an authenticated plaintext envelope, accepting timestamps within
/// `tolerance_secs` of the current time.
pub fn decode(secret: &[u8], envelope: &str, tolerance_secs: u64) -> Result<String, EnvelopeError> {
    EnvelopeCodec::new().decode(secret, envelope, tolerance_secs)
}

/// Decode result in the `Ok | Expired | Invalid` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Authentic and fresh.
    Ok(String),
    /// Authentic but outside the freshness window.
    Expired {
        sentinel: &'static str,
        error: EnvelopeError,
    },
    /// Malformed or tampered.
    Invalid(EnvelopeError),
}

impl DecodeOutcome {
    /// The legacy `(string, error)` pair: `(plaintext, None)` on success,
    /// `(EXPIRED_SENTINEL, Some(err))` when expired, `("", Some(err))` otherwise.
    ///
    /// The string is never trustworthy when the error is present.
    pub fn into_pair(self) -> (String, Option<EnvelopeError>) {
        match self {
            Self::Ok(plaintext) => (plaintext, None),
            Self::Expired { sentinel, error } => (sentinel.to_string(), Some(error)),
            Self::Invalid(error) => (String::new(), Some(error)),
        }
    }

    /// True only for [`DecodeOutcome::Ok`].
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl From<Result<String, EnvelopeError>> for DecodeOutcome {
    fn from(result: Result<String, EnvelopeError>) -> Self {
        match result {
            Ok(plaintext) => Self::Ok(plaintext),
            Err(error) if error.is_expired() => Self::Expired {
                sentinel: EXPIRED_SENTINEL,
                error,
            },
            Err(error) => Self::Invalid(error),
        }
    }
}
