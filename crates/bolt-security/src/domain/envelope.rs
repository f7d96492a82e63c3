//! # Envelope Wire Format
//!
//! ```text
//! ┌─────────┬───────┬──────────────┬───────────┬─────────────┬─────────┬──────────┐
//! │ version │ flags │ timestamp    │ nonce     │ payload_len │ payload │ mac      │
//! │ u8      │ u8    │ i64 BE       │ 12 bytes  │ u32 BE      │ n bytes │ 32 bytes │
//! └─────────┴───────┴──────────────┴───────────┴─────────────┴─────────┴──────────┘
//! ```
//!
//! `mac = HMAC-SHA256(secret, MAC_DOMAIN || header || payload)`, so the
//! timestamp cannot be swapped without invalidating the tag. The frame is
//! carried as URL-safe base64 without padding.
//!
//! Every header field is fixed width, which keeps the MAC input canonical:
//! two different envelopes can never produce the same byte string.

use crate::domain::errors::InvalidReason;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use bolt_crypto::{Nonce, Tag, NONCE_LEN, TAG_LEN};

/// Current envelope version.
pub const ENVELOPE_VERSION: u8 = 1;

/// Flag bit: payload is encrypted with the group's confidentiality key.
pub const FLAG_ENCRYPTED: u8 = 0b0000_0001;

const KNOWN_FLAGS: u8 = FLAG_ENCRYPTED;

/// Domain separation prefix for the envelope MAC.
const MAC_DOMAIN: &[u8] = b"bolt-envelope-v1";

/// Bytes authenticated as associated data by the confidentiality layer:
/// version, flags, timestamp and nonce.
pub const AAD_LEN: usize = 1 + 1 + 8 + NONCE_LEN;

/// Encoded header length.
pub const HEADER_LEN: usize = AAD_LEN + 4;

/// Shortest possible frame (empty payload).
pub const MIN_FRAME_LEN: usize = HEADER_LEN + TAG_LEN;

/// Envelope header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeHeader {
    pub version: u8,
    pub flags: u8,
    /// Seconds since the UNIX epoch, as supplied by the producer.
    pub timestamp: i64,
    pub nonce: Nonce,
    pub payload_len: u32,
}

impl EnvelopeHeader {
    /// Whether the payload is ciphertext.
    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }

    /// Version, flags, timestamp and nonce.
    pub fn aad(&self) -> [u8; AAD_LEN] {
        let mut out = [0u8; AAD_LEN];
        out[0] = self.version;
        out[1] = self.flags;
        out[2..10].copy_from_slice(&self.timestamp.to_be_bytes());
        out[10..].copy_from_slice(self.nonce.as_bytes());
        out
    }

    /// The full encoded header.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..AAD_LEN].copy_from_slice(&self.aad());
        out[AAD_LEN..].copy_from_slice(&self.payload_len.to_be_bytes());
        out
    }

    /// Reads the fixed-width fields. No semantic checks happen here; version
    /// and flags are validated only after the MAC has been verified.
    fn parse(bytes: &[u8; HEADER_LEN]) -> Self {
        let mut timestamp = [0u8; 8];
        timestamp.copy_from_slice(&bytes[2..10]);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&bytes[10..AAD_LEN]);
        let mut payload_len = [0u8; 4];
        payload_len.copy_from_slice(&bytes[AAD_LEN..]);

        Self {
            version: bytes[0],
            flags: bytes[1],
            timestamp: i64::from_be_bytes(timestamp),
            nonce: Nonce::from_bytes(nonce),
            payload_len: u32::from_be_bytes(payload_len),
        }
    }

    /// Rejects unknown versions and reserved flag bits.
    pub fn validate(&self) -> Result<(), InvalidReason> {
        if self.version != ENVELOPE_VERSION {
            return Err(InvalidReason::UnsupportedVersion(self.version));
        }
        if self.flags & !KNOWN_FLAGS != 0 {
            return Err(InvalidReason::UnknownFlags(self.flags));
        }
        Ok(())
    }
}

/// A decoded (but not necessarily authentic) envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub header: EnvelopeHeader,
    pub payload: Vec<u8>,
    pub mac: Tag,
}

impl Envelope {
    /// Builds an envelope and computes its tag under `secret`.
    pub fn seal(secret: &[u8], header: EnvelopeHeader, payload: Vec<u8>) -> Self {
        let mac = bolt_crypto::sign(secret, &[MAC_DOMAIN, &header.to_bytes(), &payload]);
        Self {
            header,
            payload,
            mac,
        }
    }

    /// Checks the tag under `secret` in constant time.
    pub fn verify(&self, secret: &[u8]) -> bool {
        bolt_crypto::verify(
            secret,
            &[MAC_DOMAIN, &self.header.to_bytes(), &self.payload],
            &self.mac,
        )
    }

    /// Serializes to the opaque transport string.
    pub fn to_wire(&self) -> String {
        let mut frame = Vec::with_capacity(MIN_FRAME_LEN + self.payload.len());
        frame.extend_from_slice(&self.header.to_bytes());
        frame.extend_from_slice(&self.payload);
        frame.extend_from_slice(&self.mac);
        URL_SAFE_NO_PAD.encode(frame)
    }

    /// Parses the opaque transport string into its fields.
    pub fn from_wire(wire: &str) -> Result<Self, InvalidReason> {
        let frame = URL_SAFE_NO_PAD
            .decode(wire.as_bytes())
            .map_err(|_| InvalidReason::Encoding)?;

        if frame.len() < MIN_FRAME_LEN {
            return Err(InvalidReason::Truncated);
        }

        let (header_bytes, rest) = frame.split_at(HEADER_LEN);
        let (payload, mac_bytes) = rest.split_at(rest.len() - TAG_LEN);

        let mut raw_header = [0u8; HEADER_LEN];
        raw_header.copy_from_slice(header_bytes);
        let header = EnvelopeHeader::parse(&raw_header);

        if header.payload_len as usize != payload.len() {
            return Err(InvalidReason::LengthMismatch);
        }

        let mut mac = [0u8; TAG_LEN];
        mac.copy_from_slice(mac_bytes);

        Ok(Self {
            header,
            payload: payload.to_vec(),
            mac,
        })
    }
}
