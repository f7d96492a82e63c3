//! # Symmetric Encryption
//!
//! AES-GCM for the optional confidentiality layer of command envelopes.
//!
//! ## Security Properties
//!
//! - **AES-128-GCM** for 16-byte keys, **AES-256-GCM** for 32-byte keys
//! - 96-bit random nonces, one per envelope
//! - Associated data binds the ciphertext to the envelope header

use crate::CryptoError;
use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes128Gcm, Aes256Gcm, Nonce as GcmNonce,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of an AES-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Confidentiality key (128 or 256 bit).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ConfidentialityKey(Vec<u8>);

impl ConfidentialityKey {
    /// Create from bytes. Only 16- and 32-byte keys are accepted.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKeyLength` for any other length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        match bytes.len() {
            16 | 32 => Ok(Self(bytes.to_vec())),
            actual => Err(CryptoError::InvalidKeyLength { actual }),
        }
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; empty keys cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ConfidentialityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConfidentialityKey(<{} bytes>)", self.0.len())
    }
}

/// Nonce for encryption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    /// Generate a random nonce.
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

/// AES-GCM cipher keyed with a group's confidentiality key.
#[derive(Clone, Debug)]
pub struct AesGcmCipher {
    key: ConfidentialityKey,
}

impl AesGcmCipher {
    /// Create a cipher for `key`.
    pub fn new(key: ConfidentialityKey) -> Self {
        Self { key }
    }

    /// Encrypt `plaintext`, authenticating `aad` alongside it.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::EncryptionFailed` if encryption fails.
    pub fn seal(&self, nonce: &Nonce, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let payload = Payload {
            msg: plaintext,
            aad,
        };
        let nonce = GcmNonce::from_slice(nonce.as_bytes());

        let result = match self.key.len() {
            16 => Aes128Gcm::new_from_slice(&self.key.0)
                .map_err(|_| CryptoError::EncryptionFailed)?
                .encrypt(nonce, payload),
            _ => Aes256Gcm::new_from_slice(&self.key.0)
                .map_err(|_| CryptoError::EncryptionFailed)?
                .encrypt(nonce, payload),
        };
        result.map_err(|_| CryptoError::EncryptionFailed)
    }

    /// Decrypt `ciphertext`, checking `aad`.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::DecryptionFailed` if the key, nonce, ciphertext
    /// or associated data do not match.
    pub fn open(&self, nonce: &Nonce, ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let payload = Payload {
            msg: ciphertext,
            aad,
        };
        let nonce = GcmNonce::from_slice(nonce.as_bytes());

        let result = match self.key.len() {
            16 => Aes128Gcm::new_from_slice(&self.key.0)
                .map_err(|_| CryptoError::DecryptionFailed)?
                .decrypt(nonce, payload),
            _ => Aes256Gcm::new_from_slice(&self.key.0)
                .map_err(|_| CryptoError::DecryptionFailed)?
                .decrypt(nonce, payload),
        };
        result.map_err(|_| CryptoError::DecryptionFailed)
    }
}
