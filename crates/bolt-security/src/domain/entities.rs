//! # Domain Entities
//!
//! A [`Group`] is one registered principal: a name, the shared secret used as
//! its MAC key, and optionally a confidentiality key for encrypted envelopes.

use crate::domain::errors::RegistryError;
use bolt_crypto::{AesGcmCipher, ConfidentialityKey};
use bolt_types::GroupConfig;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Shared secret of a group. Zeroized on drop, redacted in `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct GroupSecret(Vec<u8>);

impl GroupSecret {
    /// Wrap raw secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for GroupSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GroupSecret(<redacted>)")
    }
}

/// A registered principal.
#[derive(Clone, Debug)]
pub struct Group {
    name: String,
    secret: GroupSecret,
    confidentiality_key: Option<ConfidentialityKey>,
}

impl Group {
    /// A group without a confidentiality key.
    pub fn new(name: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            secret: GroupSecret::new(secret),
            confidentiality_key: None,
        }
    }

    /// Attach a confidentiality key; envelopes for this group are then encrypted.
    pub fn with_confidentiality_key(mut self, key: ConfidentialityKey) -> Self {
        self.confidentiality_key = Some(key);
        self
    }

    /// Build a group from a validated configuration entry.
    pub fn from_config(config: &GroupConfig) -> Result<Self, RegistryError> {
        let group = Self::new(config.name.clone(), config.hmackey.as_bytes());

        match config.encryption_key_bytes()?.map(Zeroizing::new) {
            Some(bytes) => {
                let key = ConfidentialityKey::from_slice(&bytes).map_err(|source| {
                    RegistryError::InvalidKey {
                        group: config.name.clone(),
                        source,
                    }
                })?;
                Ok(group.with_confidentiality_key(key))
            }
            None => Ok(group),
        }
    }

    /// Group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared secret (MAC key).
    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// Confidentiality key, if configured.
    pub fn confidentiality_key(&self) -> Option<&ConfidentialityKey> {
        self.confidentiality_key.as_ref()
    }

    /// Cipher for the confidentiality layer, if a key is configured.
    pub fn cipher(&self) -> Option<AesGcmCipher> {
        self.confidentiality_key.clone().map(AesGcmCipher::new)
    }
}
