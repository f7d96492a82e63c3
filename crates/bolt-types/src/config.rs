//! Security section of the engine configuration.
//!
//! Field names follow the engine's JSON configuration (`verifyTimeout`,
//! `groups[].hmackey`, `groups[].aesEncryptionKey`).

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default freshness window for signed envelopes (seconds).
pub const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 30;

/// Prefix marking a hex-encoded confidentiality key.
const HEX_KEY_PREFIX: &str = "hex:";

/// Accepted confidentiality key lengths (AES-128, AES-256).
const KEY_LENGTHS: [usize; 2] = [16, 32];

/// The `security` section of the engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityConfig {
    /// Symmetric clock-skew tolerance applied when opening envelopes.
    pub verify_timeout: u64,
    /// Registered groups, in configuration order.
    pub groups: Vec<GroupConfig>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            verify_timeout: DEFAULT_VERIFY_TIMEOUT_SECS,
            groups: Vec::new(),
        }
    }
}

impl SecurityConfig {
    /// Parse a `security` section from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate every group entry.
    ///
    /// Duplicate names are allowed; the credential check treats the groups as
    /// a set of valid (name, secret) pairs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, group) in self.groups.iter().enumerate() {
            group.validate(index)?;
        }
        Ok(())
    }
}

/// One registered group as it appears in configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Group name, matched case-sensitively.
    pub name: String,
    /// Shared secret used as the HMAC key.
    pub hmackey: String,
    /// Optional confidentiality key: 16 or 32 raw characters, or `hex:` followed
    /// by the hex encoding of 16 or 32 bytes.
    #[serde(
        default,
        rename = "aesEncryptionKey",
        skip_serializing_if = "Option::is_none"
    )]
    pub aes_encryption_key: Option<String>,
}

impl GroupConfig {
    /// Create a group entry without a confidentiality key.
    pub fn new(name: impl Into<String>, hmackey: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hmackey: hmackey.into(),
            aes_encryption_key: None,
        }
    }

    /// Attach a confidentiality key (same textual form as the config file).
    pub fn with_encryption_key(mut self, key: impl Into<String>) -> Self {
        self.aes_encryption_key = Some(key.into());
        self
    }

    /// Decode the confidentiality key into raw bytes, if one is configured.
    pub fn encryption_key_bytes(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        let Some(raw) = self.aes_encryption_key.as_deref() else {
            return Ok(None);
        };

        let bytes = match raw.strip_prefix(HEX_KEY_PREFIX) {
            Some(encoded) => hex::decode(encoded).map_err(|_| ConfigError::InvalidKeyEncoding {
                group: self.name.clone(),
            })?,
            None => raw.as_bytes().to_vec(),
        };

        if !KEY_LENGTHS.contains(&bytes.len()) {
            return Err(ConfigError::InvalidKeyLength {
                group: self.name.clone(),
                actual: bytes.len(),
            });
        }

        Ok(Some(bytes))
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyGroupName { index });
        }
        if self.hmackey.is_empty() {
            return Err(ConfigError::EmptySecret {
                group: self.name.clone(),
            });
        }
        self.encryption_key_bytes().map(|_| ())
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for GroupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupConfig")
            .field("name", &self.name)
            .field("hmackey", &"<redacted>")
            .field(
                "aes_encryption_key",
                &self.aes_encryption_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
