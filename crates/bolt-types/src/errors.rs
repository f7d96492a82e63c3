//! # Error Types
//!
//! Errors raised while interpreting the security configuration.

use thiserror::Error;

/// Errors in the `security` configuration section.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The section is not valid JSON or does not match the expected shape.
    #[error("Invalid security configuration: {0}")]
    Parse(String),

    /// A group entry has no name.
    #[error("Group #{index} has an empty name")]
    EmptyGroupName { index: usize },

    /// A group entry has no shared secret.
    #[error("Group {group} has an empty hmackey")]
    EmptySecret { group: String },

    /// The confidentiality key is not 16 or 32 bytes long.
    #[error("Group {group} has a confidentiality key of {actual} bytes, expected 16 or 32")]
    InvalidKeyLength { group: String, actual: usize },

    /// A `hex:` confidentiality key is not valid hex.
    #[error("Group {group} has a malformed hex confidentiality key")]
    InvalidKeyEncoding { group: String },
}
