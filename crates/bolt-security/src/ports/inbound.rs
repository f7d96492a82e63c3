//! # Inbound Ports (Driving Ports / API)
//!
//! The API request handlers and queue workers call.

use crate::domain::errors::SecurityError;

/// Primary command security API.
///
/// Implementations must be thread-safe (`Send + Sync`) and must not block.
pub trait CommandSecurityApi: Send + Sync {
    /// Is `(name, secret)` a registered group?
    ///
    /// Returns `false` for unknown names and wrong secrets alike; callers map
    /// both to the same "unauthorized" response.
    fn authenticate_group(&self, name: &str, secret: &str) -> bool;

    /// Wrap a command for `group` before handing it to the queue.
    ///
    /// # Errors
    /// * `SecurityError::UnknownGroup` - no such group is registered
    /// * `SecurityError::Envelope` - encoding failed
    fn seal_command(&self, group: &str, command: &str) -> Result<String, SecurityError>;

    /// Open an envelope received from the queue on behalf of `group`.
    ///
    /// # Errors
    /// * `SecurityError::UnknownGroup` - no such group is registered
    /// * `SecurityError::Envelope` - invalid or expired; discard the message
    fn open_command(&self, group: &str, envelope: &str) -> Result<String, SecurityError>;
}
