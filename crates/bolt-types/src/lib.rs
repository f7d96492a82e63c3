//! # Bolt Types
//!
//! Configuration model for the security core.
//!
//! The engine's configuration loader (file discovery, schema validation and
//! merging of customized settings) lives outside this workspace. What reaches
//! us is the already-parsed `security` section, modelled here as
//! [`SecurityConfig`].

pub mod config;
pub mod errors;

pub use config::{GroupConfig, SecurityConfig, DEFAULT_VERIFY_TIMEOUT_SECS};
pub use errors::ConfigError;
