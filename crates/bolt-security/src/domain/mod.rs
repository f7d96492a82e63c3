//! # Domain Layer
//!
//! Pure authentication and envelope logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod auth;
pub mod clock;
pub mod codec;
pub mod entities;
pub mod envelope;
pub mod errors;
pub mod registry;
