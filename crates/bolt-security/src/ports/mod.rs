//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that request handlers and queue workers use
//! - **Outbound (Driven)**: time source and payload cipher this crate needs

pub mod inbound;
pub mod outbound;
