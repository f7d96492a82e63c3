//! # Security Service
//!
//! Application service that implements the `CommandSecurityApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`CommandSecurityApi`)
//! - Uses the outbound port (`Clock`) for envelope timestamps and freshness
//! - Delegates credential checks and envelope handling to the domain layer
//!
//! Every call works against one registry snapshot taken at its start, so a
//! concurrent `reload` never changes the groups or the freshness policy a call
//! sees halfway through.

use crate::domain::clock::ClockSkewPolicy;
use crate::domain::codec::EnvelopeCodec;
use crate::domain::errors::{RegistryError, SecurityError};
use crate::domain::registry::{GroupRegistry, SharedRegistry};
use crate::ports::inbound::CommandSecurityApi;
use crate::ports::outbound::{Clock, SystemClock};
use bolt_types::SecurityConfig;
use std::sync::Arc;
use tracing::{debug, warn};

/// Security service over the active group registry.
pub struct SecurityService<C: Clock = SystemClock> {
    registry: SharedRegistry,
    clock: C,
}

impl SecurityService<SystemClock> {
    /// Build a service from the security configuration, using the wall clock.
    pub fn from_config(config: &SecurityConfig) -> Result<Self, RegistryError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> SecurityService<C> {
    /// Build a service from the security configuration with a custom clock.
    pub fn with_clock(config: &SecurityConfig, clock: C) -> Result<Self, RegistryError> {
        let registry = GroupRegistry::from_config(config)?;
        Ok(Self {
            registry: SharedRegistry::new(registry),
            clock,
        })
    }

    /// Rebuild the registry (groups and verify timeout) from a new
    /// configuration and install it as one snapshot.
    ///
    /// On error the previous snapshot stays active.
    pub fn reload(&self, config: &SecurityConfig) -> Result<Arc<GroupRegistry>, SecurityError> {
        let registry = GroupRegistry::from_config(config)?;
        Ok(self.registry.install(registry))
    }

    /// The active registry snapshot.
    pub fn registry(&self) -> Arc<GroupRegistry> {
        self.registry.snapshot()
    }

    /// The freshness policy of the active snapshot.
    pub fn policy(&self) -> ClockSkewPolicy {
        self.registry.snapshot().policy()
    }

    /// The clock used for timestamps and freshness checks.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> CommandSecurityApi for SecurityService<C> {
    fn authenticate_group(&self, name: &str, secret: &str) -> bool {
        let authenticated = self.registry.authenticate(name, secret);
        if !authenticated {
            warn!(group = %name, "Rejected group credentials");
        }
        authenticated
    }

    fn seal_command(&self, group: &str, command: &str) -> Result<String, SecurityError> {
        let snapshot = self.registry.snapshot();
        let entry = snapshot
            .lookup(group)
            .ok_or_else(|| SecurityError::UnknownGroup(group.to_string()))?;

        let codec = EnvelopeCodec::for_group(entry);
        let envelope = codec.encode(entry.secret(), command, self.clock.now())?;

        debug!(
            group = %group,
            encrypted = codec.is_encrypted(),
            "Sealed command envelope"
        );
        Ok(envelope)
    }

    fn open_command(&self, group: &str, envelope: &str) -> Result<String, SecurityError> {
        let snapshot = self.registry.snapshot();
        let entry = snapshot
            .lookup(group)
            .ok_or_else(|| SecurityError::UnknownGroup(group.to_string()))?;

        let codec = EnvelopeCodec::for_group(entry);
        let policy = snapshot.policy();

        match codec.decode_at(entry.secret(), envelope, policy, self.clock.now()) {
            Ok(command) => Ok(command),
            Err(err) => {
                warn!(
                    group = %group,
                    error = %err,
                    sentinel = err.sentinel().unwrap_or(""),
                    "Discarding command envelope"
                );
                Err(err.into())
            }
        }
    }
}
