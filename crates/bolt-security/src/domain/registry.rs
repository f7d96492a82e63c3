//! # Group Registry
//!
//! [`GroupRegistry`] is an immutable snapshot of the registered groups, built
//! once per configuration generation. [`SharedRegistry`] holds the active
//! snapshot and swaps it as a unit on reload.
//!
//! ## Snapshot semantics
//!
//! Readers clone the `Arc` of the active snapshot and release the lock before
//! doing any work. A check that started against snapshot A keeps using A even
//! if B is installed meanwhile; nobody ever sees a mix of A and B entries.
//! The freshness policy lives in the snapshot too, so a reader pairs each
//! generation's secrets with that generation's tolerance.

use crate::domain::auth::authenticate_group;
use crate::domain::clock::ClockSkewPolicy;
use crate::domain::entities::Group;
use crate::domain::errors::RegistryError;
use bolt_types::SecurityConfig;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Registered groups in configuration order, plus the freshness policy of
/// the same configuration generation. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    groups: Vec<Group>,
    policy: ClockSkewPolicy,
}

impl GroupRegistry {
    /// Build a registry from an already validated, ordered list of groups,
    /// with the default freshness policy.
    pub fn new(groups: Vec<Group>) -> Self {
        Self {
            groups,
            policy: ClockSkewPolicy::default(),
        }
    }

    /// Replace the freshness policy.
    pub fn with_policy(mut self, policy: ClockSkewPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate the security section and build a registry from it.
    pub fn from_config(config: &SecurityConfig) -> Result<Self, RegistryError> {
        config.validate()?;
        let groups = config
            .groups
            .iter()
            .map(Group::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(groups).with_policy(ClockSkewPolicy::new(config.verify_timeout)))
    }

    /// Freshness policy for envelopes opened against this snapshot.
    pub fn policy(&self) -> ClockSkewPolicy {
        self.policy
    }

    /// First group with exactly this name, in configuration order.
    pub fn lookup(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Groups in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// Number of registered groups (duplicates included).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no group is registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// The currently installed registry snapshot.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    active: RwLock<Arc<GroupRegistry>>,
}

impl SharedRegistry {
    /// Start with `registry` as the active snapshot.
    pub fn new(registry: GroupRegistry) -> Self {
        Self {
            active: RwLock::new(Arc::new(registry)),
        }
    }

    /// The active snapshot. Stays valid after later installs.
    pub fn snapshot(&self) -> Arc<GroupRegistry> {
        Arc::clone(&self.active.read())
    }

    /// Replace the active snapshot and return the previous one.
    pub fn install(&self, registry: GroupRegistry) -> Arc<GroupRegistry> {
        let next = Arc::new(registry);
        let groups = next.len();
        let tolerance = next.policy().tolerance_secs();
        let previous = std::mem::replace(&mut *self.active.write(), next);
        info!(groups, tolerance, "Installed group registry snapshot");
        previous
    }

    /// Run the credential check against one snapshot.
    pub fn authenticate(&self, name: &str, presented_secret: impl AsRef<[u8]>) -> bool {
        authenticate_group(name, presented_secret, &self.snapshot())
    }
}
