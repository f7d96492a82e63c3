//! # Registry Reload Under Load
//!
//! Readers authenticate and open envelopes while a writer installs new registry
//! generations. Every read must see exactly one generation.

#[cfg(test)]
mod tests {
    use crate::fixtures::{security_config, COMMAND, NOW, OTHER_SECRET, SECRET};
    use bolt_security::{
        authenticate_group, CommandSecurityApi, EnvelopeError, FixedClock, Group, GroupRegistry,
        InvalidReason, SecurityError, SecurityService, SharedRegistry,
    };
    use bolt_types::{GroupConfig, SecurityConfig};
    use parking_lot::Mutex;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    const GROUPS_PER_GENERATION: usize = 8;
    const GENERATIONS: usize = 200;

    /// Every group of generation `n` shares the secret `gen-{n}`.
    fn generation(n: usize) -> GroupRegistry {
        GroupRegistry::new(
            (0..GROUPS_PER_GENERATION)
                .map(|i| Group::new(format!("group-{i}"), format!("gen-{n}")))
                .collect(),
        )
    }

    /// The generation a snapshot belongs to, or `None` if its groups disagree.
    fn generation_of(registry: &GroupRegistry) -> Option<usize> {
        let found = (0..=GENERATIONS).find(|n| {
            authenticate_group("group-0", format!("gen-{n}"), registry)
        })?;
        let secret = format!("gen-{found}");
        (0..GROUPS_PER_GENERATION)
            .all(|i| authenticate_group(&format!("group-{i}"), &secret, registry))
            .then_some(found)
    }

    // =============================================================================
    // SNAPSHOT ATOMICITY
    // =============================================================================

    #[test]
    fn test_readers_never_observe_mixed_generations() {
        let shared = SharedRegistry::new(generation(0));
        let done = AtomicBool::new(false);
        let observed = Mutex::new(BTreeSet::new());

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let mut last = 0;
                    while !done.load(Ordering::Acquire) {
                        let snapshot = shared.snapshot();
                        let current = generation_of(&snapshot)
                            .unwrap_or_else(|| panic!("torn registry snapshot"));
                        // Installs are ordered, so a reader never goes backwards.
                        assert!(current >= last);
                        last = current;
                        observed.lock().insert(current);
                    }
                });
            }

            for n in 1..=GENERATIONS {
                shared.install(generation(n));
            }
            done.store(true, Ordering::Release);
        });

        assert_eq!(generation_of(&shared.snapshot()), Some(GENERATIONS));
        assert!(observed.lock().iter().all(|&n| n <= GENERATIONS));
    }

    #[test]
    fn test_inflight_check_keeps_its_snapshot() {
        let shared = SharedRegistry::new(generation(0));
        let inflight = shared.snapshot();

        thread::scope(|s| {
            s.spawn(|| shared.install(generation(1)));
        });

        assert!(authenticate_group("group-3", "gen-0", &inflight));
        assert!(!shared.authenticate("group-3", "gen-0"));
        assert!(shared.authenticate("group-3", "gen-1"));
    }

    // =============================================================================
    // SERVICE RELOAD
    // =============================================================================

    fn rotated(secret: &str) -> SecurityConfig {
        let mut config = security_config();
        config.groups[0] = GroupConfig::new("test01", secret);
        config
    }

    #[test]
    fn test_secret_rotation_invalidates_queued_envelopes() {
        let service =
            SecurityService::with_clock(&security_config(), FixedClock::new(NOW)).unwrap();
        let queued = service.seal_command("test01", COMMAND).unwrap();

        service.reload(&rotated("rotated-secret")).unwrap();

        assert_eq!(
            service.open_command("test01", &queued),
            Err(SecurityError::Envelope(EnvelopeError::Invalid(
                InvalidReason::BadMac
            )))
        );
        let fresh = service.seal_command("test01", COMMAND).unwrap();
        assert_eq!(service.open_command("test01", &fresh).unwrap(), COMMAND);
    }

    #[test]
    fn test_reload_with_same_secrets_keeps_envelopes_valid() {
        let service =
            SecurityService::with_clock(&security_config(), FixedClock::new(NOW)).unwrap();
        let queued = service.seal_command("secure", COMMAND).unwrap();

        service.reload(&security_config()).unwrap();

        assert_eq!(service.open_command("secure", &queued).unwrap(), COMMAND);
    }

    #[test]
    fn test_concurrent_reload_and_authentication() {
        let service =
            SecurityService::with_clock(&security_config(), FixedClock::new(NOW)).unwrap();
        let configs = [security_config(), rotated("rotated-secret")];
        let done = AtomicBool::new(false);

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    while !done.load(Ordering::Acquire) {
                        // "secure" is unchanged in both generations.
                        assert!(service.authenticate_group("secure", OTHER_SECRET));

                        let snapshot = service.registry();
                        let old = authenticate_group("test01", SECRET, &snapshot);
                        let new = authenticate_group("test01", "rotated-secret", &snapshot);
                        assert_ne!(old, new);
                    }
                });
            }

            for i in 0..100 {
                service.reload(&configs[i % 2]).unwrap();
            }
            done.store(true, Ordering::Release);
        });

        assert!(service.authenticate_group("test01", "rotated-secret"));
    }

    #[test]
    fn test_reload_swaps_timeout_with_secrets() {
        let generation_a = SecurityConfig {
            verify_timeout: 30,
            groups: vec![GroupConfig::new("test01", "secret-a")],
        };
        let generation_b = SecurityConfig {
            verify_timeout: 10,
            groups: vec![GroupConfig::new("test01", "secret-b")],
        };

        let service = SecurityService::with_clock(&generation_b, FixedClock::new(NOW)).unwrap();
        let sealed_under_b = service.seal_command("test01", COMMAND).unwrap();
        service.clock().set(NOW + 20);

        // A rejects the tag, B rejects the age. Only a torn pairing of B's
        // secret with A's window would accept it.
        let done = AtomicBool::new(false);
        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    while !done.load(Ordering::Acquire) {
                        match service.open_command("test01", &sealed_under_b) {
                            Err(SecurityError::Envelope(err)) => {
                                assert!(
                                    err.is_expired()
                                        || err == EnvelopeError::Invalid(InvalidReason::BadMac),
                                    "unexpected error {:?}",
                                    err
                                );
                            }
                            other => panic!("stale envelope opened: {:?}", other),
                        }
                    }
                });
            }

            for i in 0..20_000 {
                let config = if i % 2 == 0 { &generation_a } else { &generation_b };
                service.reload(config).unwrap();
            }
            done.store(true, Ordering::Release);
        });

        assert_eq!(service.policy().tolerance_secs(), 10);
    }
}
