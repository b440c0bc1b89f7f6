//! Reconciliation engine
//!
//! Decides whether the remote zone needs to change at all, and if so what
//! the exact target record set is. This module is pure: it never talks to
//! the network and never mutates state, which is what makes the properties
//! below testable in isolation.
//!
//! - Change detection is plain value comparison against the last applied
//!   addresses. The state space is two addresses; hashing or versioning
//!   would buy nothing.
//! - The force flag lets an operator recover from remote-side drift (e.g. a
//!   manually edited record) without waiting for the IP to change.
//! - An enabled family with no observed address is fatal: proceeding
//!   without an authoritative current value could publish garbage.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use tracing::debug;

use crate::error::{Error, Result};
use crate::state::SyncState;
use crate::traits::{IpFamily, RecordSpec};

/// The names managed at the zone: the apex and the wildcard
pub const MANAGED_NAMES: [&str; 2] = ["@", "*"];

/// Addresses observed from the oracle during one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObservedAddresses {
    /// Current public IPv4 address, if IPv4 is enabled and the lookup ran
    pub ipv4: Option<Ipv4Addr>,
    /// Current public IPv6 address, if IPv6 is enabled and the lookup ran
    pub ipv6: Option<Ipv6Addr>,
}

impl ObservedAddresses {
    /// Record an observed address in its family's slot
    pub fn record(&mut self, ip: IpAddr) {
        match ip {
            IpAddr::V4(v4) => self.ipv4 = Some(v4),
            IpAddr::V6(v6) => self.ipv6 = Some(v6),
        }
    }

    /// The observed address for the given family
    pub fn get(&self, family: IpFamily) -> Option<IpAddr> {
        match family {
            IpFamily::V4 => self.ipv4.map(IpAddr::V4),
            IpFamily::V6 => self.ipv6.map(IpAddr::V6),
        }
    }

    /// Copy this run's observations into the state that will be persisted
    ///
    /// Both slots are copied, so a family that was not observed this run
    /// (disabled, typically) is stored as absent rather than keeping a
    /// stale value.
    pub fn apply_to(&self, state: &mut SyncState) {
        state.ipv4 = self.ipv4;
        state.ipv6 = self.ipv6;
    }
}

/// The outcome of one evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Whether the remote zone must be touched this run
    pub needs_update: bool,
    /// The exact desired record set; empty when no update is needed.
    ///
    /// When non-empty, holds two entries (`@` then `*`) per enabled family,
    /// A entries before AAAA entries.
    pub records: Vec<RecordSpec>,
}

/// Decide whether a sync is required and compute the target record set
///
/// `needs_update` is true iff `force` is set or any enabled family's
/// observed address differs from the last applied one. Disabled families
/// contribute nothing to either the decision or the target set; their
/// records in the remote zone are intentionally left unmanaged.
///
/// # Errors
///
/// [`Error::AddressUnavailable`] if a family is enabled but `observed`
/// carries no address for it.
pub fn evaluate(state: &SyncState, observed: &ObservedAddresses, force: bool) -> Result<SyncPlan> {
    let mut changed = force;
    let mut current: Vec<(IpFamily, IpAddr)> = Vec::new();

    for family in state.record_types.enabled_families() {
        let addr = observed
            .get(family)
            .ok_or(Error::AddressUnavailable { family })?;

        if state.last_observed(family) != Some(addr) {
            debug!(
                "{} address changed: {:?} -> {}",
                family,
                state.last_observed(family),
                addr
            );
            changed = true;
        }
        current.push((family, addr));
    }

    if !changed {
        return Ok(SyncPlan::default());
    }

    let mut records = Vec::with_capacity(current.len() * 2);
    for (family, addr) in current {
        for name in MANAGED_NAMES {
            records.push(RecordSpec {
                family,
                name: name.to_string(),
                value: addr,
                ttl: state.ttl,
            });
        }
    }

    Ok(SyncPlan {
        needs_update: true,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RecordTypes;

    fn v4_state(last: &str) -> SyncState {
        SyncState {
            ipv4: Some(last.parse().unwrap()),
            ttl: 1800,
            record_types: RecordTypes { a: true, aaaa: false },
            ..Default::default()
        }
    }

    fn observed_v4(addr: &str) -> ObservedAddresses {
        ObservedAddresses {
            ipv4: Some(addr.parse().unwrap()),
            ipv6: None,
        }
    }

    #[test]
    fn unchanged_address_needs_no_update() {
        // Scenario A: stored and observed agree, no force
        let plan = evaluate(&v4_state("1.2.3.4"), &observed_v4("1.2.3.4"), false).unwrap();
        assert!(!plan.needs_update);
        assert!(plan.records.is_empty());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let state = v4_state("1.2.3.4");
        let observed = observed_v4("1.2.3.4");
        for _ in 0..5 {
            let plan = evaluate(&state, &observed, false).unwrap();
            assert!(!plan.needs_update);
        }
    }

    #[test]
    fn changed_address_targets_apex_and_wildcard() {
        // Scenario B: A enabled, AAAA disabled, address moved
        let plan = evaluate(&v4_state("1.2.3.4"), &observed_v4("5.6.7.8"), false).unwrap();
        assert!(plan.needs_update);
        assert_eq!(plan.records.len(), 2);

        let value: IpAddr = "5.6.7.8".parse().unwrap();
        assert_eq!(plan.records[0].name, "@");
        assert_eq!(plan.records[1].name, "*");
        for record in &plan.records {
            assert_eq!(record.family, IpFamily::V4);
            assert_eq!(record.value, value);
            assert_eq!(record.ttl, 1800);
        }
    }

    #[test]
    fn force_recomputes_full_target() {
        // Scenario C: nothing changed but force is set
        let plan = evaluate(&v4_state("1.2.3.4"), &observed_v4("1.2.3.4"), true).unwrap();
        assert!(plan.needs_update);
        assert_eq!(plan.records.len(), 2);
        assert_eq!(plan.records[0].value, "1.2.3.4".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn dual_stack_target_is_complete() {
        let state = SyncState {
            ipv4: Some("1.2.3.4".parse().unwrap()),
            ipv6: Some("2001:db8::1".parse().unwrap()),
            ttl: 300,
            record_types: RecordTypes { a: true, aaaa: true },
            ..Default::default()
        };
        let observed = ObservedAddresses {
            ipv4: Some("5.6.7.8".parse().unwrap()),
            ipv6: Some("2001:db8::1".parse().unwrap()),
        };

        let plan = evaluate(&state, &observed, false).unwrap();
        assert!(plan.needs_update);
        // 2 entries per enabled family, A before AAAA
        assert_eq!(plan.records.len(), 4);
        assert_eq!(plan.records[0].family, IpFamily::V4);
        assert_eq!(plan.records[1].family, IpFamily::V4);
        assert_eq!(plan.records[2].family, IpFamily::V6);
        assert_eq!(plan.records[3].family, IpFamily::V6);
        assert_eq!(plan.records[2].name, "@");
        assert_eq!(plan.records[3].name, "*");
    }

    #[test]
    fn disabled_family_never_influences_the_plan() {
        // IPv6 disabled: a stored IPv6 value and a fresh observation for it
        // must affect neither the decision nor the target set.
        let state = SyncState {
            ipv4: Some("1.2.3.4".parse().unwrap()),
            ipv6: Some("2001:db8::1".parse().unwrap()),
            ttl: 1800,
            record_types: RecordTypes { a: true, aaaa: false },
            ..Default::default()
        };
        let observed = ObservedAddresses {
            ipv4: Some("1.2.3.4".parse().unwrap()),
            ipv6: Some("2001:db8::2".parse().unwrap()),
        };

        let plan = evaluate(&state, &observed, false).unwrap();
        assert!(!plan.needs_update);

        let forced = evaluate(&state, &observed, true).unwrap();
        assert!(forced.records.iter().all(|r| r.family == IpFamily::V4));
    }

    #[test]
    fn enabled_family_without_observation_is_fatal() {
        let state = SyncState {
            record_types: RecordTypes { a: true, aaaa: true },
            ..Default::default()
        };
        let observed = observed_v4("1.2.3.4"); // no IPv6

        let err = evaluate(&state, &observed, false).unwrap_err();
        assert!(matches!(
            err,
            Error::AddressUnavailable { family: IpFamily::V6 }
        ));
    }

    #[test]
    fn no_enabled_families_means_no_work() {
        let state = SyncState::default();
        let plan = evaluate(&state, &ObservedAddresses::default(), false).unwrap();
        assert!(!plan.needs_update);

        // Even forced, there is nothing to publish.
        let forced = evaluate(&state, &ObservedAddresses::default(), true).unwrap();
        assert!(forced.needs_update);
        assert!(forced.records.is_empty());
    }

    #[test]
    fn first_run_with_no_stored_address_triggers_update() {
        let state = SyncState {
            ttl: 1800,
            record_types: RecordTypes { a: true, aaaa: false },
            ..Default::default()
        };
        let plan = evaluate(&state, &observed_v4("1.2.3.4"), false).unwrap();
        assert!(plan.needs_update);
        assert_eq!(plan.records.len(), 2);
    }

    #[test]
    fn observed_addresses_record_by_family() {
        let mut observed = ObservedAddresses::default();
        observed.record("1.2.3.4".parse().unwrap());
        observed.record("2001:db8::1".parse().unwrap());

        assert_eq!(observed.ipv4, Some("1.2.3.4".parse().unwrap()));
        assert_eq!(observed.ipv6, Some("2001:db8::1".parse().unwrap()));
    }

    #[test]
    fn apply_to_overwrites_both_slots() {
        let mut state = SyncState {
            ipv4: Some("1.2.3.4".parse().unwrap()),
            ipv6: Some("2001:db8::1".parse().unwrap()),
            ..Default::default()
        };
        let observed = observed_v4("5.6.7.8");
        observed.apply_to(&mut state);

        assert_eq!(state.ipv4, Some("5.6.7.8".parse().unwrap()));
        assert_eq!(state.ipv6, None);
    }
}
