//! Property-based tests for device slot resolution.

use std::collections::HashMap;

use proptest::prelude::*;
use tether_core::{DeviceHandle, InputDevice, InputRouter, KeyAction, KeyCode, NativeInput, Slot, SlotResolver};

fn device(id: u32) -> InputDevice {
    InputDevice::new(id, format!("pad-{id}"))
}

/// Property: the first three distinct devices map to Primary, Secondary, Primary
#[test]
fn prop_three_distinct_devices() {
    proptest!(|(ids in prop::collection::hash_set(any::<u32>(), 3))| {
        let ids: Vec<u32> = ids.into_iter().collect();
        let mut resolver = SlotResolver::new();

        let slots: Vec<_> = ids.iter().map(|id| resolver.resolve(Some(&device(*id)))).collect();

        prop_assert_eq!(slots, vec![Some(Slot::Primary), Some(Slot::Secondary), Some(Slot::Primary)]);
        prop_assert_eq!(resolver.lookup(DeviceHandle(ids[2])), None);
    });
}

/// Property: once bound, a device keeps its slot no matter what connects later
#[test]
fn prop_bindings_are_stable() {
    proptest!(|(sequence in prop::collection::vec(0u32..8, 1..64))| {
        let mut resolver = SlotResolver::new();
        let mut first_seen: HashMap<u32, Slot> = HashMap::new();

        for id in sequence {
            let slot = resolver.resolve(Some(&device(id)));
            prop_assert!(slot.is_some());
            let Some(slot) = slot else { continue };

            if let Some(bound) = resolver.lookup(DeviceHandle(id)) {
                let expected = *first_seen.entry(id).or_insert(bound);
                prop_assert_eq!(slot, expected);
            } else {
                prop_assert_eq!(slot, Slot::Primary);
            }
        }

        prop_assert!(resolver.len() <= 2);
    });
}

/// Property: resolving the same device twice yields the same slot
#[test]
fn prop_resolve_is_idempotent() {
    proptest!(|(warmup in prop::collection::vec(any::<u32>(), 0..4), id in any::<u32>())| {
        let mut resolver = SlotResolver::new();
        for other in warmup {
            let _ = resolver.resolve(Some(&device(other)));
        }

        let first = resolver.resolve(Some(&device(id)));
        let second = resolver.resolve(Some(&device(id)));
        prop_assert_eq!(first, second);
    });
}

/// Property: keys without a device always land on the primary slot, and
/// pass-through keys are flagged regardless of slot
#[test]
fn prop_key_routing() {
    proptest!(|(
        devices in prop::collection::vec(proptest::option::of(0u32..5), 1..32),
        code in prop_oneof![Just(4), Just(24), Just(25), Just(164), Just(82), 0i32..300],
    )| {
        let mut router = InputRouter::new();
        let code = KeyCode(code);

        for id in devices {
            let routing = router.route_key(id.map(device).as_ref(), code, KeyAction::Down);
            prop_assert_eq!(routing.pass_through, code.is_pass_through());

            if id.is_none() {
                let is_primary = matches!(routing.input, NativeInput::Key { slot: Slot::Primary, .. });
                prop_assert!(is_primary);
            }
        }
    });
}
