//! Property-based tests for the lifecycle state machine.

use proptest::prelude::*;
use tether_core::{LifecycleAction, LifecycleCoordinator, LifecycleEvent, LifecycleState};

fn event_strategy() -> impl Strategy<Value = LifecycleEvent> {
    prop_oneof![
        2 => Just(LifecycleEvent::Create),
        3 => Just(LifecycleEvent::Resume),
        3 => Just(LifecycleEvent::Pause),
        1 => Just(LifecycleEvent::Destroy),
        1 => Just(LifecycleEvent::ConfigurationChanged),
    ]
}

/// Property: native setup runs at most once, whatever the host does
#[test]
fn prop_initialize_at_most_once() {
    proptest!(|(events in prop::collection::vec(event_strategy(), 0..64))| {
        let mut lc = LifecycleCoordinator::new();
        let mut inits = 0;
        let mut teardowns = 0;

        for event in events {
            if let Ok(actions) = lc.handle(event) {
                inits += actions.iter().filter(|a| **a == LifecycleAction::InitializeNative).count();
                teardowns += actions.iter().filter(|a| **a == LifecycleAction::TeardownNative).count();
            }
        }

        prop_assert!(inits <= 1);
        prop_assert!(teardowns <= inits);
    });
}

/// Property: nothing leaves Destroyed
#[test]
fn prop_destroyed_is_terminal() {
    proptest!(|(
        before in prop::collection::vec(event_strategy(), 0..16),
        after in prop::collection::vec(event_strategy(), 1..16),
    )| {
        let mut lc = LifecycleCoordinator::new();
        for event in before {
            let _ = lc.handle(event);
        }
        let _ = lc.handle(LifecycleEvent::Destroy);

        for event in after {
            prop_assert!(lc.handle(event).is_err());
            prop_assert_eq!(lc.state(), LifecycleState::Destroyed);
        }
    });
}

/// Property: audio focus is never released unless held
#[test]
fn prop_no_release_without_acquire() {
    proptest!(|(events in prop::collection::vec(event_strategy(), 0..64))| {
        let mut lc = LifecycleCoordinator::new();
        let mut held = false;

        for event in events {
            let Ok(actions) = lc.handle(event) else { continue };
            for action in actions {
                match action {
                    LifecycleAction::AcquireAudioFocus => held = true,
                    LifecycleAction::ReleaseAudioFocus => {
                        prop_assert!(held);
                        held = false;
                    },
                    _ => {},
                }
            }
        }
    });
}

/// Property: sensors are registered exactly while resumed
#[test]
fn prop_sensors_track_resumed_state() {
    proptest!(|(events in prop::collection::vec(event_strategy(), 0..64))| {
        let mut lc = LifecycleCoordinator::new();
        let mut registered = false;

        for event in events {
            let Ok(actions) = lc.handle(event) else { continue };
            for action in actions {
                match action {
                    LifecycleAction::RegisterSensors => registered = true,
                    LifecycleAction::UnregisterSensors => registered = false,
                    _ => {},
                }
            }
            prop_assert_eq!(registered, lc.sensors_active());
        }
    });
}
