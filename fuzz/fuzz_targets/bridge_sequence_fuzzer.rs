//! Fuzz target for the Bridge under arbitrary host event sequences
//!
//! Drives the real bridge against the recording doubles with lifecycle
//! callbacks, input, commands and prompt answers in any order.
//!
//! # Strategy
//!
//! - Lifecycle: create, resume, pause, destroy, config change in any order
//! - Input: keys from 0..4 devices, joystick axes, touch batches, sensors
//! - Commands: every recognized name plus unknown ones, arbitrary parameters
//! - Prompts: answers in any order, including after destroy
//! - Host: vibrator present or absent, display surface ready or not
//!
//! # Invariants
//!
//! - Only setup errors are fatal, and only with a broken host config
//! - Native init happens at most once
//! - No input reaches the native core before init or after teardown
//! - Audio focus acquires and releases balance
//! - Each prompt receives at most one reply

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tether_app::{Bridge, BridgeEvent};
use tether_core::{
    AxisId, InputDevice, KeyAction, KeyCode, LifecycleEvent, MotionAction, MotionEvent,
    PendingCommand, PointerId, TouchAction, TouchBatch, TouchPointer,
    native::{QUERY_IMMERSIVE_MODE, QUERY_SCREEN_ROTATION},
};
use tether_harness::{CallLog, InvariantRegistry, SimHost, SimNative, sim_config};

const COMMANDS: &[&str] = &[
    "launchBrowser",
    "launchEmail",
    "sharejpeg",
    "sharetext",
    "showTwitter",
    "toast",
    "showKeyboard",
    "hideKeyboard",
    "inputbox",
    "vibrate",
    "finish",
    "rotate",
    "immersive",
    "launchMarket",
];

#[derive(Debug, Arbitrary)]
struct Scenario {
    vibrator: bool,
    surface_ready: bool,
    rotation: u8,
    immersive: u8,
    ops: Vec<Op>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Create,
    Resume,
    Pause,
    Destroy,
    ConfigChanged,
    Key { device: Option<u8>, code: i16, down: bool },
    Axis { device: u8, axis: u8, value: f32 },
    Pointer { scroll: bool, x: f32, y: f32 },
    Touch { action: u8, index: u8, pointers: Vec<(u8, f32, f32)> },
    Accelerometer { x: f32, y: f32, z: f32 },
    Command { name: u8, parameter: String },
    Answer { confirm: Option<String> },
}

fuzz_target!(|scenario: Scenario| {
    let data_dir = std::env::temp_dir().join("tether-fuzz");
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let native = SimNative::new()
        .with_answer(QUERY_SCREEN_ROTATION, &scenario.rotation.to_string())
        .with_answer(QUERY_IMMERSIVE_MODE, &(scenario.immersive % 3).to_string());
    let host = SimHost::new(sim_config(&data_dir))
        .with_vibrator(scenario.vibrator)
        .with_surface(scenario.surface_ready);
    let mut bridge = Bridge::new(native, host);

    for op in scenario.ops {
        match op {
            Op::Answer { confirm } => {
                if let Some((_, responder)) = bridge.host_mut().take_prompt() {
                    match confirm {
                        Some(text) => responder.confirm(text),
                        None => responder.cancel(),
                    }
                }
            },
            op => {
                let Some(event) = event_for(op) else { continue };
                if let Err(error) = bridge.handle(event) {
                    assert!(!error.is_fatal(), "fatal error with a valid config: {error}");
                }
            },
        }
    }

    let registry = InvariantRegistry::standard();
    if let Err(violations) = registry.check_all(&CallLog::of(&bridge)) {
        panic!("invariant violations: {violations:?}");
    }
});

/// `None` for ops that are not host events.
fn event_for(op: Op) -> Option<BridgeEvent> {
    let event = match op {
        Op::Create => BridgeEvent::Lifecycle(LifecycleEvent::Create),
        Op::Resume => BridgeEvent::Lifecycle(LifecycleEvent::Resume),
        Op::Pause => BridgeEvent::Lifecycle(LifecycleEvent::Pause),
        Op::Destroy => BridgeEvent::Lifecycle(LifecycleEvent::Destroy),
        Op::ConfigChanged => BridgeEvent::Lifecycle(LifecycleEvent::ConfigurationChanged),
        Op::Key { device, code, down } => BridgeEvent::Key {
            device: device.map(|h| pad(u32::from(h % 4))),
            code: KeyCode(i32::from(code)),
            action: if down { KeyAction::Down } else { KeyAction::Up },
        },
        Op::Axis { device, axis, value } => BridgeEvent::Motion(MotionEvent::joystick(
            pad(u32::from(device % 4)),
            vec![(AxisId(i32::from(axis % 48)), value)],
        )),
        Op::Pointer { scroll, x, y } => {
            let action = if scroll { MotionAction::Scroll } else { MotionAction::HoverMove };
            BridgeEvent::Motion(MotionEvent::pointer(action, x, y))
        },
        Op::Touch { action, index, pointers } => {
            let action = match action % 6 {
                0 => TouchAction::Down,
                1 => TouchAction::PointerDown,
                2 => TouchAction::Up,
                3 => TouchAction::PointerUp,
                4 => TouchAction::Move,
                _ => TouchAction::Cancel,
            };
            let pointers: Vec<TouchPointer> = pointers
                .into_iter()
                .take(10)
                .map(|(id, x, y)| TouchPointer { id: PointerId(i32::from(id)), x, y })
                .collect();
            BridgeEvent::Touch(TouchBatch { action, action_index: usize::from(index), pointers })
        },
        Op::Accelerometer { x, y, z } => BridgeEvent::Accelerometer { x, y, z },
        Op::Command { name, parameter } => {
            let name = COMMANDS.get(name as usize).copied().unwrap_or("unknown");
            BridgeEvent::Command(PendingCommand::new(name, parameter))
        },
        Op::Answer { .. } => return None,
    };
    Some(event)
}

fn pad(handle: u32) -> InputDevice {
    InputDevice::new(handle, format!("fuzz-pad-{handle}"))
}
