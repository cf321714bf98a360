//! Recording native core.
//!
//! `SimNative` implements [`NativeCore`] by appending every call to a log.
//! Config queries are answered from a scripted map; unknown keys answer with
//! an empty string, like a core that never set them.

use std::collections::HashMap;

use tether_core::{AxisId, InitConfig, KeyCode, NativeCore, PointerId, Slot, TouchPhase};

/// One call received by [`SimNative`].
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
    /// `init`.
    Init(InitConfig),
    /// `audio_config`.
    AudioConfig {
        /// Frames per buffer.
        frames_per_buffer: u32,
        /// Sample rate.
        sample_rate: u32,
    },
    /// `audio_init`.
    AudioInit,
    /// `audio_shutdown`.
    AudioShutdown,
    /// `resume`.
    Resume,
    /// `pause`.
    Pause,
    /// `shutdown`.
    Shutdown,
    /// `key_down`.
    KeyDown {
        /// Slot.
        slot: Slot,
        /// Key.
        key: KeyCode,
    },
    /// `key_up`.
    KeyUp {
        /// Slot.
        slot: Slot,
        /// Key.
        key: KeyCode,
    },
    /// `touch`.
    Touch {
        /// X.
        x: f32,
        /// Y.
        y: f32,
        /// Phase.
        phase: TouchPhase,
        /// Pointer.
        pointer: PointerId,
    },
    /// `joystick_axis`.
    JoystickAxis {
        /// Slot.
        slot: Slot,
        /// Axis.
        axis: AxisId,
        /// Value.
        value: f32,
    },
    /// `accelerometer`.
    Accelerometer {
        /// X.
        x: f32,
        /// Y.
        y: f32,
        /// Z.
        z: f32,
    },
    /// `mouse_wheel`.
    MouseWheel {
        /// X.
        x: f32,
        /// Y.
        y: f32,
    },
    /// `query_config`.
    Query(String),
    /// `send_message`.
    Message {
        /// Name.
        name: String,
        /// Value.
        value: String,
    },
}

impl NativeCall {
    /// Input delivery, as opposed to lifecycle or config traffic.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::KeyDown { .. }
                | Self::KeyUp { .. }
                | Self::Touch { .. }
                | Self::JoystickAxis { .. }
                | Self::Accelerometer { .. }
                | Self::MouseWheel { .. }
        )
    }
}

/// Native core double that records calls.
#[derive(Debug, Clone, Default)]
pub struct SimNative {
    calls: Vec<NativeCall>,
    answers: HashMap<String, String>,
}

impl SimNative {
    /// Core with no scripted answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the answer for a config key.
    #[must_use]
    pub fn with_answer(mut self, key: &str, value: &str) -> Self {
        self.set_answer(key, value);
        self
    }

    /// Change the answer for a config key.
    pub fn set_answer(&mut self, key: &str, value: &str) {
        self.answers.insert(key.to_owned(), value.to_owned());
    }

    /// Calls received so far.
    pub fn calls(&self) -> &[NativeCall] {
        &self.calls
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<NativeCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&NativeCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Messages sent back into the core, in order.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                NativeCall::Message { name, value } => Some((name.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    /// Setup bundle, if `init` ran.
    pub fn init_config(&self) -> Option<&InitConfig> {
        self.calls.iter().find_map(|call| match call {
            NativeCall::Init(config) => Some(config),
            _ => None,
        })
    }

    fn record(&mut self, call: NativeCall) {
        tracing::info!(?call, "native");
        self.calls.push(call);
    }
}

impl NativeCore for SimNative {
    fn init(&mut self, config: &InitConfig) {
        self.record(NativeCall::Init(config.clone()));
    }

    fn audio_config(&mut self, frames_per_buffer: u32, sample_rate: u32) {
        self.record(NativeCall::AudioConfig { frames_per_buffer, sample_rate });
    }

    fn audio_init(&mut self) {
        self.record(NativeCall::AudioInit);
    }

    fn audio_shutdown(&mut self) {
        self.record(NativeCall::AudioShutdown);
    }

    fn resume(&mut self) {
        self.record(NativeCall::Resume);
    }

    fn pause(&mut self) {
        self.record(NativeCall::Pause);
    }

    fn shutdown(&mut self) {
        self.record(NativeCall::Shutdown);
    }

    fn key_down(&mut self, slot: Slot, key: KeyCode) {
        self.record(NativeCall::KeyDown { slot, key });
    }

    fn key_up(&mut self, slot: Slot, key: KeyCode) {
        self.record(NativeCall::KeyUp { slot, key });
    }

    fn touch(&mut self, x: f32, y: f32, phase: TouchPhase, pointer: PointerId) {
        self.record(NativeCall::Touch { x, y, phase, pointer });
    }

    fn joystick_axis(&mut self, slot: Slot, axis: AxisId, value: f32) {
        self.record(NativeCall::JoystickAxis { slot, axis, value });
    }

    fn accelerometer(&mut self, x: f32, y: f32, z: f32) {
        self.record(NativeCall::Accelerometer { x, y, z });
    }

    fn mouse_wheel(&mut self, x: f32, y: f32) {
        self.record(NativeCall::MouseWheel { x, y });
    }

    fn query_config(&mut self, key: &str) -> String {
        self.record(NativeCall::Query(key.to_owned()));
        self.answers.get(key).cloned().unwrap_or_default()
    }

    fn send_message(&mut self, name: &str, value: &str) {
        self.record(NativeCall::Message { name: name.to_owned(), value: value.to_owned() });
    }
}
