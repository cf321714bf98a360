//! Call surface of the native application core.
//!
//! The native core owns rendering, audio mixing and application logic. The
//! bridge only ever talks to it through [`NativeCore`]; implementations are
//! expected to handle their own cross-thread hand-off.

use std::path::PathBuf;

use crate::{
    input::{AxisId, KeyCode, PointerId, TouchPhase},
    slot::Slot,
};

/// Config key answered with a rotation code `"0"..="4"`.
pub const QUERY_SCREEN_ROTATION: &str = "screenRotation";

/// Config key answered with `"1"` when immersive mode is wanted.
pub const QUERY_IMMERSIVE_MODE: &str = "immersiveMode";

/// Reply message sent when the user confirms a text prompt.
pub const MESSAGE_INPUT_COMPLETED: &str = "inputbox_completed";

/// Reply message sent when the user cancels a text prompt.
pub const MESSAGE_INPUT_FAILED: &str = "inputbox_failed";

/// Bundle handed to the native core's one-time setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitConfig {
    /// Display density in dots per inch.
    pub dpi: u32,
    /// `"{manufacturer}:{model}"`.
    pub device_id: String,
    /// `"{language}_{country}"`, e.g. `"en_US"`.
    pub locale: String,
    /// Application bundle (APK or app package) path.
    pub bundle_path: PathBuf,
    /// Private data directory.
    pub data_dir: PathBuf,
    /// Shared external storage directory.
    pub external_storage_dir: PathBuf,
    /// Directory holding the native libraries.
    pub native_lib_dir: PathBuf,
    /// Launch shortcut parameter, empty when launched normally.
    pub shortcut_param: String,
    /// Stable per-install identifier.
    pub install_id: String,
    /// Use the low-latency native audio path instead of a host audio track.
    pub use_low_level_audio: bool,
}

/// Functions the bridge invokes on the native core.
pub trait NativeCore {
    /// One-time setup. Called at most once per process.
    fn init(&mut self, config: &InitConfig);

    /// Optimal audio buffering hints; zero means undetected.
    fn audio_config(&mut self, frames_per_buffer: u32, sample_rate: u32);

    /// Open the audio output.
    fn audio_init(&mut self);

    /// Close the audio output.
    fn audio_shutdown(&mut self);

    /// Application moved to the foreground.
    fn resume(&mut self);

    /// Application moved to the background.
    fn pause(&mut self);

    /// Final teardown of native resources.
    fn shutdown(&mut self);

    /// Key pressed on a slot.
    fn key_down(&mut self, slot: Slot, key: KeyCode);

    /// Key released on a slot.
    fn key_up(&mut self, slot: Slot, key: KeyCode);

    /// Touch sample in raw surface coordinates.
    fn touch(&mut self, x: f32, y: f32, phase: TouchPhase, pointer: PointerId);

    /// Joystick axis sample on a slot.
    fn joystick_axis(&mut self, slot: Slot, axis: AxisId, value: f32);

    /// Accelerometer sample.
    fn accelerometer(&mut self, x: f32, y: f32, z: f32);

    /// Scroll wheel.
    fn mouse_wheel(&mut self, x: f32, y: f32);

    /// String-keyed configuration query.
    fn query_config(&mut self, key: &str) -> String;

    /// Named message back into the native core.
    fn send_message(&mut self, name: &str, value: &str);
}
