//! Bridge input events.
//!
//! This module defines [`BridgeEvent`], the tagged variant consumed by the
//! single queue on the UI-owning thread. Events originate from three
//! sources:
//! - Host callbacks (lifecycle, keys, motion, touch, sensors).
//! - Commands posted by the native core from its own thread.
//! - Prompt answers coming back from host dialogs.

use tether_core::{
    InputDevice, KeyAction, KeyCode, LifecycleEvent, MotionEvent, PendingCommand, PromptId,
    PromptOutcome, TouchBatch,
};

/// Events processed by the bridge, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// Host lifecycle callback.
    Lifecycle(LifecycleEvent),

    /// Key transition.
    Key {
        /// Originating device, if the host reported one.
        device: Option<InputDevice>,
        /// Host key code.
        code: KeyCode,
        /// Press or release.
        action: KeyAction,
    },

    /// Generic motion (joystick, hover, scroll).
    Motion(MotionEvent),

    /// Multi-touch batch.
    Touch(TouchBatch),

    /// Accelerometer sample.
    Accelerometer {
        /// X acceleration.
        x: f32,
        /// Y acceleration.
        y: f32,
        /// Z acceleration.
        z: f32,
    },

    /// Command posted by the native core.
    Command(PendingCommand),

    /// A host prompt was answered, cancelled or torn down.
    PromptSettled {
        /// Prompt that settled.
        id: PromptId,
        /// How it settled.
        outcome: PromptOutcome,
    },
}
