//! Core state machines for the tether host bridge.
//!
//! Tether sits between a host application framework (process lifecycle,
//! window, raw input) and a native application core (rendering, audio,
//! logic). This crate holds the logic of that bridge with no I/O and no async
//! runtime, so the same code runs in production hosts and deterministic
//! tests.
//!
//! # Components
//!
//! - [`SlotResolver`]: stable per-device identity for two player slots
//! - [`InputRouter`]: key, motion and touch routing into [`NativeInput`] calls
//! - [`LifecycleCoordinator`]: create/resume/pause/destroy sequencing
//! - [`Command`]: the host command vocabulary issued by the native core
//! - [`PromptTracker`]: exactly-once settlement of text prompts
//! - [`NativeCore`]: the call surface of the native core
//! - [`InstallationId`]: persisted per-install identifier

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod command;
pub mod config;
pub mod error;
pub mod input;
pub mod install;
pub mod lifecycle;
pub mod native;
pub mod prompt;
pub mod query;
pub mod slot;

pub use command::{Command, HapticPattern, MailTemplate, PendingCommand, Vibration};
pub use config::{AudioHints, HostConfig};
pub use error::{LifecycleError, QueryError, SetupError};
pub use input::{
    AxisId, InputRouter, InputSource, KeyAction, KeyCode, KeyRouting, MotionAction, MotionEvent,
    MotionRouting, NativeInput, PointerId, TouchAction, TouchBatch, TouchPhase, TouchPointer,
};
pub use install::InstallationId;
pub use lifecycle::{LifecycleAction, LifecycleCoordinator, LifecycleEvent, LifecycleState};
pub use native::{InitConfig, NativeCore};
pub use prompt::{PromptId, PromptOutcome, PromptReply, PromptRequest, PromptState, PromptTracker};
pub use query::{Orientation, SystemUiFlags};
pub use slot::{DeviceHandle, InputDevice, Slot, SlotResolver};
