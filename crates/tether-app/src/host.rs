//! Host trait for abstracting the application framework.
//!
//! The [`Host`] trait decouples the bridge from a specific host framework.
//! Each platform implements it to provide window, audio-focus, sensor and
//! UI-action plumbing, while the generic [`crate::Bridge`] handles all
//! sequencing and routing.
//!
//! # Implementations
//!
//! - **Mobile activity**: the platform activity and its surface view
//! - **Simulation**: `tether-harness` records every call for assertions

use std::time::Duration;

use tether_core::{HapticPattern, HostConfig, Orientation, PromptRequest, SystemUiFlags};
use thiserror::Error;

use crate::queue::PromptResponder;

/// Errors reported by a host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// A service or capability is not available on this host.
    #[error("host service unavailable: {0}")]
    Unavailable(String),

    /// A UI action could not be carried out.
    #[error("{action} failed: {reason}")]
    ActionFailed {
        /// Action attempted.
        action: &'static str,
        /// Host-provided reason.
        reason: String,
    },
}

/// Payload shared through the host share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareContent {
    /// Inline text.
    Text(String),
    /// A stream addressed by URI.
    Stream(String),
}

/// Platform services used by the bridge. All methods run on the UI thread.
pub trait Host {
    /// Report display metrics, storage paths, locale and device identity.
    ///
    /// # Errors
    ///
    /// Any error here aborts startup.
    fn config(&mut self) -> Result<HostConfig, HostError>;

    /// Take audio focus for playback.
    fn acquire_audio_focus(&mut self);

    /// Give audio focus back.
    fn release_audio_focus(&mut self);

    /// Start delivering motion-sensor samples.
    fn register_sensors(&mut self);

    /// Stop delivering motion-sensor samples.
    fn unregister_sensors(&mut self);

    /// Request a window orientation.
    fn set_orientation(&mut self, orientation: Orientation);

    /// Apply system UI visibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface does not exist yet.
    fn set_system_ui(&mut self, flags: SystemUiFlags) -> Result<(), HostError>;

    /// Release the surface and audio device. Called once, on destroy.
    fn release_resources(&mut self);

    /// Open a URI with whatever the host registers for it.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing can handle the URI.
    fn open_uri(&mut self, uri: &str) -> Result<(), HostError>;

    /// Open a mail composer for a `mailto:` URI.
    fn compose_email(&mut self, mailto: &str) -> Result<(), HostError>;

    /// Share content of the given MIME type.
    fn share(&mut self, mime: &str, content: ShareContent) -> Result<(), HostError>;

    /// Show a short toast.
    fn toast(&mut self, message: &str);

    /// Show or hide the on-screen keyboard.
    fn set_keyboard_visible(&mut self, visible: bool);

    /// Show a modal text prompt. Must return without waiting for the user;
    /// the answer goes through `responder`.
    fn show_prompt(&mut self, request: PromptRequest, responder: PromptResponder);

    /// Whether vibration hardware exists.
    fn has_vibrator(&mut self) -> bool;

    /// Raw vibration.
    fn vibrate(&mut self, duration: Duration);

    /// Host-native haptic feedback.
    fn haptic(&mut self, pattern: HapticPattern);

    /// Finish the application.
    fn finish(&mut self);
}
