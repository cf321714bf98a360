//! Recording host.
//!
//! `SimHost` implements [`Host`] for deterministic tests and the headless
//! simulator. Every call is appended to a log; behavior that real hosts vary
//! on (vibrator hardware, config failures, surface readiness, URIs nothing
//! can open) is configurable. Prompts are parked until the test answers them.

use std::{collections::VecDeque, path::Path, time::Duration};

use tether_app::{Host, HostError, PromptResponder, ShareContent};
use tether_core::{
    AudioHints, HapticPattern, HostConfig, Orientation, PromptRequest, SystemUiFlags,
};

/// One call received by [`SimHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// `config`.
    Config,
    /// `acquire_audio_focus`.
    AcquireAudioFocus,
    /// `release_audio_focus`.
    ReleaseAudioFocus,
    /// `register_sensors`.
    RegisterSensors,
    /// `unregister_sensors`.
    UnregisterSensors,
    /// `set_orientation`.
    SetOrientation(Orientation),
    /// `set_system_ui`, recorded whether or not it succeeded.
    SetSystemUi(SystemUiFlags),
    /// `release_resources`.
    ReleaseResources,
    /// `open_uri`, recorded whether or not it succeeded.
    OpenUri(String),
    /// `compose_email`.
    ComposeEmail(String),
    /// `share`.
    Share {
        /// MIME type.
        mime: String,
        /// Payload.
        content: ShareContent,
    },
    /// `toast`.
    Toast(String),
    /// `set_keyboard_visible`.
    Keyboard(bool),
    /// `show_prompt`.
    ShowPrompt(PromptRequest),
    /// `vibrate`.
    Vibrate(Duration),
    /// `haptic`.
    Haptic(HapticPattern),
    /// `finish`.
    Finish,
}

/// Host double that records calls.
#[derive(Debug)]
pub struct SimHost {
    calls: Vec<HostCall>,
    config: Result<HostConfig, HostError>,
    vibrator: bool,
    vibrator_probes: usize,
    surface_ready: bool,
    unopenable: Vec<String>,
    prompts: VecDeque<(PromptRequest, PromptResponder)>,
}

impl SimHost {
    /// Host reporting `config`, with a vibrator and a ready surface.
    pub fn new(config: HostConfig) -> Self {
        Self {
            calls: Vec::new(),
            config: Ok(config),
            vibrator: true,
            vibrator_probes: 0,
            surface_ready: true,
            unopenable: Vec::new(),
            prompts: VecDeque::new(),
        }
    }

    /// Host whose `config` call fails.
    pub fn failing(error: HostError) -> Self {
        let mut host = Self::new(HostConfig::default());
        host.config = Err(error);
        host
    }

    /// Set vibrator presence.
    #[must_use]
    pub fn with_vibrator(mut self, present: bool) -> Self {
        self.vibrator = present;
        self
    }

    /// Set whether `set_system_ui` succeeds.
    #[must_use]
    pub fn with_surface(mut self, ready: bool) -> Self {
        self.surface_ready = ready;
        self
    }

    /// Make `open_uri` fail for URIs starting with `prefix`.
    #[must_use]
    pub fn without_handler(mut self, prefix: &str) -> Self {
        self.unopenable.push(prefix.to_owned());
        self
    }

    /// Calls received so far.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// How many times vibrator presence was asked for.
    pub fn vibrator_probes(&self) -> usize {
        self.vibrator_probes
    }

    /// Oldest prompt still waiting for an answer.
    pub fn take_prompt(&mut self) -> Option<(PromptRequest, PromptResponder)> {
        self.prompts.pop_front()
    }

    /// Prompts waiting for an answer.
    pub fn open_prompts(&self) -> usize {
        self.prompts.len()
    }

    fn record(&mut self, call: HostCall) {
        tracing::info!(?call, "host");
        self.calls.push(call);
    }
}

impl Host for SimHost {
    fn config(&mut self) -> Result<HostConfig, HostError> {
        self.record(HostCall::Config);
        self.config.clone()
    }

    fn acquire_audio_focus(&mut self) {
        self.record(HostCall::AcquireAudioFocus);
    }

    fn release_audio_focus(&mut self) {
        self.record(HostCall::ReleaseAudioFocus);
    }

    fn register_sensors(&mut self) {
        self.record(HostCall::RegisterSensors);
    }

    fn unregister_sensors(&mut self) {
        self.record(HostCall::UnregisterSensors);
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.record(HostCall::SetOrientation(orientation));
    }

    fn set_system_ui(&mut self, flags: SystemUiFlags) -> Result<(), HostError> {
        self.record(HostCall::SetSystemUi(flags));
        if self.surface_ready {
            Ok(())
        } else {
            Err(HostError::Unavailable("surface".to_owned()))
        }
    }

    fn release_resources(&mut self) {
        self.record(HostCall::ReleaseResources);
        // The UI is gone; parked prompts are torn down unanswered.
        self.prompts.clear();
    }

    fn open_uri(&mut self, uri: &str) -> Result<(), HostError> {
        self.record(HostCall::OpenUri(uri.to_owned()));
        if self.unopenable.iter().any(|prefix| uri.starts_with(prefix.as_str())) {
            return Err(HostError::ActionFailed {
                action: "open_uri",
                reason: format!("no handler for {uri}"),
            });
        }
        Ok(())
    }

    fn compose_email(&mut self, mailto: &str) -> Result<(), HostError> {
        self.record(HostCall::ComposeEmail(mailto.to_owned()));
        Ok(())
    }

    fn share(&mut self, mime: &str, content: ShareContent) -> Result<(), HostError> {
        self.record(HostCall::Share { mime: mime.to_owned(), content });
        Ok(())
    }

    fn toast(&mut self, message: &str) {
        self.record(HostCall::Toast(message.to_owned()));
    }

    fn set_keyboard_visible(&mut self, visible: bool) {
        self.record(HostCall::Keyboard(visible));
    }

    fn show_prompt(&mut self, request: PromptRequest, responder: PromptResponder) {
        self.record(HostCall::ShowPrompt(request.clone()));
        self.prompts.push_back((request, responder));
    }

    fn has_vibrator(&mut self) -> bool {
        self.vibrator_probes += 1;
        self.vibrator
    }

    fn vibrate(&mut self, duration: Duration) {
        self.record(HostCall::Vibrate(duration));
    }

    fn haptic(&mut self, pattern: HapticPattern) {
        self.record(HostCall::Haptic(pattern));
    }

    fn finish(&mut self) {
        self.record(HostCall::Finish);
    }
}

/// Complete host config rooted at `data_dir`.
pub fn sim_config(data_dir: &Path) -> HostConfig {
    HostConfig {
        dpi: 240,
        manufacturer: "Tether".to_owned(),
        model: "Sim".to_owned(),
        language: "en".to_owned(),
        country: "US".to_owned(),
        bundle_path: Some(data_dir.join("app.bundle")),
        data_dir: data_dir.to_path_buf(),
        external_storage_dir: data_dir.join("external"),
        native_lib_dir: None,
        shortcut_param: None,
        audio: AudioHints { frames_per_buffer: 256, sample_rate: 48_000 },
        use_low_level_audio: false,
    }
}
