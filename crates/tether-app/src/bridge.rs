//! Host-to-native translation layer.
//!
//! The [`Bridge`] owns every piece of UI-thread state (slot bindings,
//! lifecycle, prompt tracking, display policy) together with the two
//! collaborators, and turns each [`BridgeEvent`] into calls on them.
//!
//! # Responsibilities
//!
//! - Executes [`LifecycleAction`]s produced by the lifecycle coordinator.
//! - Delivers routed input to the native core, gated on lifecycle state.
//! - Dispatches native-issued commands to the host.
//! - Sends prompt answers back to the native core exactly once.

use tether_core::{
    Command, InputDevice, InputRouter, InstallationId, KeyAction, KeyCode, LifecycleAction,
    LifecycleCoordinator, LifecycleEvent, LifecycleState, MailTemplate, MotionEvent,
    MotionRouting, NativeCore, PendingCommand, PromptId, PromptOutcome, PromptState, SetupError,
    SlotResolver, TouchBatch,
};

use crate::{
    BridgeError, BridgeEvent, CommandDispatcher, DisplayPolicy, DisplayRefresh, Host,
    SystemUiPolicy,
    queue::{EventSender, WeakEventSender},
};

/// Bridge between a host framework and a native core.
///
/// Generic over both collaborators so production hosts and simulation
/// doubles share the same sequencing.
pub struct Bridge<N: NativeCore, H: Host> {
    native: N,
    host: H,
    router: InputRouter,
    lifecycle: LifecycleCoordinator,
    dispatcher: CommandDispatcher,
    display: DisplayPolicy,
    replies: Option<WeakEventSender>,
}

impl<N: NativeCore, H: Host> Bridge<N, H> {
    /// Bridge with the default system UI policy.
    pub fn new(native: N, host: H) -> Self {
        Self::with_policy(native, host, SystemUiPolicy::default())
    }

    /// Bridge with an explicit system UI policy.
    pub fn with_policy(native: N, host: H, policy: SystemUiPolicy) -> Self {
        Self {
            native,
            host,
            router: InputRouter::new(),
            lifecycle: LifecycleCoordinator::new(),
            dispatcher: CommandDispatcher::new(),
            display: DisplayPolicy::new(policy),
            replies: None,
        }
    }

    /// Message composed by the `launchEmail` command.
    #[must_use]
    pub fn with_mail_template(mut self, mail: MailTemplate) -> Self {
        self.dispatcher.set_mail_template(mail);
        self
    }

    /// Route prompt answers into `sender`'s queue. Without this, answers to
    /// prompts opened by `inputbox` are lost and the prompts stay pending.
    pub fn attach(&mut self, sender: &EventSender) {
        self.replies = Some(sender.downgrade());
    }

    /// Process one event. Returns `true` if it was handled.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Setup`] if native setup failed; fatal.
    /// - [`BridgeError::Lifecycle`] if a lifecycle event was rejected.
    pub fn handle(&mut self, event: BridgeEvent) -> Result<bool, BridgeError> {
        match event {
            BridgeEvent::Lifecycle(event) => self.lifecycle(event).map(|()| true),
            BridgeEvent::Key { device, code, action } => Ok(self.key(device.as_ref(), code, action)),
            BridgeEvent::Motion(event) => Ok(self.motion(&event)),
            BridgeEvent::Touch(batch) => Ok(self.touch(&batch)),
            BridgeEvent::Accelerometer { x, y, z } => Ok(self.accelerometer(x, y, z)),
            BridgeEvent::Command(PendingCommand { name, parameter }) => {
                Ok(self.dispatch(&name, &parameter))
            },
            BridgeEvent::PromptSettled { id, outcome } => {
                self.settle_prompt(id, outcome);
                Ok(true)
            },
        }
    }

    /// Run a lifecycle callback to completion.
    ///
    /// A failed native setup leaves the bridge destroyed: the remaining
    /// actions are skipped and every later event is rejected.
    ///
    /// # Errors
    ///
    /// See [`Self::handle`].
    pub fn lifecycle(&mut self, event: LifecycleEvent) -> Result<(), BridgeError> {
        let actions = self.lifecycle.handle(event)?;
        for action in actions {
            if let Err(error) = self.execute(action) {
                self.lifecycle.setup_failed();
                return Err(error.into());
            }
        }
        Ok(())
    }

    /// Key transition. `false` means the host must run its default handling.
    pub fn key(&mut self, device: Option<&InputDevice>, code: KeyCode, action: KeyAction) -> bool {
        if !self.lifecycle.accepts_input() {
            tracing::debug!(?code, state = ?self.lifecycle.state(), "dropping key");
            return false;
        }
        let routing = self.router.route_key(device, code, action);
        routing.input.deliver(&mut self.native);
        routing.handled()
    }

    /// Generic motion event. `false` means unhandled.
    pub fn motion(&mut self, event: &MotionEvent) -> bool {
        if !self.lifecycle.accepts_input() {
            tracing::debug!(state = ?self.lifecycle.state(), "dropping motion");
            return false;
        }
        match self.router.route_motion(event) {
            MotionRouting::Forwarded(inputs) => {
                for input in &inputs {
                    input.deliver(&mut self.native);
                }
                true
            },
            MotionRouting::Unhandled => false,
        }
    }

    /// Multi-touch batch. Always consumed once the native core is up.
    pub fn touch(&mut self, batch: &TouchBatch) -> bool {
        if !self.lifecycle.accepts_input() {
            tracing::debug!(state = ?self.lifecycle.state(), "dropping touch");
            return false;
        }
        for input in self.router.route_touch(batch) {
            input.deliver(&mut self.native);
        }
        true
    }

    /// Accelerometer sample. Forwarded only while sensors are registered.
    pub fn accelerometer(&mut self, x: f32, y: f32, z: f32) -> bool {
        if !self.lifecycle.sensors_active() {
            return false;
        }
        self.router.route_accelerometer(x, y, z).deliver(&mut self.native);
        true
    }

    /// Run a native-issued command. `false` for names outside the vocabulary
    /// and for commands arriving before setup or after destroy.
    pub fn dispatch(&mut self, name: &str, parameter: &str) -> bool {
        if !self.lifecycle.accepts_input() {
            tracing::debug!(name, state = ?self.lifecycle.state(), "dropping command");
            return false;
        }
        let Some(command) = Command::parse(name, parameter) else {
            tracing::debug!(name, "unhandled command");
            return false;
        };

        let replies = self.replies.as_ref().and_then(WeakEventSender::upgrade);
        match self.dispatcher.dispatch(command, &mut self.host, replies) {
            Some(DisplayRefresh::Orientation) => {
                self.display.refresh_orientation(&mut self.native, &mut self.host);
            },
            Some(DisplayRefresh::SystemUi) => {
                self.display.refresh_system_ui(&mut self.native, &mut self.host);
            },
            None => {},
        }
        true
    }

    /// Settle a prompt and reply to the native core when required.
    pub fn settle_prompt(&mut self, id: PromptId, outcome: PromptOutcome) {
        let Some(reply) = self.dispatcher.settle(id, outcome) else {
            return;
        };
        if self.lifecycle.state() == LifecycleState::Destroyed {
            tracing::debug!(?id, name = reply.name, "native core gone, dropping reply");
            return;
        }
        self.native.send_message(reply.name, &reply.value);
    }

    /// Current lifecycle state.
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// State of a prompt.
    pub fn prompt_state(&self, id: PromptId) -> Option<PromptState> {
        self.dispatcher.prompt_state(id)
    }

    /// Prompts still waiting for the user.
    pub fn pending_prompts(&self) -> usize {
        self.dispatcher.pending_prompts()
    }

    /// Device-to-slot bindings.
    pub fn slots(&self) -> &SlotResolver {
        self.router.resolver()
    }

    /// Display state applied so far.
    pub fn display(&self) -> &DisplayPolicy {
        &self.display
    }

    /// The native core.
    pub fn native(&self) -> &N {
        &self.native
    }

    /// The native core, mutably.
    pub fn native_mut(&mut self) -> &mut N {
        &mut self.native
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn execute(&mut self, action: LifecycleAction) -> Result<(), SetupError> {
        match action {
            LifecycleAction::InitializeNative => self.initialize_native()?,
            LifecycleAction::AudioInit => self.native.audio_init(),
            LifecycleAction::AcquireAudioFocus => self.host.acquire_audio_focus(),
            LifecycleAction::ReleaseAudioFocus => self.host.release_audio_focus(),
            LifecycleAction::ResumeNative => self.native.resume(),
            LifecycleAction::PauseNative => self.native.pause(),
            LifecycleAction::RegisterSensors => self.host.register_sensors(),
            LifecycleAction::UnregisterSensors => self.host.unregister_sensors(),
            LifecycleAction::RefreshOrientation => {
                self.display.refresh_orientation(&mut self.native, &mut self.host);
            },
            LifecycleAction::RefreshSystemUi => {
                self.display.refresh_system_ui(&mut self.native, &mut self.host);
            },
            LifecycleAction::TeardownNative => {
                self.native.audio_shutdown();
                self.native.shutdown();
            },
            LifecycleAction::ReleaseHostResources => self.host.release_resources(),
        }
        Ok(())
    }

    fn initialize_native(&mut self) -> Result<(), SetupError> {
        let config =
            self.host.config().map_err(|error| SetupError::HostUnavailable(error.to_string()))?;
        let install_id = InstallationId::load_or_create(&config.data_dir);
        let audio = config.audio;
        let init = config.into_init_config(install_id.as_str())?;

        self.native.audio_config(audio.frames_per_buffer, audio.sample_rate);
        self.native.init(&init);
        tracing::info!(
            device = %init.device_id,
            locale = %init.locale,
            dpi = init.dpi,
            install = %install_id,
            "native core initialized"
        );
        Ok(())
    }
}
