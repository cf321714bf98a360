//! Lifecycle coordination.
//!
//! Sequences host lifecycle callbacks against native-core setup and teardown.
//! Pure state machine: [`LifecycleCoordinator::handle`] consumes a
//! [`LifecycleEvent`] and returns the [`LifecycleAction`]s the bridge must
//! execute, in order.
//!
//! # State Machine
//!
//! ```text
//! ┌─────────┐ Create ┌─────────────┐ Resume ┌─────────┐
//! │ Created │───────>│ Initialized │───────>│ Resumed │<──┐
//! └─────────┘        └─────────────┘        └─────────┘   │ Resume
//!      │                    │ Pause              │ Pause  │
//!      │                    ↓                    ↓        │
//!      │               ┌────────┐<───────────────┘        │
//!      │               │ Paused │─────────────────────────┘
//!      │               └────────┘
//!      │ Destroy            │ Destroy (from any live state)
//!      ↓                    ↓
//! ┌───────────────────────────┐
//! │         Destroyed         │  terminal
//! └───────────────────────────┘
//! ```
//!
//! Initialized is entered at most once per process. Re-initializing native
//! resources on host re-entry would leak or corrupt them, so a repeated
//! Create is absorbed.

use crate::error::LifecycleError;

/// Process-wide lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Process started, native core not set up.
    Created,
    /// Native core set up, not yet in the foreground.
    Initialized,
    /// In the foreground.
    Resumed,
    /// In the background.
    Paused,
    /// Torn down. Terminal.
    Destroyed,
}

/// Host lifecycle callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Host created the application window.
    Create,
    /// Host brought the application to the foreground.
    Resume,
    /// Host moved the application to the background.
    Pause,
    /// Host is destroying the application.
    Destroy,
    /// Host display configuration changed (size, density, UI mode).
    ConfigurationChanged,
}

impl LifecycleEvent {
    fn name(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Resume => "resume",
            Self::Pause => "pause",
            Self::Destroy => "destroy",
            Self::ConfigurationChanged => "configuration-changed",
        }
    }
}

/// Step the bridge executes in response to a lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleAction {
    /// Gather host config and run the native one-time setup.
    InitializeNative,
    /// Open native audio output.
    AudioInit,
    /// Take host audio focus.
    AcquireAudioFocus,
    /// Give host audio focus back.
    ReleaseAudioFocus,
    /// Forward resume to the native core.
    ResumeNative,
    /// Forward pause to the native core.
    PauseNative,
    /// Start motion-sensor delivery.
    RegisterSensors,
    /// Stop motion-sensor delivery.
    UnregisterSensors,
    /// Query the native core for orientation and apply it.
    RefreshOrientation,
    /// Query the native core for immersive mode and apply it.
    RefreshSystemUi,
    /// Shut down native audio and the native core.
    TeardownNative,
    /// Release the host surface and audio device.
    ReleaseHostResources,
}

const CREATE_ACTIONS: [LifecycleAction; 5] = [
    LifecycleAction::InitializeNative,
    LifecycleAction::RefreshOrientation,
    LifecycleAction::AudioInit,
    LifecycleAction::AcquireAudioFocus,
    LifecycleAction::RefreshSystemUi,
];

const RESUME_ACTIONS: [LifecycleAction; 5] = [
    LifecycleAction::AcquireAudioFocus,
    LifecycleAction::ResumeNative,
    LifecycleAction::RegisterSensors,
    LifecycleAction::RefreshSystemUi,
    LifecycleAction::RefreshOrientation,
];

const PAUSE_ACTIONS: [LifecycleAction; 3] = [
    LifecycleAction::ReleaseAudioFocus,
    LifecycleAction::PauseNative,
    LifecycleAction::UnregisterSensors,
];

const TEARDOWN_ACTIONS: [LifecycleAction; 2] =
    [LifecycleAction::TeardownNative, LifecycleAction::ReleaseHostResources];

/// Lifecycle state machine. One per process.
#[derive(Debug, Clone)]
pub struct LifecycleCoordinator {
    state: LifecycleState,
    initialized: bool,
}

impl Default for LifecycleCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleCoordinator {
    /// Coordinator in the `Created` state.
    pub fn new() -> Self {
        Self { state: LifecycleState::Created, initialized: false }
    }

    /// Process a lifecycle event and return the actions to execute.
    pub fn handle(&mut self, event: LifecycleEvent) -> Result<Vec<LifecycleAction>, LifecycleError> {
        use LifecycleState::{Created, Destroyed, Initialized, Paused, Resumed};

        if self.state == Destroyed {
            return Err(LifecycleError::Terminal { event: event.name() });
        }

        let (next, actions) = match (event, self.state) {
            (LifecycleEvent::Create, Created) if !self.initialized => {
                self.initialized = true;
                (Initialized, CREATE_ACTIONS.to_vec())
            },
            (LifecycleEvent::Create, state) => {
                tracing::debug!(?state, "create re-entry, native core already initialized");
                (state, Vec::new())
            },

            (LifecycleEvent::Resume, Created) => {
                return Err(LifecycleError::NotInitialized { event: event.name(), state: Created });
            },
            (LifecycleEvent::Resume, Initialized | Paused) => (Resumed, RESUME_ACTIONS.to_vec()),
            (LifecycleEvent::Resume, state) => (state, Vec::new()),

            (LifecycleEvent::Pause, Initialized | Resumed) => (Paused, PAUSE_ACTIONS.to_vec()),
            (LifecycleEvent::Pause, state) => (state, Vec::new()),

            (LifecycleEvent::Destroy, Created) => {
                (Destroyed, vec![LifecycleAction::ReleaseHostResources])
            },
            (LifecycleEvent::Destroy, Resumed) => {
                let mut actions = PAUSE_ACTIONS.to_vec();
                actions.extend(TEARDOWN_ACTIONS);
                (Destroyed, actions)
            },
            (LifecycleEvent::Destroy, _) => (Destroyed, TEARDOWN_ACTIONS.to_vec()),

            (LifecycleEvent::ConfigurationChanged, Created) => (Created, Vec::new()),
            (LifecycleEvent::ConfigurationChanged, state) => {
                (state, vec![LifecycleAction::RefreshSystemUi])
            },
        };

        if next != self.state {
            tracing::info!(from = ?self.state, to = ?next, "lifecycle transition");
        }
        self.state = next;
        Ok(actions)
    }

    /// One-time native setup failed. No input may ever reach the native
    /// core, so the coordinator goes straight to the terminal state.
    pub fn setup_failed(&mut self) {
        tracing::error!(from = ?self.state, "native setup failed, lifecycle terminal");
        self.state = LifecycleState::Destroyed;
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Native setup has run in this process.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Input and render calls are permitted: setup done, not torn down.
    pub fn accepts_input(&self) -> bool {
        matches!(
            self.state,
            LifecycleState::Initialized | LifecycleState::Resumed | LifecycleState::Paused
        )
    }

    /// Motion sensors are registered (foreground only).
    pub fn sensors_active(&self) -> bool {
        self.state == LifecycleState::Resumed
    }
}
