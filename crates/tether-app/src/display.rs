//! Orientation and system UI refresh.
//!
//! The native core owns the display policy; the host only applies it. Each
//! refresh asks the core and applies a successfully parsed answer. Bad
//! answers leave the host exactly as it was.

use tether_core::{
    NativeCore, Orientation, SystemUiFlags,
    native::{QUERY_IMMERSIVE_MODE, QUERY_SCREEN_ROTATION},
    query::immersive_from_query,
};

use crate::Host;

/// Fixed part of the system UI request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemUiPolicy {
    /// Always dim navigation controls.
    pub low_profile: bool,
}

impl Default for SystemUiPolicy {
    fn default() -> Self {
        Self { low_profile: true }
    }
}

/// Applies the native core's display wishes to the host.
#[derive(Debug, Clone, Default)]
pub struct DisplayPolicy {
    policy: SystemUiPolicy,
    orientation: Option<Orientation>,
    system_ui: Option<SystemUiFlags>,
}

impl DisplayPolicy {
    /// Policy with nothing applied yet.
    pub fn new(policy: SystemUiPolicy) -> Self {
        Self { policy, orientation: None, system_ui: None }
    }

    /// Query `screenRotation` and apply it. Returns `true` if applied.
    pub fn refresh_orientation<N, H>(&mut self, native: &mut N, host: &mut H) -> bool
    where
        N: NativeCore + ?Sized,
        H: Host + ?Sized,
    {
        let answer = native.query_config(QUERY_SCREEN_ROTATION);
        match Orientation::from_query(&answer) {
            Ok(orientation) => {
                host.set_orientation(orientation);
                self.orientation = Some(orientation);
                true
            },
            Err(error) => {
                tracing::warn!(%error, "keeping current orientation");
                false
            },
        }
    }

    /// Query `immersiveMode` and apply system UI flags. Returns `true` if
    /// applied.
    pub fn refresh_system_ui<N, H>(&mut self, native: &mut N, host: &mut H) -> bool
    where
        N: NativeCore + ?Sized,
        H: Host + ?Sized,
    {
        let answer = native.query_config(QUERY_IMMERSIVE_MODE);
        let immersive = match immersive_from_query(&answer) {
            Ok(immersive) => immersive,
            Err(error) => {
                tracing::warn!(%error, "keeping current system ui");
                return false;
            },
        };

        let flags = SystemUiFlags { low_profile: self.policy.low_profile, immersive };
        if let Err(error) = host.set_system_ui(flags) {
            tracing::warn!(%error, ?flags, "system ui not applied");
            return false;
        }
        self.system_ui = Some(flags);
        true
    }

    /// Last orientation applied, if any.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Last system UI flags applied, if any.
    pub fn system_ui(&self) -> Option<SystemUiFlags> {
        self.system_ui
    }

    /// Configured policy.
    pub fn policy(&self) -> SystemUiPolicy {
        self.policy
    }
}
