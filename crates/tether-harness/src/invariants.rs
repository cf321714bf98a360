//! Invariant checking over recorded collaborator calls.
//!
//! Invariants are properties that must hold for every event sequence, not
//! just scripted scenarios. Each one inspects the call logs of [`SimNative`]
//! and [`SimHost`] through a [`CallLog`] and reports a [`Violation`] with
//! enough context to find the offending call.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! registry.assert_all(&CallLog::of(&bridge), "after scenario");
//! ```
//!
//! [`SimNative`]: crate::SimNative
//! [`SimHost`]: crate::SimHost

use std::fmt;

use tether_app::Bridge;

use crate::{HostCall, NativeCall, SimHost, SimNative};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// Borrowed view of both call logs.
#[derive(Debug, Clone, Copy)]
pub struct CallLog<'a> {
    /// Native core calls, in order.
    pub native: &'a [NativeCall],
    /// Host calls, in order.
    pub host: &'a [HostCall],
}

impl<'a> CallLog<'a> {
    /// Logs of a bridge built on the simulation doubles.
    pub fn of(bridge: &'a Bridge<SimNative, SimHost>) -> Self {
        Self { native: bridge.native().calls(), host: bridge.host().calls() }
    }
}

/// A property checked against recorded calls.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against the logs.
    fn check(&self, log: &CallLog<'_>) -> InvariantResult;
}

/// Native setup runs at most once per process.
pub struct SingleInit;

impl Invariant for SingleInit {
    fn name(&self) -> &'static str {
        "single_init"
    }

    fn check(&self, log: &CallLog<'_>) -> InvariantResult {
        let inits = log.native.iter().filter(|c| matches!(c, NativeCall::Init(_))).count();
        if inits > 1 {
            return Err(Violation {
                invariant: self.name(),
                message: format!("native init ran {inits} times"),
            });
        }
        Ok(())
    }
}

/// No input reaches the native core before setup or after shutdown.
pub struct InputWhileInitialized;

impl Invariant for InputWhileInitialized {
    fn name(&self) -> &'static str {
        "input_while_initialized"
    }

    fn check(&self, log: &CallLog<'_>) -> InvariantResult {
        let mut live = false;
        for (index, call) in log.native.iter().enumerate() {
            match call {
                NativeCall::Init(_) => live = true,
                NativeCall::Shutdown => live = false,
                call if call.is_input() && !live => {
                    return Err(Violation {
                        invariant: self.name(),
                        message: format!("call #{index} {call:?} outside init..shutdown"),
                    });
                },
                _ => {},
            }
        }
        Ok(())
    }
}

/// Audio focus is only released while held.
///
/// Acquiring while already held is allowed (resume after create re-requests
/// focus); one release gives it up.
pub struct NoReleaseWithoutAcquire;

impl Invariant for NoReleaseWithoutAcquire {
    fn name(&self) -> &'static str {
        "no_release_without_acquire"
    }

    fn check(&self, log: &CallLog<'_>) -> InvariantResult {
        let mut held = false;
        for (index, call) in log.host.iter().enumerate() {
            match call {
                HostCall::AcquireAudioFocus => held = true,
                HostCall::ReleaseAudioFocus => {
                    if !held {
                        return Err(Violation {
                            invariant: self.name(),
                            message: format!("call #{index} released focus not held"),
                        });
                    }
                    held = false;
                },
                _ => {},
            }
        }
        Ok(())
    }
}

/// Each prompt gets at most one reply message.
pub struct PromptRepliesBounded;

impl Invariant for PromptRepliesBounded {
    fn name(&self) -> &'static str {
        "prompt_replies_bounded"
    }

    fn check(&self, log: &CallLog<'_>) -> InvariantResult {
        let shown = log.host.iter().filter(|c| matches!(c, HostCall::ShowPrompt(_))).count();
        let replies = log
            .native
            .iter()
            .filter(|c| {
                matches!(c, NativeCall::Message { name, .. }
                    if name == "inputbox_completed" || name == "inputbox_failed")
            })
            .count();
        if replies > shown {
            return Err(Violation {
                invariant: self.name(),
                message: format!("{replies} replies for {shown} prompts"),
            });
        }
        Ok(())
    }
}

/// Registry of invariants to check.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Registry with every invariant in this module.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(SingleInit);
        registry.add(InputWhileInitialized);
        registry.add(NoReleaseWithoutAcquire);
        registry.add(PromptRepliesBounded);
        registry
    }

    /// Add an invariant.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants. Returns every violation found.
    pub fn check_all(&self, log: &CallLog<'_>) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(log).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation.
    #[allow(clippy::panic, reason = "test assertion helper")]
    pub fn assert_all(&self, log: &CallLog<'_>, context: &str) {
        if let Err(violations) = self.check_all(log) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }
}

#[cfg(test)]
mod tests {
    use tether_core::{KeyCode, Slot};

    use super::*;

    #[test]
    fn detects_double_init() {
        let init = NativeCall::Init(tether_core::InitConfig {
            dpi: 0,
            device_id: String::new(),
            locale: String::new(),
            bundle_path: "b".into(),
            data_dir: "d".into(),
            external_storage_dir: "e".into(),
            native_lib_dir: "l".into(),
            shortcut_param: String::new(),
            install_id: String::new(),
            use_low_level_audio: false,
        });
        let native = [init.clone(), init];
        let log = CallLog { native: &native, host: &[] };

        assert!(SingleInit.check(&log).is_err());
    }

    #[test]
    fn detects_input_before_init() {
        let native = [NativeCall::KeyDown { slot: Slot::Primary, key: KeyCode::MENU }];
        let log = CallLog { native: &native, host: &[] };

        let violation = InputWhileInitialized.check(&log).unwrap_err();
        assert_eq!(violation.invariant, "input_while_initialized");
    }

    #[test]
    fn detects_release_of_focus_not_held() {
        let host = [HostCall::AcquireAudioFocus, HostCall::ReleaseAudioFocus, HostCall::ReleaseAudioFocus];
        let log = CallLog { native: &[], host: &host };

        assert!(NoReleaseWithoutAcquire.check(&log).is_err());
        assert!(InvariantRegistry::standard().check_all(&log).is_err());
    }

    #[test]
    fn repeated_acquire_is_released_once() {
        // create then resume both request focus; pause gives it up
        let host = [HostCall::AcquireAudioFocus, HostCall::AcquireAudioFocus, HostCall::ReleaseAudioFocus];
        let log = CallLog { native: &[], host: &host };
        assert!(NoReleaseWithoutAcquire.check(&log).is_ok());

        let host = [
            HostCall::AcquireAudioFocus,
            HostCall::AcquireAudioFocus,
            HostCall::ReleaseAudioFocus,
            HostCall::ReleaseAudioFocus,
        ];
        let log = CallLog { native: &[], host: &host };
        assert!(NoReleaseWithoutAcquire.check(&log).is_err());
    }

    #[test]
    fn empty_logs_hold() {
        let log = CallLog { native: &[], host: &[] };
        assert!(InvariantRegistry::standard().check_all(&log).is_ok());
    }
}
