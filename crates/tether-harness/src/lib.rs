//! Deterministic simulation harness for the tether bridge.
//!
//! Recording implementations of the [`tether_core::NativeCore`] and
//! [`tether_app::Host`] traits, so the same [`tether_app::Bridge`] and
//! [`tether_app::Runtime`] code that runs on a device can be driven from
//! tests and the headless simulator.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks behavioral properties over the recorded
//! call logs. Use [`InvariantRegistry::standard()`] after any event sequence.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod invariants;
pub mod sim_host;
pub mod sim_native;

pub use invariants::{CallLog, Invariant, InvariantRegistry, InvariantResult, Violation};
pub use sim_host::{HostCall, SimHost, sim_config};
pub use sim_native::{NativeCall, SimNative};
