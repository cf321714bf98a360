//! Error types for the bridge state machines.
//!
//! Only [`SetupError`] is ever fatal, and only during the one-time native
//! initialization. Everything else is absorbed by the caller: logged, then
//! ignored with the previous state retained.

use thiserror::Error;

use crate::lifecycle::LifecycleState;

/// Mandatory host information could not be resolved during one-time setup.
///
/// This is the single unrecoverable failure of the bridge; startup aborts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// A required identity field was empty or absent.
    #[error("missing host identity: {field}")]
    MissingIdentity {
        /// Name of the missing field.
        field: &'static str,
    },

    /// The application bundle could not be located.
    #[error("unable to locate application bundle")]
    MissingBundle,

    /// The host refused to report its configuration.
    #[error("host configuration unavailable: {0}")]
    HostUnavailable(String),
}

/// Lifecycle event arrived in a state that cannot accept it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// Nothing leaves the destroyed state.
    #[error("lifecycle is terminal: {event} after destroy")]
    Terminal {
        /// Event that was rejected.
        event: &'static str,
    },

    /// Resume or pause arrived before the one-time initialization.
    #[error("cannot {event} from {state:?}: native core not initialized")]
    NotInitialized {
        /// Event that was rejected.
        event: &'static str,
        /// State when the event arrived.
        state: LifecycleState,
    },
}

/// Native core answered a config query with something unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Value is not a number.
    #[error("{key}: not a number: {value:?}")]
    NotANumber {
        /// Config key queried.
        key: &'static str,
        /// Raw answer.
        value: String,
    },

    /// Value parsed but lies outside the accepted range.
    #[error("{key}: out of range: {value}")]
    OutOfRange {
        /// Config key queried.
        key: &'static str,
        /// Parsed answer.
        value: i64,
    },

    /// Flag value other than "0", "1" or empty.
    #[error("{key}: invalid flag {value:?}")]
    InvalidFlag {
        /// Config key queried.
        key: &'static str,
        /// Raw answer.
        value: String,
    },
}
