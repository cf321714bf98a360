//! Bridge error types.

use tether_core::{LifecycleError, SetupError};
use thiserror::Error;

/// Errors surfaced by [`crate::Bridge::handle`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Native setup could not be assembled. The application cannot start.
    #[error("setup failed: {0}")]
    Setup(#[from] SetupError),

    /// A lifecycle event arrived in a state that cannot accept it.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl BridgeError {
    /// True if the runtime must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Setup(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_setup_is_fatal() {
        assert!(BridgeError::from(SetupError::MissingBundle).is_fatal());
        assert!(!BridgeError::from(LifecycleError::Terminal { event: "resume" }).is_fatal());
    }
}
