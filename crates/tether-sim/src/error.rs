//! Simulator error types.

use tether_app::BridgeError;
use thiserror::Error;

/// A scenario line that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// First word is not a known directive.
    #[error("line {line}: unknown directive '{word}'")]
    UnknownDirective {
        /// 1-based line number.
        line: usize,
        /// Offending word.
        word: String,
    },

    /// A required argument is absent.
    #[error("line {line}: missing {what}")]
    MissingArgument {
        /// 1-based line number.
        line: usize,
        /// What was expected.
        what: &'static str,
    },

    /// An argument has the wrong shape.
    #[error("line {line}: invalid {what} '{value}'")]
    InvalidArgument {
        /// 1-based line number.
        line: usize,
        /// What was expected.
        what: &'static str,
        /// Offending text.
        value: String,
    },
}

/// Errors that stop a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    /// The script is malformed. Nothing was played.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    /// A command-line option has the wrong shape.
    #[error("invalid --{option} '{value}'")]
    Option {
        /// Option name.
        option: &'static str,
        /// Offending value.
        value: String,
    },

    /// Reading the script or preparing the data directory failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The bridge hit a fatal error.
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}
