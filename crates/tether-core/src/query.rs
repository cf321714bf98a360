//! Display policy answers from the native core.
//!
//! The native core is asked for its desired orientation and immersive mode
//! through the string-keyed config protocol. Answers that cannot be parsed
//! are reported as [`QueryError`] and the host keeps its current state.

use crate::{
    error::QueryError,
    native::{QUERY_IMMERSIVE_MODE, QUERY_SCREEN_ROTATION},
};

/// Requested window orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Let the host decide.
    Unspecified,
    /// Landscape.
    Landscape,
    /// Portrait.
    Portrait,
    /// Upside-down landscape.
    ReverseLandscape,
    /// Upside-down portrait.
    ReversePortrait,
}

impl Orientation {
    /// Parse a `screenRotation` answer (`"0"..="4"`).
    pub fn from_query(value: &str) -> Result<Self, QueryError> {
        let code: i64 = value.trim().parse().map_err(|_| QueryError::NotANumber {
            key: QUERY_SCREEN_ROTATION,
            value: value.to_owned(),
        })?;

        match code {
            0 => Ok(Self::Unspecified),
            1 => Ok(Self::Landscape),
            2 => Ok(Self::Portrait),
            3 => Ok(Self::ReverseLandscape),
            4 => Ok(Self::ReversePortrait),
            _ => Err(QueryError::OutOfRange { key: QUERY_SCREEN_ROTATION, value: code }),
        }
    }
}

/// Parse an `immersiveMode` answer.
pub fn immersive_from_query(value: &str) -> Result<bool, QueryError> {
    match value.trim() {
        "1" => Ok(true),
        "0" | "" => Ok(false),
        other => {
            Err(QueryError::InvalidFlag { key: QUERY_IMMERSIVE_MODE, value: other.to_owned() })
        },
    }
}

/// System UI visibility applied to the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SystemUiFlags {
    /// Dim navigation controls.
    pub low_profile: bool,
    /// Hide navigation, sticky immersive.
    pub immersive: bool,
}
