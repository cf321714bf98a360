//! Headless tether host.
//!
//! Replays line-oriented scenario scripts through the real
//! [`tether_app::Runtime`] against the recording doubles from
//! `tether-harness`, logging every collaborator call.
//!
//! # Components
//!
//! - [`parse_script`]: scenario text into [`Step`]s
//! - [`play`]: drives the runtime through the steps
//! - [`SimOptions`]: simulated device identity and native answers

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod player;
mod scenario;

pub use error::{ScenarioError, SimError};
pub use player::{SimOptions, Summary, play};
pub use scenario::{Step, parse_line, parse_script};
