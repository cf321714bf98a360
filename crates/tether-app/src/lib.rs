//! Application layer for tether.
//!
//! Owns the bridge context that threads the core state machines through calls
//! into the host framework and the native core, plus the single-consumer
//! event queue that serializes everything onto the UI-owning thread.
//!
//! # Components
//!
//! - [`Bridge`]: executes lifecycle actions, routes input, dispatches commands
//! - [`Host`]: trait for platform-specific window, audio and UI services
//! - [`EventQueue`] / [`EventSender`]: unbounded FIFO into the UI thread
//! - [`CommandPoster`]: fire-and-forget command hand-off from the native core
//! - [`PromptResponder`]: one-shot answer handle for text prompts
//! - [`Runtime`]: async loop draining the queue into the bridge

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bridge;
mod dispatcher;
mod display;
mod error;
mod event;
mod host;
mod queue;
mod runtime;

pub use bridge::Bridge;
pub use dispatcher::{CommandDispatcher, DisplayRefresh, MIME_JPEG, MIME_TEXT};
pub use display::{DisplayPolicy, SystemUiPolicy};
pub use error::BridgeError;
pub use event::BridgeEvent;
pub use host::{Host, HostError, ShareContent};
pub use queue::{CommandPoster, EventQueue, EventSender, PromptResponder};
pub use runtime::Runtime;
