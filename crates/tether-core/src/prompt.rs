//! Text-input prompt tracking.
//!
//! A prompt is opened by the `inputbox` command and settled later, on the UI
//! thread, by whatever the user does. Every prompt settles exactly once:
//!
//! ```text
//!            confirm ──> Completed  (reply inputbox_completed, text)
//! Pending ── cancel  ──> Rejected   (reply inputbox_failed, "")
//!            dropped ──> Abandoned  (no reply)
//! ```
//!
//! Abandoned covers the UI side going away before the user answered. The
//! native core is not messaged.
//!
//! Settled states stay inspectable for the most recent
//! [`SETTLED_HISTORY`] prompts only; older ones are forgotten and any late
//! outcome for them is ignored like one for an unknown id.

use std::collections::{HashMap, VecDeque};

use crate::native::{MESSAGE_INPUT_COMPLETED, MESSAGE_INPUT_FAILED};

/// Settled prompts whose final state is retained.
pub const SETTLED_HISTORY: usize = 16;

/// Title used when the parameter carries none.
pub const DEFAULT_PROMPT_TITLE: &str = "Input";

/// Identifier of one prompt instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PromptId(pub u64);

/// What the host should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    /// Dialog title.
    pub title: String,
    /// Pre-filled, pre-selected text.
    pub default_text: String,
    /// Label of the confirm button.
    pub confirm_label: String,
    /// Label of the cancel button.
    pub cancel_label: String,
}

impl PromptRequest {
    /// Parse a `"title:defaultText"` parameter. Splits at the first colon so
    /// the default text may itself contain colons.
    pub fn from_parameter(parameter: &str) -> Self {
        let (title, default_text) = parameter.split_once(':').unwrap_or((parameter, ""));
        let title = if title.is_empty() { DEFAULT_PROMPT_TITLE } else { title };

        Self {
            title: title.to_owned(),
            default_text: default_text.to_owned(),
            confirm_label: "OK".to_owned(),
            cancel_label: "Cancel".to_owned(),
        }
    }
}

/// How the user left a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Confirmed with the entered text.
    Confirmed(String),
    /// Cancelled.
    Cancelled,
    /// The prompt went away without an answer.
    Abandoned,
}

/// Lifecycle of a single prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptState {
    /// Shown, waiting for the user.
    Pending,
    /// Confirmed and replied.
    Completed,
    /// Cancelled and replied.
    Rejected,
    /// Torn down without an answer.
    Abandoned,
}

/// Message to send back into the native core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptReply {
    /// Message name.
    pub name: &'static str,
    /// Message value.
    pub value: String,
}

/// Tracks pending prompts and the recently settled ones.
#[derive(Debug, Clone, Default)]
pub struct PromptTracker {
    next_id: u64,
    prompts: HashMap<PromptId, PromptState>,
    settled: VecDeque<PromptId>,
}

impl PromptTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pending prompt.
    pub fn open(&mut self) -> PromptId {
        let id = PromptId(self.next_id);
        self.next_id += 1;
        self.prompts.insert(id, PromptState::Pending);
        id
    }

    /// Settle a prompt. Returns the reply to send, if any.
    ///
    /// Outcomes for unknown or already settled prompts are ignored.
    pub fn settle(&mut self, id: PromptId, outcome: PromptOutcome) -> Option<PromptReply> {
        let state = self.prompts.get_mut(&id)?;
        if *state != PromptState::Pending {
            tracing::debug!(?id, ?state, "ignoring outcome for settled prompt");
            return None;
        }

        let (next, reply) = match outcome {
            PromptOutcome::Confirmed(text) => (
                PromptState::Completed,
                Some(PromptReply { name: MESSAGE_INPUT_COMPLETED, value: text }),
            ),
            PromptOutcome::Cancelled => (
                PromptState::Rejected,
                Some(PromptReply { name: MESSAGE_INPUT_FAILED, value: String::new() }),
            ),
            PromptOutcome::Abandoned => {
                tracing::warn!(?id, "prompt abandoned without an answer");
                (PromptState::Abandoned, None)
            },
        };
        *state = next;
        self.retire(id);
        reply
    }

    /// Record `id` as settled, forgetting the oldest beyond the history.
    fn retire(&mut self, id: PromptId) {
        self.settled.push_back(id);
        while self.settled.len() > SETTLED_HISTORY {
            if let Some(oldest) = self.settled.pop_front() {
                self.prompts.remove(&oldest);
            }
        }
    }

    /// State of a prompt. `None` if it was never opened or has been
    /// forgotten.
    pub fn state(&self, id: PromptId) -> Option<PromptState> {
        self.prompts.get(&id).copied()
    }

    /// Number of prompts still waiting for the user.
    pub fn pending(&self) -> usize {
        self.prompts.values().filter(|s| **s == PromptState::Pending).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_split() {
        let req = PromptRequest::from_parameter("Title:Default");
        assert_eq!(req.title, "Title");
        assert_eq!(req.default_text, "Default");
        assert_eq!(req.confirm_label, "OK");
    }

    #[test]
    fn parameter_defaults() {
        let req = PromptRequest::from_parameter(":text");
        assert_eq!(req.title, DEFAULT_PROMPT_TITLE);
        assert_eq!(req.default_text, "text");

        let req = PromptRequest::from_parameter("Name");
        assert_eq!(req.title, "Name");
        assert_eq!(req.default_text, "");

        let req = PromptRequest::from_parameter("");
        assert_eq!(req.title, DEFAULT_PROMPT_TITLE);
    }

    #[test]
    fn default_text_keeps_colons() {
        let req = PromptRequest::from_parameter("Server:host:4433");
        assert_eq!(req.default_text, "host:4433");
    }

    #[test]
    fn confirm_replies_once() {
        let mut tracker = PromptTracker::new();
        let id = tracker.open();

        let reply = tracker.settle(id, PromptOutcome::Confirmed("hello".into()));
        assert_eq!(reply, Some(PromptReply { name: MESSAGE_INPUT_COMPLETED, value: "hello".into() }));
        assert_eq!(tracker.state(id), Some(PromptState::Completed));

        assert_eq!(tracker.settle(id, PromptOutcome::Cancelled), None);
        assert_eq!(tracker.state(id), Some(PromptState::Completed));
    }

    #[test]
    fn cancel_replies_failed() {
        let mut tracker = PromptTracker::new();
        let id = tracker.open();

        let reply = tracker.settle(id, PromptOutcome::Cancelled);
        assert_eq!(reply, Some(PromptReply { name: MESSAGE_INPUT_FAILED, value: String::new() }));
        assert_eq!(tracker.state(id), Some(PromptState::Rejected));
    }

    #[test]
    fn abandon_is_silent() {
        let mut tracker = PromptTracker::new();
        let first = tracker.open();
        let second = tracker.open();
        assert_ne!(first, second);
        assert_eq!(tracker.pending(), 2);

        assert_eq!(tracker.settle(first, PromptOutcome::Abandoned), None);
        assert_eq!(tracker.state(first), Some(PromptState::Abandoned));
        assert_eq!(tracker.pending(), 1);
    }

    #[test]
    fn settled_history_is_bounded() {
        let mut tracker = PromptTracker::new();
        let pending = tracker.open();
        let ids: Vec<_> = (0..SETTLED_HISTORY + 4).map(|_| tracker.open()).collect();
        for id in &ids {
            let _ = tracker.settle(*id, PromptOutcome::Cancelled);
        }

        assert_eq!(tracker.prompts.len(), SETTLED_HISTORY + 1);
        assert_eq!(tracker.state(ids[0]), None);
        assert_eq!(tracker.state(ids[ids.len() - 1]), Some(PromptState::Rejected));
        assert_eq!(tracker.state(pending), Some(PromptState::Pending));
        assert_eq!(tracker.pending(), 1);

        // A late outcome for a forgotten prompt stays silent.
        assert_eq!(tracker.settle(ids[0], PromptOutcome::Confirmed("late".into())), None);
    }

    #[test]
    fn unknown_prompt_is_ignored() {
        let mut tracker = PromptTracker::new();
        assert_eq!(tracker.settle(PromptId(42), PromptOutcome::Cancelled), None);
        assert_eq!(tracker.state(PromptId(42)), None);
    }
}
