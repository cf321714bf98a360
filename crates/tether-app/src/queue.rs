//! Single-consumer event queue.
//!
//! Every producer (host callbacks, the native-core thread, prompt dialogs)
//! holds a cheap, clonable handle onto one unbounded channel; the UI thread
//! owns the only receiver. Ordering is FIFO per producer; no ordering is
//! promised between producers.

use tether_core::{PendingCommand, PromptId, PromptOutcome};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};

use crate::BridgeEvent;

/// Receiving end, owned by the UI thread.
#[derive(Debug)]
pub struct EventQueue {
    rx: UnboundedReceiver<BridgeEvent>,
}

impl EventQueue {
    /// Create a queue and its first sender.
    pub fn new() -> (Self, EventSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, EventSender { tx })
    }

    /// Wait for the next event. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<BridgeEvent> {
        self.rx.recv().await
    }

    /// Next event if one is queued.
    pub fn try_recv(&mut self) -> Option<BridgeEvent> {
        self.rx.try_recv().ok()
    }
}

/// Producer handle. Cheap to clone, safe to move across threads.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: UnboundedSender<BridgeEvent>,
}

impl EventSender {
    /// Post an event. Returns `false` if the consumer is gone.
    pub fn send(&self, event: BridgeEvent) -> bool {
        if self.tx.send(event).is_err() {
            tracing::debug!("event queue closed, dropping event");
            return false;
        }
        true
    }

    /// Handle that posts commands on behalf of the native core.
    pub fn command_poster(&self) -> CommandPoster {
        CommandPoster { sender: self.clone() }
    }

    pub(crate) fn downgrade(&self) -> WeakEventSender {
        WeakEventSender { tx: self.tx.downgrade() }
    }
}

/// Non-owning sender; does not keep the queue open.
#[derive(Debug, Clone)]
pub(crate) struct WeakEventSender {
    tx: WeakUnboundedSender<BridgeEvent>,
}

impl WeakEventSender {
    pub(crate) fn upgrade(&self) -> Option<EventSender> {
        self.tx.upgrade().map(|tx| EventSender { tx })
    }
}

/// Fire-and-forget command hand-off from the native-core thread.
#[derive(Debug, Clone)]
pub struct CommandPoster {
    sender: EventSender,
}

impl CommandPoster {
    /// Post a command for the UI thread. Never blocks.
    pub fn post(&self, name: impl Into<String>, parameter: impl Into<String>) -> bool {
        self.sender.send(BridgeEvent::Command(PendingCommand::new(name, parameter)))
    }
}

/// One-shot answer handle for a text prompt.
///
/// Consumed by [`confirm`](Self::confirm) or [`cancel`](Self::cancel).
/// Dropping it unanswered reports the prompt as abandoned.
#[derive(Debug)]
pub struct PromptResponder {
    id: PromptId,
    sender: Option<EventSender>,
}

impl PromptResponder {
    pub(crate) fn new(id: PromptId, sender: Option<EventSender>) -> Self {
        Self { id, sender }
    }

    /// Prompt this responder answers.
    pub fn id(&self) -> PromptId {
        self.id
    }

    /// The user confirmed with `text`.
    pub fn confirm(mut self, text: impl Into<String>) {
        self.settle(PromptOutcome::Confirmed(text.into()));
    }

    /// The user cancelled.
    pub fn cancel(mut self) {
        self.settle(PromptOutcome::Cancelled);
    }

    fn settle(&mut self, outcome: PromptOutcome) {
        if let Some(sender) = self.sender.take() {
            sender.send(BridgeEvent::PromptSettled { id: self.id, outcome });
        }
    }
}

impl Drop for PromptResponder {
    fn drop(&mut self) {
        self.settle(PromptOutcome::Abandoned);
    }
}

#[cfg(test)]
mod tests {
    use tether_core::LifecycleEvent;

    use super::*;

    #[test]
    fn fifo_per_sender() {
        let (mut queue, sender) = EventQueue::new();
        let poster = sender.command_poster();

        assert!(poster.post("toast", "one"));
        assert!(poster.post("toast", "two"));

        assert_eq!(
            queue.try_recv(),
            Some(BridgeEvent::Command(PendingCommand::new("toast", "one")))
        );
        assert_eq!(
            queue.try_recv(),
            Some(BridgeEvent::Command(PendingCommand::new("toast", "two")))
        );
        assert_eq!(queue.try_recv(), None);
    }

    #[test]
    fn send_after_consumer_gone() {
        let (queue, sender) = EventQueue::new();
        drop(queue);

        assert!(!sender.send(BridgeEvent::Lifecycle(LifecycleEvent::Pause)));
    }

    #[test]
    fn weak_sender_does_not_keep_queue_open() {
        let (mut queue, sender) = EventQueue::new();
        let weak = sender.downgrade();
        drop(sender);

        assert!(weak.upgrade().is_none());
        assert_eq!(queue.try_recv(), None);
    }

    #[test]
    fn responder_settles_once() {
        let (mut queue, sender) = EventQueue::new();

        PromptResponder::new(PromptId(3), Some(sender.clone())).confirm("text");
        assert_eq!(
            queue.try_recv(),
            Some(BridgeEvent::PromptSettled {
                id: PromptId(3),
                outcome: PromptOutcome::Confirmed("text".into())
            })
        );
        assert_eq!(queue.try_recv(), None);
    }

    #[test]
    fn dropped_responder_abandons() {
        let (mut queue, sender) = EventQueue::new();

        drop(PromptResponder::new(PromptId(1), Some(sender)));
        assert_eq!(
            queue.try_recv(),
            Some(BridgeEvent::PromptSettled { id: PromptId(1), outcome: PromptOutcome::Abandoned })
        );
    }
}
