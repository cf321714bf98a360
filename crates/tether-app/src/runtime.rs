//! Event loop for the UI-owning thread.
//!
//! The [`Runtime`] owns the [`Bridge`] and the single consumer end of the
//! event queue. Hosts with an async executor call [`Runtime::run`]; hosts with
//! their own loop call [`Runtime::pump`] once per iteration.

use tether_core::{LifecycleState, NativeCore};

use crate::{Bridge, BridgeError, BridgeEvent, EventQueue, EventSender, Host};

/// Owns the bridge and drains its queue.
pub struct Runtime<N: NativeCore, H: Host> {
    bridge: Bridge<N, H>,
    queue: EventQueue,
}

impl<N: NativeCore, H: Host> Runtime<N, H> {
    /// Runtime around a fresh bridge. The sender feeds the queue.
    pub fn new(native: N, host: H) -> (Self, EventSender) {
        Self::from_bridge(Bridge::new(native, host))
    }

    /// Runtime around a preconfigured bridge.
    pub fn from_bridge(mut bridge: Bridge<N, H>) -> (Self, EventSender) {
        let (queue, sender) = EventQueue::new();
        bridge.attach(&sender);
        (Self { bridge, queue }, sender)
    }

    /// Process events until destroy completes or every sender is dropped.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`BridgeError`]. Non-fatal errors are logged.
    pub async fn run(&mut self) -> Result<(), BridgeError> {
        while let Some(event) = self.queue.recv().await {
            if self.step(event)? {
                tracing::info!("runtime stopped after destroy");
                return Ok(());
            }
        }
        tracing::info!("event queue closed");
        Ok(())
    }

    /// Process every event already queued, without waiting.
    ///
    /// Returns the number of events processed.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`BridgeError`]; later events stay queued.
    pub fn pump(&mut self) -> Result<usize, BridgeError> {
        let mut processed = 0;
        while let Some(event) = self.queue.try_recv() {
            processed += 1;
            self.step(event)?;
        }
        Ok(processed)
    }

    /// The bridge.
    pub fn bridge(&self) -> &Bridge<N, H> {
        &self.bridge
    }

    /// The bridge, mutably.
    pub fn bridge_mut(&mut self) -> &mut Bridge<N, H> {
        &mut self.bridge
    }

    /// Returns `true` once the bridge is destroyed.
    fn step(&mut self, event: BridgeEvent) -> Result<bool, BridgeError> {
        match self.bridge.handle(event) {
            Ok(_) => {},
            Err(error) if error.is_fatal() => {
                tracing::error!(%error, "fatal bridge error");
                return Err(error);
            },
            Err(error) => tracing::warn!(%error, "event rejected"),
        }
        Ok(self.bridge.lifecycle_state() == LifecycleState::Destroyed)
    }
}
