//! Event consumers.

use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;

use super::GameEvent;

/// Receives every event the engine emits, in order.
///
/// Called synchronously from the engine; implementations must not block.
pub trait GameObserver: Send {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent) + Send,
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Forwards events into an unbounded tokio channel.
///
/// A closed receiver is not an error; events are dropped.
#[derive(Clone, Debug)]
pub struct ChannelObserver {
    tx: UnboundedSender<GameEvent>,
}

impl ChannelObserver {
    pub fn new(tx: UnboundedSender<GameEvent>) -> Self {
        Self { tx }
    }
}

impl GameObserver for ChannelObserver {
    fn on_event(&mut self, event: &GameEvent) {
        if self.tx.send(event.clone()).is_err() {
            tracing::trace!(kind = event.kind(), "event receiver closed");
        }
    }
}

/// In-memory event recorder. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
