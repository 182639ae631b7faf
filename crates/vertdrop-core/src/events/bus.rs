//! In-process broadcast bus for session events.

use tokio::sync::broadcast;

use super::{DomainEvent, SessionEvent};

/// Fan-out channel carrying [`DomainEvent`]s to every subscriber.
///
/// Cloning the bus shares the same underlying channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a new bus buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event. Returns the number of subscribers that received it.
    pub fn publish(&self, actor_id: Option<i64>, payload: SessionEvent) -> usize {
        tracing::debug!(event = ?payload, "Publishing session event");
        self.tx
            .send(DomainEvent::new(actor_id, payload))
            .unwrap_or(0)
    }

    /// Subscribe to all events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
