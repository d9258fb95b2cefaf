//! Broadcast bus carrying viewer lifecycle events to subscribers.

use tokio::sync::broadcast;
use tracing::trace;

use fv_core::ports::{EventSinkPort, EventStreamPort};
use fv_core::ViewerEvent;

/// Fan-out event bus over a tokio broadcast channel.
///
/// Emission never blocks and never fails: an event with no subscribers is
/// simply dropped, matching a fire-and-forget emitter.
pub struct BroadcastEventBus {
    tx: broadcast::Sender<ViewerEvent>,
}

impl BroadcastEventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Listener-registration hook kept for emitter API symmetry. The
    /// broadcast channel tracks its own receivers, so there is nothing to do.
    pub fn add_listener(&self, _event_name: &str) {}

    /// See [`Self::add_listener`].
    pub fn remove_listeners(&self, _count: i64) {}
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventSinkPort for BroadcastEventBus {
    fn emit(&self, event: ViewerEvent) {
        trace!(event = event.name(), id = event.id(), "emitting viewer event");
        let _ = self.tx.send(event);
    }
}

impl EventStreamPort for BroadcastEventBus {
    fn subscribe(&self) -> broadcast::Receiver<ViewerEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_events_to_every_subscriber() {
        let bus = BroadcastEventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.emit(ViewerEvent::Dismiss { id: 3 });

        assert_eq!(a.recv().await.unwrap(), ViewerEvent::Dismiss { id: 3 });
        assert_eq!(b.recv().await.unwrap(), ViewerEvent::Dismiss { id: 3 });
    }

    #[test]
    fn emitting_without_subscribers_is_a_no_op() {
        let bus = BroadcastEventBus::default();
        bus.emit(ViewerEvent::Open {
            id: 1,
            error: None,
        });
    }
}
