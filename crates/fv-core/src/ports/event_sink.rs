//! Event ports - emission toward and subscription from the host event layer.

use tokio::sync::broadcast;

use crate::open::ViewerEvent;

/// Outbound named-event emission toward the host subscription layer.
///
/// Events fire at most once per occurrence; emission never fails back into
/// the core (a host with no subscribers simply drops the event).
pub trait EventSinkPort: Send + Sync {
    fn emit(&self, event: ViewerEvent);
}

/// Subscription side of the host event layer.
pub trait EventStreamPort: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<ViewerEvent>;
}
