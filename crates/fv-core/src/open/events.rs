//! Outbound viewer events - the protocol toward the host application.

use serde::{Deserialize, Serialize};

/// Event-channel name for [`ViewerEvent::Open`].
pub const OPEN_EVENT: &str = "LocalFileViewerDidOpen";

/// Event-channel name for [`ViewerEvent::Dismiss`].
pub const DISMISS_EVENT: &str = "LocalFileViewerDidDismiss";

/// Asynchronous outcome events, each fired at most once per occurrence.
///
/// For a single open call the `Open` event (handoff outcome) always precedes
/// the `Dismiss` event (control returned), never the reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ViewerEvent {
    /// Handoff outcome for an open call. `error: None` means the external
    /// handler was launched; it says nothing about what the user does next.
    Open {
        id: i32,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// The external handler returned control to the host. Fires regardless
    /// of whether the user did anything useful.
    Dismiss { id: i32 },
}

impl ViewerEvent {
    /// The named-event channel this event is delivered on.
    pub fn name(&self) -> &'static str {
        match self {
            ViewerEvent::Open { .. } => OPEN_EVENT,
            ViewerEvent::Dismiss { .. } => DISMISS_EVENT,
        }
    }

    /// The logical caller id this event correlates to.
    pub fn id(&self) -> i32 {
        match self {
            ViewerEvent::Open { id, .. } => *id,
            ViewerEvent::Dismiss { id } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_event_omits_absent_error_in_payload() {
        let event = ViewerEvent::Open {
            id: 3,
            error: None,
        };
        let payload = serde_json::to_value(&event).unwrap();
        assert!(payload.get("error").is_none());
        assert_eq!(payload["id"], 3);
    }

    #[test]
    fn event_names_match_the_host_channels() {
        assert_eq!(
            ViewerEvent::Open { id: 1, error: None }.name(),
            "LocalFileViewerDidOpen"
        );
        assert_eq!(
            ViewerEvent::Dismiss { id: 1 }.name(),
            "LocalFileViewerDidDismiss"
        );
    }
}
