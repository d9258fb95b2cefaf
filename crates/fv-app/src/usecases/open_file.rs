//! Open a file with whatever external handler the host resolves.
//!
//! Bridges the dispatcher's fire-and-forget event contract back into an
//! awaitable call: allocates the logical id, normalizes the caller-supplied
//! path, and turns the matching `Open` event into the call's outcome.

use std::path::Path;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use tokio::sync::broadcast::error::RecvError;
use tracing::trace;

use fv_core::ports::EventStreamPort;
use fv_core::{OpenDispatcher, OpenOptions, ViewerEvent};

/// Chooser title used when the caller does not supply one.
pub const DEFAULT_DIALOG_TITLE: &str = "Open File With";

/// Options for [`OpenFileUseCase::execute`].
#[derive(Default)]
pub struct OpenFileOptions {
    pub dialog_title: Option<String>,
    pub show_open_with_dialog: bool,
    pub show_apps_suggestions: bool,
    /// Invoked once when the external handler returns control.
    pub on_dismiss: Option<Box<dyn FnOnce() + Send>>,
}

/// Opens a file and resolves once the handoff outcome is known.
pub struct OpenFileUseCase {
    dispatcher: Arc<OpenDispatcher>,
    events: Arc<dyn EventStreamPort>,
    last_id: AtomicI32,
}

impl OpenFileUseCase {
    pub fn new(dispatcher: Arc<OpenDispatcher>, events: Arc<dyn EventStreamPort>) -> Self {
        Self {
            dispatcher,
            events,
            last_id: AtomicI32::new(0),
        }
    }

    /// Open `path` with an external handler.
    ///
    /// Resolves `Ok(())` when the handoff succeeded and `Err` with the
    /// descriptive event error otherwise. A path that does not exist emits
    /// no event at all, so this future never resolves for it - the same
    /// pass-through gap the dispatcher documents.
    pub async fn execute(&self, path: &str, options: OpenFileOptions) -> Result<()> {
        let logical_id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        let path = normalize_path(path);

        // Subscribe before dispatching so the immediate handoff event
        // cannot be missed.
        let mut open_rx = self.events.subscribe();

        if let Some(on_dismiss) = options.on_dismiss {
            let mut dismiss_rx = self.events.subscribe();
            tokio::spawn(async move {
                loop {
                    match dismiss_rx.recv().await {
                        Ok(ViewerEvent::Dismiss { id }) if id == logical_id => {
                            on_dismiss();
                            break;
                        }
                        Ok(_) | Err(RecvError::Lagged(_)) => continue,
                        Err(RecvError::Closed) => break,
                    }
                }
            });
        }

        let open_options = OpenOptions {
            show_open_with_dialog: options.show_open_with_dialog,
            show_apps_suggestions: options.show_apps_suggestions,
        };
        let dialog_title = options
            .dialog_title
            .unwrap_or_else(|| DEFAULT_DIALOG_TITLE.to_string());

        trace!(logical_id, %path, "dispatching open call");
        self.dispatcher
            .open(logical_id, Path::new(&path), open_options, Some(dialog_title))
            .await;

        loop {
            match open_rx.recv().await {
                Ok(ViewerEvent::Open { id, error }) if id == logical_id => {
                    return match error {
                        None => Ok(()),
                        Some(message) => Err(anyhow!(message)),
                    };
                }
                Ok(_) | Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => bail!("viewer event channel closed"),
            }
        }
    }
}

/// Normalize a caller-supplied path: strip a `file://` prefix and
/// percent-decode the remainder, keeping the raw text when decoding fails.
pub fn normalize_path(path: &str) -> String {
    match path.strip_prefix("file://") {
        Some(rest) => urlencoding::decode(rest)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| rest.to_string()),
        None => path.to_string(),
    }
}
