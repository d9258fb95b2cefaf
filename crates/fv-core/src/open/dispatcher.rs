//! Open Dispatcher.
//!
//! Builds an action request from a resolver locator, submits it to the host,
//! and multiplexes the outcome back to the logical caller that issued it,
//! even though the host result channel carries only one numeric request code
//! per outstanding request.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{debug, trace, warn};

use crate::locator::MediaResolver;
use crate::open::{OpenOptions, OpenRequest, ViewerEvent};
use crate::ports::{ActionPort, EventSinkPort, FileStatPort, SubmittedAction, ViewAction};

/// Fixed offset between logical ids and host request codes.
///
/// Large enough that the derived codes cannot collide with any other
/// request-code namespace the host hands out for unrelated purposes.
pub const REQUEST_CODE_OFFSET: i64 = 33_341;

/// Failures surfaced through the `Open` event's error field.
///
/// The rendered messages are part of the event protocol; callers match on
/// them, so the wording is load-bearing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpenFailure {
    /// No locator could be resolved for the file.
    #[error("Invalid file")]
    InvalidFile,
    /// No installed handler services the action.
    #[error("No app associated with this mime type")]
    NoAssociatedApp,
    /// A store fallback was requested but the MIME type is unknown, so
    /// there is nothing to search for.
    #[error("It wasn't possible to detect the type of the file")]
    UndetectedType,
    /// The logical id already has an outstanding request.
    #[error("Request id {0} is already in flight")]
    DuplicateRequest(i32),
    /// The logical id is negative; its derived code would land outside the
    /// dispatcher's request-code namespace.
    #[error("Request id {0} is out of range")]
    IdOutOfRange(i32),
}

/// Host request code for a logical caller id.
///
/// The dispatcher only issues codes for non-negative ids, keeping every
/// tracked code at or above the offset and clear of foreign namespaces such
/// as the fixed consent code.
pub fn request_code(logical_id: i32) -> i64 {
    logical_id as i64 + REQUEST_CODE_OFFSET
}

/// Recover the logical caller id from a host request code.
///
/// Exact inverse of [`request_code`] over the whole `i32` range. Since the
/// dispatcher never tracks codes for negative ids, a decoded negative can
/// never correspond to an outstanding request.
pub fn decode_request_code(code: i64) -> Option<i32> {
    i32::try_from(code - REQUEST_CODE_OFFSET).ok()
}

/// Correlation slot for one outstanding request.
struct Pending {
    logical_id: i32,
    /// The handoff `Open` event has been emitted.
    announced: bool,
    /// A host result arrived before the handoff event; dismissal is held
    /// back until the announcement goes out.
    result_arrived: bool,
}

/// Dispatches open calls and correlates host results back to callers.
///
/// Fire-and-forget: outcomes are delivered via [`ViewerEvent`]s, never via a
/// return value, and no failure propagates past this component.
pub struct OpenDispatcher {
    resolver: MediaResolver,
    files: Arc<dyn FileStatPort>,
    actions: Arc<dyn ActionPort>,
    events: Arc<dyn EventSinkPort>,
    /// Host request code -> correlation slot, one entry per outstanding
    /// request.
    pending: Mutex<HashMap<i64, Pending>>,
}

impl OpenDispatcher {
    pub fn new(
        resolver: MediaResolver,
        files: Arc<dyn FileStatPort>,
        actions: Arc<dyn ActionPort>,
        events: Arc<dyn EventSinkPort>,
    ) -> Self {
        Self {
            resolver,
            files,
            actions,
            events,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Hand the file at `path` to an external handler.
    ///
    /// A path that does not exist ends the call silently with no event at
    /// all. This is intentional pass-through behavior inherited from the
    /// host bridge, a known gap rather than an error path.
    pub async fn open(
        &self,
        logical_id: i32,
        path: &Path,
        options: OpenOptions,
        dialog_title: Option<String>,
    ) {
        if logical_id < 0 {
            warn!(logical_id, "rejecting open call with out-of-range id");
            self.emit_open(
                logical_id,
                Some(OpenFailure::IdOutOfRange(logical_id).to_string()),
            );
            return;
        }

        if !self.files.exists(path) {
            trace!(logical_id, path = %path.display(), "target file missing, dropping open call");
            return;
        }

        let resolution = self.resolver.resolve(path).await;
        let Some(locator) = resolution.locator else {
            self.emit_open(logical_id, Some(OpenFailure::InvalidFile.to_string()));
            return;
        };

        let request = OpenRequest {
            logical_id,
            file_path: path.to_path_buf(),
            mime_type: resolution.mime_type,
            locator,
            want_chooser: options.show_open_with_dialog,
            want_store_fallback: options.show_apps_suggestions,
            dialog_title,
        };

        let action = ViewAction::new(request.locator.clone(), request.mime_type.clone());

        if self.actions.can_resolve(&action).await {
            self.submit(request, action).await;
        } else {
            self.report_missing_handler(&request).await;
        }
    }

    async fn submit(&self, request: OpenRequest, action: ViewAction) {
        let code = request_code(request.logical_id);

        // Reserve the correlation slot before handing off. A duplicate
        // in-flight id is rejected here rather than silently overwriting the
        // earlier caller's correlation.
        {
            let mut pending = self.pending.lock().expect("pending map poisoned");
            if pending.contains_key(&code) {
                drop(pending);
                warn!(logical_id = request.logical_id, "duplicate in-flight open id rejected");
                self.emit_open(
                    request.logical_id,
                    Some(OpenFailure::DuplicateRequest(request.logical_id).to_string()),
                );
                return;
            }
            pending.insert(
                code,
                Pending {
                    logical_id: request.logical_id,
                    announced: false,
                    result_arrived: false,
                },
            );
        }

        let submitted = if request.want_chooser {
            SubmittedAction::Chooser {
                action,
                title: request.dialog_title.clone().unwrap_or_default(),
            }
        } else {
            SubmittedAction::Direct(action)
        };

        match self.actions.submit_for_result(submitted, code).await {
            Ok(()) => {
                debug!(logical_id = request.logical_id, code, "handoff succeeded");
                // Announce under the pending lock so a racing result
                // delivery cannot slip its Dismiss in ahead of the
                // handoff event.
                let mut pending = self.pending.lock().expect("pending map poisoned");
                self.emit_open(request.logical_id, None);
                let deferred = match pending.get_mut(&code) {
                    Some(slot) if slot.result_arrived => true,
                    Some(slot) => {
                        slot.announced = true;
                        false
                    }
                    None => false,
                };
                if deferred {
                    pending.remove(&code);
                    self.events.emit(ViewerEvent::Dismiss {
                        id: request.logical_id,
                    });
                }
            }
            Err(error) => {
                self.pending
                    .lock()
                    .expect("pending map poisoned")
                    .remove(&code);
                self.emit_open(request.logical_id, Some(error.to_string()));
            }
        }
    }

    async fn report_missing_handler(&self, request: &OpenRequest) {
        if request.want_store_fallback {
            match &request.mime_type {
                Some(mime_type) => {
                    // Best effort: the search launch is neither correlated
                    // nor reported.
                    if let Err(error) = self.actions.launch_store_search(mime_type).await {
                        debug!(%error, "store search launch failed");
                    }
                    self.emit_open(
                        request.logical_id,
                        Some(OpenFailure::NoAssociatedApp.to_string()),
                    );
                }
                None => {
                    self.emit_open(
                        request.logical_id,
                        Some(OpenFailure::UndetectedType.to_string()),
                    );
                }
            }
        } else {
            self.emit_open(
                request.logical_id,
                Some(OpenFailure::NoAssociatedApp.to_string()),
            );
        }
    }

    /// Decode a host result delivery.
    ///
    /// The payload is opaque and unused: success or failure of the external
    /// handler is not observable, only that it returned control. Codes
    /// without a pending entry belong to other namespaces and are ignored.
    /// A result that beats the handoff event (an instantly exiting handler)
    /// is held and its `Dismiss` is emitted by the announcing side, keeping
    /// `Open` ahead of `Dismiss` in every interleaving.
    pub fn handle_result(&self, code: i64, _payload: Option<serde_json::Value>) {
        let mut pending = self.pending.lock().expect("pending map poisoned");
        let ready = match pending.get_mut(&code) {
            Some(slot) if slot.announced => Some(slot.logical_id),
            Some(slot) => {
                trace!(code, "result beat the handoff event, deferring dismissal");
                slot.result_arrived = true;
                None
            }
            None => {
                trace!(code, "ignoring result for unknown request code");
                None
            }
        };
        if let Some(id) = ready {
            pending.remove(&code);
            self.events.emit(ViewerEvent::Dismiss { id });
        }
    }

    /// Number of requests currently awaiting a host result.
    pub fn pending_len(&self) -> usize {
        self.pending.lock().expect("pending map poisoned").len()
    }

    fn emit_open(&self, id: i32, error: Option<String>) {
        self.events.emit(ViewerEvent::Open { id, error });
    }
}
