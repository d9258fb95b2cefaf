//! Host-signal runtime.
//!
//! The host delivers at most one result callback at a time; this runtime
//! reproduces that serialization by funnelling every host signal through a
//! single channel consumed by one task. Both correlation structures are
//! therefore only ever mutated from the call-issuing paths and this one
//! delivery loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use fv_core::{OpenDispatcher, StorageAccessMachine};

/// Inbound signals from the host component.
#[derive(Debug, Clone)]
pub enum HostSignal {
    /// An asynchronous result keyed by the integer request code it was
    /// submitted with. The payload is opaque to the core and unused.
    ActivityResult {
        request_code: i64,
        payload: Option<serde_json::Value>,
    },
    /// The host component returned to the foreground.
    Resumed,
    /// The host component moved to the background.
    Paused,
    /// The host component is being torn down.
    Destroyed,
}

pub type HostSignalSender = mpsc::Sender<HostSignal>;
pub type HostSignalReceiver = mpsc::Receiver<HostSignal>;

/// Serialized delivery loop for host signals.
///
/// Activity results are fanned out to both the dispatcher and the permission
/// machine; each consumes only the request codes in its own namespace.
pub struct HostRuntime {
    dispatcher: Arc<OpenDispatcher>,
    permissions: Arc<StorageAccessMachine>,
    signal_rx: HostSignalReceiver,
    shutting_down: bool,
}

impl HostRuntime {
    pub fn new(
        dispatcher: Arc<OpenDispatcher>,
        permissions: Arc<StorageAccessMachine>,
        signal_rx: HostSignalReceiver,
    ) -> Self {
        Self {
            dispatcher,
            permissions,
            signal_rx,
            shutting_down: false,
        }
    }

    /// Run until the host destroys the component or drops the sender.
    pub async fn start(mut self) {
        debug!("host runtime started");
        while !self.shutting_down {
            match self.signal_rx.recv().await {
                Some(signal) => self.handle_signal(signal).await,
                None => break,
            }
        }
        debug!("host runtime stopped");
    }

    async fn handle_signal(&mut self, signal: HostSignal) {
        match signal {
            HostSignal::ActivityResult {
                request_code,
                payload,
            } => {
                trace!(request_code, "activity result delivered");
                self.permissions.handle_result(request_code);
                self.dispatcher.handle_result(request_code, payload);
            }
            HostSignal::Resumed => {
                self.permissions.on_host_resume().await;
            }
            HostSignal::Paused => {
                self.permissions.on_host_pause();
            }
            HostSignal::Destroyed => {
                // No cleanup of outstanding requests happens here; see the
                // permission machine's documented teardown limitation.
                self.permissions.on_host_destroy();
                self.shutting_down = true;
            }
        }
    }
}
