//! Storage access state machine.
//!
//! Holds at most one consent request in flight plus one deferred-retry flag,
//! and resumes safely across the host component's foreground/background
//! transitions.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::permission::PermissionState;
use crate::ports::{ConsentLaunch, StoragePolicyPort};

/// Fixed request code the consent flow is tagged with. Distinct from the
/// dispatcher's id-derived code namespace.
pub const ACCESS_CONSENT_REQUEST_CODE: i64 = 2_296;

/// Invoked with the grant outcome. Denial is `on_success(false)`, never an
/// error.
pub type SuccessCallback = Box<dyn FnOnce(bool) + Send>;

/// Invoked with a descriptive message when the consent flow itself fails to
/// launch.
pub type ErrorCallback = Box<dyn FnOnce(String) + Send>;

struct PendingPair {
    on_error: ErrorCallback,
    on_success: SuccessCallback,
}

struct MachineInner {
    state: PermissionState,
    pending: Option<PendingPair>,
    deferred: bool,
}

/// Single-slot acquisition machine for the broad storage-access grant.
///
/// At most one pending callback pair is held; a second concurrent
/// `ensure_access` overwrites the earlier pair rather than queuing (last
/// writer wins - racing callers lose the earlier caller's callback, a known
/// limitation of the single-slot design). Pause and destroy are explicit
/// no-ops, so a pending pair leaks if the host component is torn down while
/// a request is in flight.
pub struct StorageAccessMachine {
    policy: Arc<dyn StoragePolicyPort>,
    inner: Mutex<MachineInner>,
}

impl StorageAccessMachine {
    pub fn new(policy: Arc<dyn StoragePolicyPort>) -> Self {
        Self {
            policy,
            inner: Mutex::new(MachineInner {
                state: PermissionState::Unknown,
                pending: None,
                deferred: false,
            }),
        }
    }

    /// Check the grant and, if absent, run the consent flow.
    ///
    /// When the grant is already held, `on_success(true)` is invoked
    /// synchronously with zero state transitions. Otherwise the pair is
    /// parked and answered once the host delivers the consent result.
    pub async fn ensure_access(&self, on_error: ErrorCallback, on_success: SuccessCallback) {
        if self.policy.is_granted() {
            on_success(true);
            return;
        }

        {
            let mut inner = self.inner.lock().expect("permission state poisoned");
            if inner.pending.is_some() {
                warn!("overwriting pending permission callbacks (last writer wins)");
            }
            inner.pending = Some(PendingPair {
                on_error,
                on_success,
            });
            inner.state = PermissionState::RequestInFlight;
        }

        self.launch_consent().await;
    }

    async fn launch_consent(&self) {
        match self
            .policy
            .request_consent(ACCESS_CONSENT_REQUEST_CODE)
            .await
        {
            Ok(ConsentLaunch::Launched) => {
                debug!(code = ACCESS_CONSENT_REQUEST_CODE, "consent flow launched");
            }
            Ok(ConsentLaunch::NoForegroundContext) => {
                let mut inner = self.inner.lock().expect("permission state poisoned");
                inner.deferred = true;
                inner.state = PermissionState::RequestDeferred;
                debug!("no foreground context, consent deferred until host resume");
            }
            Err(error) => {
                let pair = {
                    let mut inner = self.inner.lock().expect("permission state poisoned");
                    inner.state = PermissionState::Unknown;
                    inner.deferred = false;
                    inner.pending.take()
                };
                if let Some(pair) = pair {
                    (pair.on_error)(error.to_string());
                }
            }
        }
    }

    /// Consume a host result delivery for the fixed consent request code.
    ///
    /// Other codes belong to the dispatcher's namespace and are ignored.
    pub fn handle_result(&self, request_code: i64) {
        if request_code != ACCESS_CONSENT_REQUEST_CODE {
            return;
        }

        let granted = self.policy.is_granted();
        let pair = {
            let mut inner = self.inner.lock().expect("permission state poisoned");
            inner.state = if granted {
                PermissionState::Granted
            } else {
                PermissionState::Unknown
            };
            inner.deferred = false;
            inner.pending.take()
        };

        if let Some(pair) = pair {
            (pair.on_success)(granted);
        }
    }

    /// Retry a deferred consent launch, exactly once. The only automatic
    /// retry in the system.
    pub async fn on_host_resume(&self) {
        let retry = {
            let mut inner = self.inner.lock().expect("permission state poisoned");
            if inner.deferred {
                inner.deferred = false;
                inner.state = PermissionState::RequestInFlight;
                true
            } else {
                false
            }
        };

        if retry {
            self.launch_consent().await;
        }
    }

    /// Explicit no-op: nothing is cleaned up when the host backgrounds.
    pub fn on_host_pause(&self) {}

    /// Explicit no-op: a pending pair is not cancelled on teardown and will
    /// never be invoked. Inherent limitation of the single-slot design.
    pub fn on_host_destroy(&self) {}

    pub fn state(&self) -> PermissionState {
        self.inner.lock().expect("permission state poisoned").state
    }
}
