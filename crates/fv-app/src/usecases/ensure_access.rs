//! Ensure the broad storage-access grant, as an awaitable call.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use tokio::sync::oneshot;

use fv_core::StorageAccessMachine;

/// Bridges the permission machine's callback pair into a future.
///
/// `Ok(true)` means granted, `Ok(false)` means the user declined - denial is
/// an outcome, not an error. `Err` is reserved for the consent flow itself
/// failing to launch.
pub struct EnsureStorageAccessUseCase {
    machine: Arc<StorageAccessMachine>,
}

impl EnsureStorageAccessUseCase {
    pub fn new(machine: Arc<StorageAccessMachine>) -> Self {
        Self { machine }
    }

    /// Check the grant, launching the consent flow when absent.
    ///
    /// When the grant is already held this resolves immediately, preserving
    /// the machine's synchronous fast path. When the consent flow is
    /// deferred for lack of a foreground context, the future stays pending
    /// until a host resume retries the launch and a result arrives.
    pub async fn execute(&self) -> Result<bool> {
        let (tx, rx) = oneshot::channel::<Result<bool>>();

        // The machine invokes exactly one of the pair; both closures share
        // the sender and whichever fires first takes it.
        let slot = Arc::new(Mutex::new(Some(tx)));

        let success_slot = slot.clone();
        let on_success = Box::new(move |granted: bool| {
            if let Some(tx) = success_slot.lock().expect("sender slot poisoned").take() {
                let _ = tx.send(Ok(granted));
            }
        });

        let on_error = Box::new(move |message: String| {
            if let Some(tx) = slot.lock().expect("sender slot poisoned").take() {
                let _ = tx.send(Err(anyhow!(message)));
            }
        });

        self.machine.ensure_access(on_error, on_success).await;

        rx.await
            .map_err(|_| anyhow!("permission callbacks dropped without firing"))?
    }
}
