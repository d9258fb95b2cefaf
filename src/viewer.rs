//! Wired-up viewer facade.
//!
//! [`FileViewerBuilder`] assembles the default adapter set, spawns the
//! host-signal runtime, and hands back a [`FileViewer`] whose calls go
//! through the use-case layer. Every adapter can be swapped before `build`,
//! which is how embedders plug in a real host and tests plug in scripted
//! ones.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use fv_app::usecases::{EnsureStorageAccessUseCase, OpenFileOptions, OpenFileUseCase};
use fv_app::{HostRuntime, HostSignal, HostSignalSender};
use fv_core::locator::MediaResolver;
use fv_core::ports::{
    ActionPort, ContentIndexPort, EventSinkPort, EventStreamPort, FileStatPort, MimeTablePort,
    StoragePolicyPort, UriProviderPort,
};
use fv_core::{OpenDispatcher, PermissionState, StorageAccessMachine, ViewerEvent};
use fv_platform::{
    select_storage_policy, BroadcastEventBus, FileProviderUri, FsContentIndex, GuessMimeTable,
    HostPermissionState, ProcessOpener, ResultNotifier, StdFileStat,
};

const DEFAULT_AUTHORITY: &str = "org.fileviewer.provider";
const SIGNAL_QUEUE_CAPACITY: usize = 32;
const EVENT_BUS_CAPACITY: usize = 64;

/// Builder for [`FileViewer`]. Unset adapters fall back to the platform
/// defaults in `fv-platform`.
#[derive(Default)]
pub struct FileViewerBuilder {
    authority: Option<String>,
    managed_storage: Option<bool>,
    permission_host: Option<Arc<HostPermissionState>>,
    mime_table: Option<Arc<dyn MimeTablePort>>,
    content_index: Option<Arc<dyn ContentIndexPort>>,
    uri_provider: Option<Arc<dyn UriProviderPort>>,
    file_stat: Option<Arc<dyn FileStatPort>>,
    actions: Option<Arc<dyn ActionPort>>,
    storage_policy: Option<Arc<dyn StoragePolicyPort>>,
}

impl FileViewerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authority for content URIs minted for non-media files.
    pub fn authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    /// Whether the host manages storage with a single full-access flag
    /// instead of separate read/write grants. Defaults to managed.
    pub fn managed_storage(mut self, managed: bool) -> Self {
        self.managed_storage = Some(managed);
        self
    }

    pub fn permission_host(mut self, host: Arc<HostPermissionState>) -> Self {
        self.permission_host = Some(host);
        self
    }

    pub fn mime_table(mut self, table: Arc<dyn MimeTablePort>) -> Self {
        self.mime_table = Some(table);
        self
    }

    pub fn content_index(mut self, index: Arc<dyn ContentIndexPort>) -> Self {
        self.content_index = Some(index);
        self
    }

    pub fn uri_provider(mut self, provider: Arc<dyn UriProviderPort>) -> Self {
        self.uri_provider = Some(provider);
        self
    }

    pub fn file_stat(mut self, stat: Arc<dyn FileStatPort>) -> Self {
        self.file_stat = Some(stat);
        self
    }

    pub fn actions(mut self, actions: Arc<dyn ActionPort>) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn storage_policy(mut self, policy: Arc<dyn StoragePolicyPort>) -> Self {
        self.storage_policy = Some(policy);
        self
    }

    /// Wire the adapters together and spawn the host-signal runtime.
    ///
    /// Must run inside a tokio runtime.
    pub fn build(self) -> FileViewer {
        let bus = Arc::new(BroadcastEventBus::new(EVENT_BUS_CAPACITY));
        let (signal_tx, signal_rx) = mpsc::channel(SIGNAL_QUEUE_CAPACITY);

        let authority = self.authority.unwrap_or_else(|| DEFAULT_AUTHORITY.to_string());
        let host = self.permission_host.unwrap_or_else(HostPermissionState::new);

        let mime_table = self
            .mime_table
            .unwrap_or_else(|| Arc::new(GuessMimeTable));
        let content_index = self
            .content_index
            .unwrap_or_else(|| Arc::new(FsContentIndex));
        let uri_provider = self
            .uri_provider
            .unwrap_or_else(|| Arc::new(FileProviderUri::new(authority)));
        let file_stat = self.file_stat.unwrap_or_else(|| Arc::new(StdFileStat));
        let actions = self.actions.unwrap_or_else(|| {
            let tx = signal_tx.clone();
            let notifier: ResultNotifier = Arc::new(move |request_code| {
                let _ = tx.try_send(HostSignal::ActivityResult {
                    request_code,
                    payload: None,
                });
            });
            Arc::new(ProcessOpener::new(notifier))
        });
        let storage_policy = self.storage_policy.unwrap_or_else(|| {
            select_storage_policy(host.clone(), self.managed_storage.unwrap_or(true))
        });

        let resolver = MediaResolver::new(mime_table, content_index, uri_provider);
        let events: Arc<dyn EventSinkPort> = bus.clone();
        let dispatcher = Arc::new(OpenDispatcher::new(resolver, file_stat, actions, events));
        let permissions = Arc::new(StorageAccessMachine::new(storage_policy));

        let runtime = HostRuntime::new(dispatcher.clone(), permissions.clone(), signal_rx);
        let runtime_handle = tokio::spawn(runtime.start());

        let stream: Arc<dyn EventStreamPort> = bus;
        FileViewer {
            open: OpenFileUseCase::new(dispatcher, stream.clone()),
            access: EnsureStorageAccessUseCase::new(permissions.clone()),
            permissions,
            permission_host: host,
            events: stream,
            signals: signal_tx,
            runtime: runtime_handle,
        }
    }
}

/// The assembled viewer.
pub struct FileViewer {
    open: OpenFileUseCase,
    access: EnsureStorageAccessUseCase,
    permissions: Arc<StorageAccessMachine>,
    permission_host: Arc<HostPermissionState>,
    events: Arc<dyn EventStreamPort>,
    signals: HostSignalSender,
    runtime: JoinHandle<()>,
}

impl FileViewer {
    pub fn builder() -> FileViewerBuilder {
        FileViewerBuilder::new()
    }

    /// Open a file with an external handler and await the handoff outcome.
    pub async fn open(&self, path: &str, options: OpenFileOptions) -> Result<()> {
        self.open.execute(path, options).await
    }

    /// Ensure the broad storage grant, prompting the user when needed.
    pub async fn ensure_storage_access(&self) -> Result<bool> {
        self.access.execute().await
    }

    /// Subscribe to viewer lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewerEvent> {
        self.events.subscribe()
    }

    /// Sender for host lifecycle and result signals.
    pub fn host_signals(&self) -> HostSignalSender {
        self.signals.clone()
    }

    /// Current storage-permission state.
    pub fn storage_state(&self) -> PermissionState {
        self.permissions.state()
    }

    /// The simulated permission host wired in by default. Custom storage
    /// policies bypass it.
    pub fn permission_host(&self) -> Arc<HostPermissionState> {
        self.permission_host.clone()
    }

    /// Deliver the destroy signal and wait for the runtime to drain.
    pub async fn shutdown(self) {
        let _ = self.signals.send(HostSignal::Destroyed).await;
        let _ = self.runtime.await;
    }
}
