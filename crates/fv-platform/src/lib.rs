//! # fv-platform
//!
//! Host-facing adapter implementations for FileViewer.
//!
//! This crate contains the infrastructure side of the ports defined in
//! `fv-core`: MIME resolution, the media content index, URI minting, the
//! external-handler opener, the event bus, and the storage-consent host.

pub mod consent;
pub mod content_index;
pub mod event_bus;
pub mod fs;
pub mod mime_table;
pub mod opener;
pub mod uri;

pub use consent::{
    select_storage_policy, ConsentLaunchRecord, ConsentScreen, HostPermissionState,
    LegacyGrantsPolicy, ManagedStoragePolicy, LEGACY_PROMPT_REQUEST_CODE,
};
pub use content_index::{FsContentIndex, InMemoryContentIndex, MediaRow};
pub use event_bus::BroadcastEventBus;
pub use fs::StdFileStat;
pub use mime_table::GuessMimeTable;
pub use opener::{ProcessOpener, ResultNotifier};
pub use uri::FileProviderUri;
