//! Port definitions - the OS collaborator surface.
//!
//! Each port abstracts one host facility consumed by the core. Production
//! adapters live in `fv-platform`; tests provide hand-written mocks.

mod action;
mod content_index;
mod event_sink;
mod file_stat;
mod mime_table;
mod storage_policy;
mod uri_provider;

pub use action::{ActionPort, SubmittedAction, ViewAction};
pub use content_index::ContentIndexPort;
pub use event_sink::{EventSinkPort, EventStreamPort};
pub use file_stat::FileStatPort;
pub use mime_table::MimeTablePort;
pub use storage_policy::{ConsentLaunch, StoragePolicyPort};
pub use uri_provider::UriProviderPort;
