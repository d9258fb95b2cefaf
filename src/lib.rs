//! FileViewer
//!
//! Open files with whatever external handler the host resolves, correlate
//! the asynchronous results back to the originating calls, and manage the
//! broad storage-access grant the file operations depend on.

pub mod logging;
pub mod viewer;

// Re-export the surface embedders actually touch.
pub use fv_app::usecases::{OpenFileOptions, DEFAULT_DIALOG_TITLE};
pub use fv_app::{HostSignal, HostSignalSender};
pub use fv_core::{
    PermissionState, ViewerEvent, ACCESS_CONSENT_REQUEST_CODE, REQUEST_CODE_OFFSET,
};
pub use fv_platform::{ConsentScreen, HostPermissionState};
pub use viewer::{FileViewer, FileViewerBuilder};
