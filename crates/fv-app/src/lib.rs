//! # fv-app
//!
//! Application orchestration layer for FileViewer: the caller-facing use
//! cases and the serialized host-signal runtime.

pub mod runtime;
pub mod usecases;

pub use runtime::{HostRuntime, HostSignal, HostSignalReceiver, HostSignalSender};
pub use usecases::{EnsureStorageAccessUseCase, OpenFileOptions, OpenFileUseCase};
