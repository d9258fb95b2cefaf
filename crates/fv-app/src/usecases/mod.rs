//! Caller-facing use cases.

mod ensure_access;
mod open_file;

pub use ensure_access::EnsureStorageAccessUseCase;
pub use open_file::{normalize_path, OpenFileOptions, OpenFileUseCase, DEFAULT_DIALOG_TITLE};
