//! Filesystem-backed file stat adapter.

use std::path::Path;

use fv_core::ports::FileStatPort;

/// Existence checks straight against the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct StdFileStat;

impl FileStatPort for StdFileStat {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
