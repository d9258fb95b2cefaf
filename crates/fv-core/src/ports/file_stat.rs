//! File stat port - abstracts the existence check for target files.

use std::path::Path;

/// Existence probe for target files.
///
/// This is a blocking call made directly on the caller's thread.
pub trait FileStatPort: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}
