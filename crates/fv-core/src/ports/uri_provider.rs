//! URI provider port - abstracts the host file-provider URI issuance.

use std::path::Path;

use anyhow::Result;

use crate::locator::Locator;

/// Issues a generic, access-scoped locator for a file that is not served by
/// the content index.
pub trait UriProviderPort: Send + Sync {
    fn uri_for_file(&self, path: &Path) -> Result<Locator>;
}
