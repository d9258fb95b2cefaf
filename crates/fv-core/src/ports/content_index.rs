//! Content index port - abstracts the host media index query API.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::locator::Locator;
use crate::mime::MediaKind;

/// Query interface over the host's media content index.
///
/// Implementations filter on exact absolute path and exact display name and
/// return the first match ordered by display name ascending (an arbitrary but
/// deterministic tie-break). A file the index has not yet scanned produces
/// `Ok(None)`; the index's own scanning/rescanning is not this crate's
/// concern.
#[async_trait]
pub trait ContentIndexPort: Send + Sync {
    async fn locate(
        &self,
        kind: MediaKind,
        path: &Path,
        display_name: &str,
    ) -> Result<Option<Locator>>;
}
