//! MIME/URI resolution.
//!
//! Given a file path, determine its content type and produce an
//! access-scoped locator the host will accept for that type of content.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mime::MediaKind;
use crate::ports::{ContentIndexPort, MimeTablePort, UriProviderPort};

/// An opaque, access-scoped URI issued by the host for a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator(String);

impl Locator {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of resolving a file path.
///
/// `locator: None` means the host could not produce a locator, typically
/// because a just-created file has not been scanned into the content index
/// yet. Resolution failures are never retried here; the dispatcher decides
/// what to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub mime_type: Option<String>,
    pub locator: Option<Locator>,
}

/// Resolves a file path into a MIME type and a locator.
pub struct MediaResolver {
    mime_table: Arc<dyn MimeTablePort>,
    content_index: Arc<dyn ContentIndexPort>,
    uri_provider: Arc<dyn UriProviderPort>,
}

impl MediaResolver {
    pub fn new(
        mime_table: Arc<dyn MimeTablePort>,
        content_index: Arc<dyn ContentIndexPort>,
        uri_provider: Arc<dyn UriProviderPort>,
    ) -> Self {
        Self {
            mime_table,
            content_index,
            uri_provider,
        }
    }

    /// Derive the MIME type from the file extension and build a locator via
    /// the strategy selected by the MIME classification.
    ///
    /// Image, video and audio paths query the content index; anything else
    /// falls back to a generic provider-issued URI scoped to the file.
    pub async fn resolve(&self, path: &Path) -> Resolution {
        let mime_type = self.mime_for_path(path);
        let kind = MediaKind::classify(mime_type.as_deref());

        let locator = if kind.is_indexed_media() {
            let display_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match self.content_index.locate(kind, path, &display_name).await {
                Ok(locator) => locator,
                Err(error) => {
                    debug!(path = %path.display(), %error, "content index lookup failed");
                    None
                }
            }
        } else {
            match self.uri_provider.uri_for_file(path) {
                Ok(locator) => Some(locator),
                Err(error) => {
                    debug!(path = %path.display(), %error, "provider refused to issue a uri");
                    None
                }
            }
        };

        Resolution { mime_type, locator }
    }

    fn mime_for_path(&self, path: &Path) -> Option<String> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        self.mime_table.mime_for_extension(&extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct FixedMimeTable;

    impl MimeTablePort for FixedMimeTable {
        fn mime_for_extension(&self, extension: &str) -> Option<String> {
            match extension {
                "jpg" => Some("image/jpeg".into()),
                "mp4" => Some("video/mp4".into()),
                "pdf" => Some("application/pdf".into()),
                _ => None,
            }
        }
    }

    struct ScriptedIndex {
        result: Option<Locator>,
        fail: bool,
    }

    #[async_trait]
    impl ContentIndexPort for ScriptedIndex {
        async fn locate(
            &self,
            _kind: MediaKind,
            _path: &Path,
            _display_name: &str,
        ) -> Result<Option<Locator>> {
            if self.fail {
                return Err(anyhow!("index offline"));
            }
            Ok(self.result.clone())
        }
    }

    struct PathUriProvider;

    impl UriProviderPort for PathUriProvider {
        fn uri_for_file(&self, path: &Path) -> Result<Locator> {
            Ok(Locator::new(format!("content://files{}", path.display())))
        }
    }

    fn resolver(index: ScriptedIndex) -> MediaResolver {
        MediaResolver::new(
            Arc::new(FixedMimeTable),
            Arc::new(index),
            Arc::new(PathUriProvider),
        )
    }

    #[tokio::test]
    async fn media_path_resolves_through_content_index() {
        let resolver = resolver(ScriptedIndex {
            result: Some(Locator::new("content://media/external/images/media/7")),
            fail: false,
        });

        let resolution = resolver.resolve(&PathBuf::from("/pics/cat.jpg")).await;

        assert_eq!(resolution.mime_type.as_deref(), Some("image/jpeg"));
        assert_eq!(
            resolution.locator,
            Some(Locator::new("content://media/external/images/media/7"))
        );
    }

    #[tokio::test]
    async fn unscanned_media_yields_no_locator() {
        let resolver = resolver(ScriptedIndex {
            result: None,
            fail: false,
        });

        let resolution = resolver.resolve(&PathBuf::from("/pics/new.jpg")).await;

        assert_eq!(resolution.mime_type.as_deref(), Some("image/jpeg"));
        assert_eq!(resolution.locator, None);
    }

    #[tokio::test]
    async fn index_error_surfaces_as_missing_locator_not_a_failure() {
        let resolver = resolver(ScriptedIndex {
            result: None,
            fail: true,
        });

        let resolution = resolver.resolve(&PathBuf::from("/clips/take.mp4")).await;

        assert_eq!(resolution.mime_type.as_deref(), Some("video/mp4"));
        assert_eq!(resolution.locator, None);
    }

    #[tokio::test]
    async fn non_media_path_falls_back_to_provider_uri() {
        let resolver = resolver(ScriptedIndex {
            result: None,
            fail: false,
        });

        let resolution = resolver.resolve(&PathBuf::from("/docs/report.pdf")).await;

        assert_eq!(resolution.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(
            resolution.locator,
            Some(Locator::new("content://files/docs/report.pdf"))
        );
    }

    #[tokio::test]
    async fn unknown_extension_has_no_mime_but_still_gets_provider_uri() {
        let resolver = resolver(ScriptedIndex {
            result: None,
            fail: false,
        });

        let resolution = resolver.resolve(&PathBuf::from("/tmp/blob.xyz")).await;

        assert_eq!(resolution.mime_type, None);
        assert!(resolution.locator.is_some());
    }
}
