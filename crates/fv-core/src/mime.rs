//! MIME classification.
//!
//! A classification is derived fresh per resolver call and never stored.

use serde::{Deserialize, Serialize};

/// Broad content category of a file, derived from its MIME type.
///
/// Each media category selects a dedicated locator-construction strategy;
/// [`MediaKind::Other`] is the explicit unclassified fallback that routes to
/// the generic provider-issued URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Other,
}

impl MediaKind {
    /// Classify an optional MIME type string.
    ///
    /// Absence of a MIME type classifies as [`MediaKind::Other`].
    pub fn classify(mime_type: Option<&str>) -> Self {
        match mime_type {
            Some(m) if m.starts_with("image/") => MediaKind::Image,
            Some(m) if m.starts_with("video/") => MediaKind::Video,
            Some(m) if m.starts_with("audio/") => MediaKind::Audio,
            _ => MediaKind::Other,
        }
    }

    /// Whether this kind is served by the content index rather than the
    /// generic file provider.
    pub fn is_indexed_media(self) -> bool {
        matches!(self, MediaKind::Image | MediaKind::Video | MediaKind::Audio)
    }
}
