//! Media content-index adapters.
//!
//! The in-memory index mirrors a media store: rows registered by a scanner,
//! looked up by exact path plus display name, addressed by per-collection
//! content URIs. The filesystem variant treats every existing file as
//! indexed and mints plain `file://` locators.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use tracing::trace;

use fv_core::mime::MediaKind;
use fv_core::ports::ContentIndexPort;
use fv_core::Locator;

/// One scanned media entry.
#[derive(Debug, Clone)]
pub struct MediaRow {
    pub media_id: i64,
    pub kind: MediaKind,
    pub path: PathBuf,
    pub display_name: String,
}

/// In-memory media index keyed by collection.
///
/// Useful for embedders without a real scanner and for tests. Files never
/// registered here behave exactly like files the scanner has not picked up
/// yet: the lookup finds nothing.
#[derive(Debug, Default)]
pub struct InMemoryContentIndex {
    rows: Mutex<Vec<MediaRow>>,
}

impl InMemoryContentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, row: MediaRow) {
        self.rows.lock().expect("media rows poisoned").push(row);
    }
}

fn collection_segment(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "images",
        MediaKind::Video => "video",
        MediaKind::Audio => "audio",
        MediaKind::Other => "file",
    }
}

#[async_trait]
impl ContentIndexPort for InMemoryContentIndex {
    async fn locate(
        &self,
        kind: MediaKind,
        path: &Path,
        display_name: &str,
    ) -> Result<Option<Locator>> {
        let rows = self.rows.lock().expect("media rows poisoned");
        let mut matches: Vec<&MediaRow> = rows
            .iter()
            .filter(|row| row.kind == kind && row.path == path && row.display_name == display_name)
            .collect();
        // First row in display-name order, matching the query's sort.
        matches.sort_by(|a, b| a.display_name.cmp(&b.display_name).then(a.media_id.cmp(&b.media_id)));

        let located = matches.first().map(|row| {
            Locator::new(format!(
                "content://media/external/{}/media/{}",
                collection_segment(kind),
                row.media_id
            ))
        });
        trace!(?kind, path = %path.display(), found = located.is_some(), "media index lookup");
        Ok(located)
    }
}

/// Content index over the bare filesystem.
///
/// Every file that exists counts as scanned and is addressed by a `file://`
/// locator, so hosts without a media store still resolve indexed media.
#[derive(Debug, Clone, Default)]
pub struct FsContentIndex;

#[async_trait]
impl ContentIndexPort for FsContentIndex {
    async fn locate(
        &self,
        _kind: MediaKind,
        path: &Path,
        _display_name: &str,
    ) -> Result<Option<Locator>> {
        if path.exists() {
            Ok(Some(Locator::new(format!("file://{}", path.display()))))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(media_id: i64, kind: MediaKind, path: &str, display_name: &str) -> MediaRow {
        MediaRow {
            media_id,
            kind,
            path: PathBuf::from(path),
            display_name: display_name.to_string(),
        }
    }

    #[tokio::test]
    async fn finds_the_row_matching_path_and_display_name() {
        let index = InMemoryContentIndex::new();
        index.insert(row(7, MediaKind::Image, "/sdcard/DCIM/a.jpg", "a.jpg"));
        index.insert(row(9, MediaKind::Image, "/sdcard/DCIM/b.jpg", "b.jpg"));

        let located = index
            .locate(MediaKind::Image, Path::new("/sdcard/DCIM/b.jpg"), "b.jpg")
            .await
            .unwrap();

        assert_eq!(
            located.unwrap().as_str(),
            "content://media/external/images/media/9"
        );
    }

    #[tokio::test]
    async fn unscanned_file_yields_none() {
        let index = InMemoryContentIndex::new();
        let located = index
            .locate(MediaKind::Video, Path::new("/sdcard/Movies/new.mp4"), "new.mp4")
            .await
            .unwrap();
        assert!(located.is_none());
    }

    #[tokio::test]
    async fn kind_mismatch_yields_none() {
        let index = InMemoryContentIndex::new();
        index.insert(row(3, MediaKind::Audio, "/sdcard/Music/track.mp3", "track.mp3"));

        let located = index
            .locate(MediaKind::Video, Path::new("/sdcard/Music/track.mp3"), "track.mp3")
            .await
            .unwrap();
        assert!(located.is_none());
    }

    #[tokio::test]
    async fn duplicate_rows_resolve_to_the_lowest_id() {
        let index = InMemoryContentIndex::new();
        index.insert(row(12, MediaKind::Image, "/sdcard/DCIM/a.jpg", "a.jpg"));
        index.insert(row(4, MediaKind::Image, "/sdcard/DCIM/a.jpg", "a.jpg"));

        let located = index
            .locate(MediaKind::Image, Path::new("/sdcard/DCIM/a.jpg"), "a.jpg")
            .await
            .unwrap();
        assert_eq!(
            located.unwrap().as_str(),
            "content://media/external/images/media/4"
        );
    }

    #[tokio::test]
    async fn fs_index_tracks_file_existence() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("photo.jpg");
        std::fs::write(&file, b"jpeg").unwrap();

        let index = FsContentIndex;
        let located = index
            .locate(MediaKind::Image, &file, "photo.jpg")
            .await
            .unwrap();
        assert!(located.unwrap().as_str().starts_with("file://"));

        let missing = index
            .locate(MediaKind::Image, &dir.path().join("gone.jpg"), "gone.jpg")
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
