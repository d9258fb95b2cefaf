//! Open request model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::locator::Locator;

/// Recognized option keys for an open call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenOptions {
    /// Wrap the action in the host's selection prompt instead of launching
    /// the resolved default handler.
    pub show_open_with_dialog: bool,
    /// On a missing handler, launch a best-effort marketplace search for the
    /// file's MIME type before reporting the failure.
    pub show_apps_suggestions: bool,
}

/// One open call, created per call and dropped once its terminal event has
/// been emitted. Never persisted.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub logical_id: i32,
    pub file_path: PathBuf,
    pub mime_type: Option<String>,
    pub locator: Locator,
    pub want_chooser: bool,
    pub want_store_fallback: bool,
    pub dialog_title: Option<String>,
}
