//! MIME table port - abstracts the host extension-to-MIME lookup table.

/// Host-provided mapping from file extensions to MIME types.
pub trait MimeTablePort: Send + Sync {
    /// Look up the MIME type for a file extension (without the leading dot).
    ///
    /// Callers pass the extension lowercased; an unrecognized extension
    /// yields `None`.
    fn mime_for_extension(&self, extension: &str) -> Option<String>;
}
