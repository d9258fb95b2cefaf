//! Extension-to-MIME lookup backed by the `mime_guess` table.

use fv_core::ports::MimeTablePort;

/// MIME table adapter over `mime_guess`.
#[derive(Debug, Clone, Default)]
pub struct GuessMimeTable;

impl MimeTablePort for GuessMimeTable {
    fn mime_for_extension(&self, extension: &str) -> Option<String> {
        mime_guess::from_ext(extension)
            .first()
            .map(|mime| mime.essence_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_resolve() {
        let table = GuessMimeTable;
        assert_eq!(
            table.mime_for_extension("pdf").as_deref(),
            Some("application/pdf")
        );
        assert_eq!(table.mime_for_extension("jpg").as_deref(), Some("image/jpeg"));
        assert_eq!(table.mime_for_extension("mp4").as_deref(), Some("video/mp4"));
    }

    #[test]
    fn unknown_extension_resolves_to_none() {
        let table = GuessMimeTable;
        assert_eq!(table.mime_for_extension("zqx9"), None);
    }
}
