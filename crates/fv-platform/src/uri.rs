//! Authority-scoped content URI minting for plain files.

use std::path::{Component, Path};

use anyhow::{anyhow, Result};

use fv_core::ports::UriProviderPort;
use fv_core::Locator;

/// Mints `content://<authority>/<path>` locators for files that are not in
/// any media collection. Each path segment is percent-encoded on its own so
/// separators survive intact.
#[derive(Debug, Clone)]
pub struct FileProviderUri {
    authority: String,
}

impl FileProviderUri {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }
}

impl UriProviderPort for FileProviderUri {
    fn uri_for_file(&self, path: &Path) -> Result<Locator> {
        let mut uri = format!("content://{}", self.authority);
        for component in path.components() {
            match component {
                Component::RootDir | Component::Prefix(_) => {}
                Component::Normal(segment) => {
                    let segment = segment
                        .to_str()
                        .ok_or_else(|| anyhow!("path segment is not valid UTF-8"))?;
                    uri.push('/');
                    uri.push_str(&urlencoding::encode(segment));
                }
                Component::CurDir | Component::ParentDir => {
                    return Err(anyhow!(
                        "relative component in path: {}",
                        path.display()
                    ));
                }
            }
        }
        Ok(Locator::new(uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_each_segment_separately() {
        let provider = FileProviderUri::new("com.example.files.provider");
        let locator = provider
            .uri_for_file(Path::new("/sdcard/My Docs/report v2.pdf"))
            .unwrap();
        assert_eq!(
            locator.as_str(),
            "content://com.example.files.provider/sdcard/My%20Docs/report%20v2.pdf"
        );
    }

    #[test]
    fn rejects_relative_components() {
        let provider = FileProviderUri::new("com.example.files.provider");
        assert!(provider
            .uri_for_file(Path::new("/sdcard/../etc/passwd"))
            .is_err());
    }
}
