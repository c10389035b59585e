//! Plain-text files.

use std::path::Path;

use cvsift_core::Result;

use crate::registry::TextHandler;

/// Reads text files as UTF-8, replacing invalid bytes.
pub struct PlainTextHandler;

impl TextHandler for PlainTextHandler {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extensions(&self) -> &[&'static str] {
        &["txt"]
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        std::fs::write(&path, b"\xef\xbb\xbfJane \xff Smith").unwrap();
        let text = PlainTextHandler.extract(&path).unwrap();
        assert!(text.starts_with("Jane"));
        assert!(text.ends_with("Smith"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(PlainTextHandler.extract(Path::new("/nonexistent/cv.txt")).is_err());
    }
}
