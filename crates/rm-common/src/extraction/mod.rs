//! Text extraction collaborator.
//!
//! Ranking only needs "give me the text behind this path". Failures never cross this
//! boundary: an extractor that cannot produce text returns an empty string and the
//! candidate ends up unscorable.

use std::path::Path;

use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("document path is empty")]
    EmptyPath,
}

/// Turns a document path into plain text. Returns an empty string on any failure.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, file_path: &str) -> String;
}

impl<F> TextExtractor for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn extract_text(&self, file_path: &str) -> String {
        self(file_path)
    }
}

/// Extractor for callers that only rank inline content.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExtractor;

impl TextExtractor for NoopExtractor {
    fn extract_text(&self, _file_path: &str) -> String {
        String::new()
    }
}

/// Reads plain-text documents from the local filesystem.
///
/// Binary containers (`.pdf`, `.doc`, `.docx`, ...) are not converted here; wire a
/// dedicated converter in front of the ranker for those.
#[derive(Debug, Clone)]
pub struct PlainTextFileExtractor {
    extensions: Vec<String>,
}

impl Default for PlainTextFileExtractor {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".into(), "text".into(), "md".into()],
        }
    }
}

impl PlainTextFileExtractor {
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn supports(&self, file_path: &str) -> bool {
        Path::new(file_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    pub fn try_extract(&self, file_path: &str) -> Result<String, ExtractionError> {
        if file_path.trim().is_empty() {
            return Err(ExtractionError::EmptyPath);
        }
        if !self.supports(file_path) {
            return Err(ExtractionError::UnsupportedFormat(file_path.to_string()));
        }

        let bytes = std::fs::read(file_path).map_err(|source| ExtractionError::Io {
            path: file_path.to_string(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl TextExtractor for PlainTextFileExtractor {
    fn extract_text(&self, file_path: &str) -> String {
        match self.try_extract(file_path) {
            Ok(text) => text,
            Err(err @ ExtractionError::UnsupportedFormat(_)) => {
                debug!(file_path, error = %err, "no plain-text extraction for document");
                String::new()
            }
            Err(err) => {
                warn!(file_path, error = %err, "text extraction failed; treating as empty");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn closures_act_as_extractors() {
        let extractor = |path: &str| format!("text of {path}");
        assert_eq!(extractor.extract_text("a.pdf"), "text of a.pdf");
        assert_eq!(NoopExtractor.extract_text("a.pdf"), "");
    }

    #[test]
    fn reads_supported_plain_text_files() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Rust engineer, 5 years of experience").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let extractor = PlainTextFileExtractor::default();
        assert!(extractor.supports(&path));
        assert_eq!(extractor.extract_text(&path), "Rust engineer, 5 years of experience");
    }

    #[test]
    fn unsupported_or_missing_files_yield_empty_text() {
        let extractor = PlainTextFileExtractor::default();

        assert!(matches!(
            extractor.try_extract("resume.pdf"),
            Err(ExtractionError::UnsupportedFormat(_))
        ));
        assert!(matches!(extractor.try_extract("  "), Err(ExtractionError::EmptyPath)));
        assert!(matches!(
            extractor.try_extract("/definitely/not/here.txt"),
            Err(ExtractionError::Io { .. })
        ));

        assert_eq!(extractor.extract_text("resume.pdf"), "");
        assert_eq!(extractor.extract_text("/definitely/not/here.txt"), "");
    }

    #[test]
    fn custom_extensions_are_normalized() {
        let extractor = PlainTextFileExtractor::with_extensions([".CSV", "log"]);
        assert!(extractor.supports("export.csv"));
        assert!(extractor.supports("run.LOG"));
        assert!(!extractor.supports("notes.txt"));
    }
}
