//! Text-source collaborator contract. The engine only requires line-broken
//! plain text; document-format readers (PDF/DOCX) live behind this trait in
//! other services. The bundled implementation reads `.txt` files.

use std::fs;
use std::path::Path;

use crate::errors::EngineError;

pub trait TextSource {
    /// Yields line-broken plain text for the document at `path`.
    /// Unsupported formats are propagated unmodified, never retried.
    fn extract_text(&self, path: &Path) -> Result<String, EngineError>;
}

/// Plain-text file reader.
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extract_text(&self, path: &Path) -> Result<String, EngineError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match extension.as_str() {
            "txt" | "text" => Ok(fs::read_to_string(path)?),
            other => Err(EngineError::UnsupportedFormat(format!(
                "'{other}' (only plain-text documents are supported here)"
            ))),
        }
    }
}
