#![allow(dead_code)]

use thiserror::Error;

/// Engine-level error type.
///
/// Extraction misses (an email or degree that simply fails to match) are not
/// errors; they surface as `None` fields. Only collaborator failures and
/// unsupported inputs land here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),
}
