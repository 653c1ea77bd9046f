//! Storage-specific error type wrapping IO and JSON failures.

use greenhub_domain::error::GreenhubError;

/// Errors originating from the JSON file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing a document file failed.
    #[error("storage io error")]
    Io(#[from] std::io::Error),

    /// Serializing a document failed.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),
}

impl From<StorageError> for GreenhubError {
    fn from(err: StorageError) -> Self {
        Self::Persistence(Box::new(err))
    }
}
