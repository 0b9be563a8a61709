//! Error types for student record operations.

use crate::document::DocumentError;
use crate::validation::ValidationErrors;

/// Error type for `StudentService` operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Submitted fields failed validation; the form should be shown again.
    #[error("validation failed: {0}")]
    Invalid(ValidationErrors),
    /// No record with this nim (or id).
    #[error("mahasiswa not found: {0}")]
    NotFound(String),
    /// The document store failed.
    #[error("document store error: {0}")]
    Store(#[from] DocumentError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}
