//! Error types for validation.

use ais_ingest::IngestError;
use thiserror::Error;

/// The file could not be checked at all.
///
/// Structural problems are not errors; they are [`Issue`](crate::Issue)s.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
