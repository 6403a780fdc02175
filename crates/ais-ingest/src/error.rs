//! Error types for ingestion.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading, decoding, or parsing input files.
///
/// All of these are per-file failures: a batch records them against the file
/// and moves on.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File name pattern is not a valid glob.
    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // === Encoding Errors ===
    /// No usable encoding could be determined, or the chosen one does not decode the bytes.
    #[error("encoding detection failed: {reason}")]
    EncodingDetection { reason: String },

    /// Explicit encoding label is not supported.
    #[error("unknown encoding: {label}")]
    UnknownEncoding { label: String },

    /// Bytes are not valid UTF-8.
    #[error("file is not valid UTF-8: {message}")]
    NotUtf8 { message: String },

    // === CSV Errors ===
    /// Input produced zero rows.
    #[error("input file is empty")]
    EmptyInput,

    /// Failed to parse CSV text.
    #[error("failed to parse CSV: {message}")]
    CsvParse { message: String },

    /// Failed to write CSV output.
    #[error("failed to write CSV {path}: {message}")]
    CsvWrite { path: PathBuf, message: String },
}

impl IngestError {
    /// Maps an I/O error on read, keeping "not found" distinct.
    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Reads a whole file into memory.
pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| IngestError::read(path, e))
}
