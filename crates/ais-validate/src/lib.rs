//! Structural validation of converted asset inventory files.
//!
//! Checks are advisory: they never stop a batch, they only mark a file as
//! needing attention before import.

#![deny(unsafe_code)]

mod error;
mod issue;
mod validator;

// === Error Types ===
pub use error::{Result, ValidateError};

// === Issues ===
pub use issue::Issue;

// === Validation ===
pub use validator::{
    DEFAULT_REQUIRED_FIELDS, FileValidation, StructuralValidator, ValidationReport, validate_file,
};
