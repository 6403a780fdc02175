//! Structural issue types.

use std::fmt;

use serde::Serialize;

/// A structural problem in a header row. Issues are advisory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Issue {
    /// A required field does not appear verbatim in the header.
    MissingRequiredField { field: String },
    /// Header cell is empty after trimming.
    EmptyHeader {
        /// 1-indexed column position.
        column: usize,
    },
    /// Header string already appeared earlier in the row.
    DuplicateHeader { field: String },
}

impl Issue {
    pub fn message(&self) -> String {
        match self {
            Issue::MissingRequiredField { field } => format!("Missing required field: {field}"),
            Issue::EmptyHeader { column } => format!("Empty field name at column {column}"),
            Issue::DuplicateHeader { field } => format!("Duplicate field name: '{field}'"),
        }
    }

    /// Short machine-readable identifier.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::MissingRequiredField { .. } => "missing-required",
            Issue::EmptyHeader { .. } => "empty-header",
            Issue::DuplicateHeader { .. } => "duplicate-header",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Issue::MissingRequiredField {
                field: "Category".to_string()
            }
            .to_string(),
            "Missing required field: Category"
        );
        assert_eq!(
            Issue::EmptyHeader { column: 3 }.to_string(),
            "Empty field name at column 3"
        );
        assert_eq!(
            Issue::DuplicateHeader {
                field: "Status".to_string()
            }
            .to_string(),
            "Duplicate field name: 'Status'"
        );
    }
}
