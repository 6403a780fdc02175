use std::collections::HashSet;

use proptest::prelude::*;
use tempfile::TempDir;

use ais_ingest::IngestError;
use ais_validate::{Issue, StructuralValidator, ValidateError, validate_file};

#[test]
fn converted_file_is_valid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("assets_converted.csv");
    std::fs::write(&path, "Item Name,Category,Status\n笔记本,Laptop,Deployed\n").unwrap();

    let validation = validate_file(&path).unwrap();

    assert!(validation.report.is_valid());
    assert_eq!(validation.report.field_count(), 3);
    assert_eq!(validation.encoding, "UTF-8");
}

#[test]
fn file_with_problems_lists_every_issue() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("assets_converted.csv");
    std::fs::write(&path, "Item Name,,Status,Status\n").unwrap();

    let validation = validate_file(&path).unwrap();

    let messages: Vec<String> = validation.report.issues.iter().map(Issue::to_string).collect();
    assert_eq!(
        messages,
        vec![
            "Missing required field: Category",
            "Empty field name at column 2",
            "Duplicate field name: 'Status'",
        ]
    );
}

#[test]
fn semicolon_file_is_read_as_one_column() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("raw.csv");
    std::fs::write(&path, "Item Name;Category\n").unwrap();

    let validation = validate_file(&path).unwrap();

    assert_eq!(validation.report.header, vec!["Item Name;Category"]);
    assert!(!validation.report.is_valid());
}

#[test]
fn empty_file_cannot_be_validated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();

    let result = validate_file(&path);

    assert!(matches!(
        result,
        Err(ValidateError::Ingest(IngestError::EmptyInput))
    ));
}

proptest! {
    #[test]
    fn issue_count_matches_structure(cells in proptest::collection::vec("(Category|Status|Name| |)", 0..8)) {
        let report = StructuralValidator::new().validate_header(&cells);

        let empties = cells.iter().filter(|c| c.trim().is_empty()).count();
        let distinct: HashSet<&String> = cells.iter().collect();
        let repeats = cells.len() - distinct.len();
        let missing = usize::from(!cells.iter().any(|c| c == "Category"));

        prop_assert_eq!(report.issues.len(), missing + empties + repeats);
        prop_assert_eq!(report.is_valid(), missing + empties + repeats == 0);
    }
}
