//! File discovery for batch folders.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{IngestError, Result};

/// Pattern used when the caller does not give one.
pub const DEFAULT_PATTERN: &str = "*.csv";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Lists regular files directly inside `dir` whose name matches the glob
/// `pattern`.
///
/// Returns files sorted by filename.
pub fn discover_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Pattern::new(pattern).map_err(|e| IngestError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.msg.to_string(),
    })?;

    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| matcher.matches_with(name, MATCH_OPTIONS));
        if matches {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!(
        dir = %dir.display(),
        pattern,
        count = files.len(),
        "discovered files"
    );
    Ok(files)
}

/// Lists CSV files in `dir` using [`DEFAULT_PATTERN`].
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    discover_files(dir, DEFAULT_PATTERN)
}
