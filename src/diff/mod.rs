//! Diff engine for comparing CSV files

mod hash_diff;
mod normalize;
mod row_diff;

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::config::ComparisonMode;
use crate::error::Result;
use crate::model::Table;
use crate::parser::CsvParser;

pub use hash_diff::HashMatcher;
pub use normalize::{normalize, normalized_eq};
pub use row_diff::{compare_row, compare_rows_strict};

/// Separator used when a whole row is shown in a message
pub const ROW_DISPLAY_SEPARATOR: &str = ", ";

/// One discrepancy between the two trees
///
/// Row and column numbers are 1-based, except `MissingRow::index`, which is
/// the 0-based position of the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Difference {
    /// Entry exists in the first tree only; `path` is where it was expected
    MissingInSecondDir { path: String },
    /// Entry exists in the second tree only; `path` is where it was expected
    MissingInFirstDir { path: String },
    /// Entry is a directory in one tree and a file in the other
    EntryKindMismatch { first: String, second: String },
    /// Files have a different number of rows
    RowCountMismatch {
        file: String,
        first: usize,
        second: usize,
    },
    /// Row at `index` of the first file has no counterpart in the second
    MissingRow { file: String, index: usize },
    /// Rows at the same position have a different number of fields
    ColumnCountMismatch {
        file: String,
        row: usize,
        first: usize,
        second: usize,
    },
    /// Field differs after normalization; raw values are kept
    ValueMismatch {
        file: String,
        row: usize,
        column: usize,
        first: String,
        second: String,
    },
    /// Row of the first file not found in the second (hash-based mode)
    RowMissingInSecondFile { file: String, row: Vec<String> },
    /// Row of the second file not found in the first (hash-based mode)
    RowMissingInFirstFile { file: String, row: Vec<String> },
    /// CSV file could not be read (partial-failure mode)
    Unreadable { path: String, reason: String },
}

impl std::fmt::Display for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difference::MissingInSecondDir { path } => {
                write!(f, "File missing in second directory: {}", path)
            }
            Difference::MissingInFirstDir { path } => {
                write!(f, "File missing in first directory: {}", path)
            }
            Difference::EntryKindMismatch { first, second } => {
                write!(
                    f,
                    "Entry is a directory on one side and a file on the other: {} vs {}",
                    first, second
                )
            }
            Difference::RowCountMismatch {
                file,
                first,
                second,
            } => {
                write!(f, "Row count mismatch in {}: {} vs {} rows", file, first, second)
            }
            Difference::MissingRow { file, index } => {
                write!(f, "Missing row at index {} in {}", index, file)
            }
            Difference::ColumnCountMismatch {
                file,
                row,
                first,
                second,
            } => {
                write!(
                    f,
                    "Column count mismatch at row {} in {}: {} vs {} columns",
                    row, file, first, second
                )
            }
            Difference::ValueMismatch {
                file,
                row,
                column,
                first,
                second,
            } => {
                write!(
                    f,
                    "Value mismatch in {}, row {}, column {}: '{}' vs '{}'",
                    file, row, column, first, second
                )
            }
            Difference::RowMissingInSecondFile { file, row } => {
                write!(
                    f,
                    "Row missing in second file {}: {}",
                    file,
                    row.join(ROW_DISPLAY_SEPARATOR)
                )
            }
            Difference::RowMissingInFirstFile { file, row } => {
                write!(
                    f,
                    "Row missing in first file {}: {}",
                    file,
                    row.join(ROW_DISPLAY_SEPARATOR)
                )
            }
            Difference::Unreadable { path, reason } => {
                write!(f, "Unable to compare {}: {}", path, reason)
            }
        }
    }
}

/// Compares pairs of CSV files under one matching strategy
#[derive(Debug, Clone)]
pub struct FileComparator {
    mode: ComparisonMode,
    verify_rows: bool,
    parser: CsvParser,
}

impl FileComparator {
    /// Create a comparator for a mode
    pub fn new(mode: ComparisonMode) -> Self {
        Self {
            mode,
            verify_rows: false,
            parser: CsvParser::new(),
        }
    }

    /// Re-check rows whose fingerprints match (hash-based mode only)
    pub fn with_verify_rows(mut self, verify: bool) -> Self {
        self.verify_rows = verify;
        self
    }

    /// Read and compare two files; `label` names the pair in messages
    pub fn compare_files(&self, path1: &Path, path2: &Path, label: &str) -> Result<Vec<Difference>> {
        let table1 = self.parser.parse(path1)?;
        let table2 = self.parser.parse(path2)?;
        debug!(
            "Comparing {} ({} rows) with {} ({} rows)",
            path1.display(),
            table1.row_count(),
            path2.display(),
            table2.row_count()
        );
        Ok(self.compare_tables(&table1, &table2, label))
    }

    /// Compare two already parsed tables
    pub fn compare_tables(&self, table1: &Table, table2: &Table, label: &str) -> Vec<Difference> {
        if table1.row_count() != table2.row_count() {
            return vec![Difference::RowCountMismatch {
                file: label.to_string(),
                first: table1.row_count(),
                second: table2.row_count(),
            }];
        }

        match self.mode {
            ComparisonMode::StrictOrder => compare_rows_strict(table1, table2, label),
            ComparisonMode::HashBased => {
                HashMatcher::new(self.verify_rows).compare(table1, table2, label)
            }
        }
    }
}

/// Convenience function to compare two CSV files, labelled by the first
/// file's name
pub fn compare_files(path1: &Path, path2: &Path, mode: ComparisonMode) -> Result<Vec<Difference>> {
    let label = path1
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path1.display().to_string());
    FileComparator::new(mode).compare_files(path1, path2, &label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_row_count_mismatch_is_the_only_difference() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.csv", "1,x\n2,y\n3,z\n");
        let b = write(&dir, "b.csv", "9,x\n8,y\n7,z\n6,w\n");

        for mode in [ComparisonMode::StrictOrder, ComparisonMode::HashBased] {
            let diffs = compare_files(&a, &b, mode).unwrap();
            assert_eq!(
                diffs,
                vec![Difference::RowCountMismatch {
                    file: "a.csv".into(),
                    first: 3,
                    second: 4,
                }]
            );
        }
    }

    #[test]
    fn test_blank_line_inside_file_changes_row_count() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.csv", "a\n\nb\n");
        let b = write(&dir, "b.csv", "a\nb\n");

        let diffs = compare_files(&a, &b, ComparisonMode::HashBased).unwrap();
        assert_eq!(
            diffs,
            vec![Difference::RowCountMismatch {
                file: "a.csv".into(),
                first: 3,
                second: 2,
            }]
        );
    }

    #[test]
    fn test_reordered_rows_by_mode() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.csv", "id,name\n1,alice\n2,bob\n");
        let b = write(&dir, "b.csv", "id,name\n2,bob\n1,alice\n");

        let strict = compare_files(&a, &b, ComparisonMode::StrictOrder).unwrap();
        assert_eq!(strict.len(), 4);

        let hashed = compare_files(&a, &b, ComparisonMode::HashBased).unwrap();
        assert!(hashed.is_empty());
    }

    #[test]
    fn test_self_comparison_is_clean() {
        let dir = TempDir::new().unwrap();
        let a = write(
            &dir,
            "a.csv",
            "id,note\n1,\"comma, inside\"\n2,\"multi\nline\"\n3,\"quote \\\" here\"\n",
        );

        for mode in [ComparisonMode::StrictOrder, ComparisonMode::HashBased] {
            assert!(compare_files(&a, &a, mode).unwrap().is_empty());
        }
    }

    #[test]
    fn test_case_and_whitespace_are_ignored() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.csv", "\" Foo \",1\n");
        let b = write(&dir, "b.csv", "foo,1\n");

        for mode in [ComparisonMode::StrictOrder, ComparisonMode::HashBased] {
            assert!(compare_files(&a, &b, mode).unwrap().is_empty());
        }
    }

    #[test]
    fn test_read_error_propagates() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.csv", "1\n");
        let missing = dir.path().join("missing.csv");
        assert!(compare_files(&a, &missing, ComparisonMode::HashBased).is_err());
    }

    #[test]
    fn test_json_shape() {
        let diff = Difference::ValueMismatch {
            file: "a.csv".into(),
            row: 2,
            column: 3,
            first: "x".into(),
            second: "y".into(),
        };
        let value = serde_json::to_value(&diff).unwrap();
        assert_eq!(value["kind"], "value_mismatch");
        assert_eq!(value["column"], 3);
    }
}
