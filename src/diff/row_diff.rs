//! Positional (strict-order) row comparison

use crate::model::{Row, Table};

use super::normalize::normalized_eq;
use super::Difference;

/// Compare two rows at the same position. `row_index` is 0-based.
///
/// A column count mismatch is reported once and ends the comparison for the
/// row; otherwise every differing column is reported.
pub fn compare_row(row1: &Row, row2: &Row, row_index: usize, file_label: &str) -> Vec<Difference> {
    if row1.len() != row2.len() {
        return vec![Difference::ColumnCountMismatch {
            file: file_label.to_string(),
            row: row_index + 1,
            first: row1.len(),
            second: row2.len(),
        }];
    }

    row1.fields
        .iter()
        .zip(&row2.fields)
        .enumerate()
        .filter(|(_, (a, b))| !normalized_eq(a, b))
        .map(|(col, (a, b))| Difference::ValueMismatch {
            file: file_label.to_string(),
            row: row_index + 1,
            column: col + 1,
            first: a.clone(),
            second: b.clone(),
        })
        .collect()
}

/// Compare two tables row by row in file order
///
/// Rows of `table1` with no counterpart in `table2` are reported as missing;
/// extra rows in `table2` are not looked at, callers check row counts first.
pub fn compare_rows_strict(table1: &Table, table2: &Table, file_label: &str) -> Vec<Difference> {
    let mut differences = Vec::new();

    for (index, row1) in table1.rows.iter().enumerate() {
        match table2.row(index) {
            Some(row2) => differences.extend(compare_row(row1, row2, index, file_label)),
            None => differences.push(Difference::MissingRow {
                file: file_label.to_string(),
                index,
            }),
        }
    }

    differences
}
