//! Order-independent row matching by fingerprint

use tracing::debug;

use crate::model::{FingerprintIndex, Row, Table};

use super::normalize::normalized_eq;
use super::Difference;

/// Matches rows of two tables as sets keyed by [`RowFingerprint`]
///
/// Rows whose fingerprints coincide are treated as equal. Only the last row
/// per fingerprint is kept, so duplicates collapse into one entry. With
/// `verify_rows` a shared fingerprint must also carry field-by-field equal
/// rows, otherwise both rows are reported missing.
///
/// [`RowFingerprint`]: crate::model::RowFingerprint
#[derive(Debug, Default, Clone, Copy)]
pub struct HashMatcher {
    verify_rows: bool,
}

impl HashMatcher {
    pub fn new(verify_rows: bool) -> Self {
        Self { verify_rows }
    }

    /// Compare two tables ignoring row order
    pub fn compare(&self, table1: &Table, table2: &Table, file_label: &str) -> Vec<Difference> {
        let (index1, index2) = rayon::join(
            || FingerprintIndex::build(table1),
            || FingerprintIndex::build(table2),
        );
        debug!(
            "{}: {} / {} distinct fingerprints",
            file_label,
            index1.len(),
            index2.len()
        );

        let mut differences = Vec::new();
        let mut collisions = Vec::new();

        for (fingerprint, row1) in index1.iter() {
            match index2.get(fingerprint) {
                None => differences.push(missing_in_second(file_label, row1)),
                Some(row2) if self.verify_rows && !rows_equal(row1, row2) => {
                    differences.push(missing_in_second(file_label, row1));
                    collisions.push(row2);
                }
                Some(_) => {}
            }
        }

        for (fingerprint, row2) in index2.iter() {
            if !index1.contains(fingerprint) {
                differences.push(missing_in_first(file_label, row2));
            }
        }
        differences.extend(collisions.into_iter().map(|row2| missing_in_first(file_label, row2)));

        differences
    }
}

fn rows_equal(row1: &Row, row2: &Row) -> bool {
    row1.len() == row2.len()
        && row1
            .fields
            .iter()
            .zip(&row2.fields)
            .all(|(a, b)| normalized_eq(a, b))
}

fn missing_in_second(file_label: &str, row: &Row) -> Difference {
    Difference::RowMissingInSecondFile {
        file: file_label.to_string(),
        row: row.fields.clone(),
    }
}

fn missing_in_first(file_label: &str, row: &Row) -> Difference {
    Difference::RowMissingInFirstFile {
        file: file_label.to_string(),
        row: row.fields.clone(),
    }
}
