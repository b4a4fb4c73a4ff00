//! Row fingerprints for order-independent matching

use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::diff::normalize;

use super::table::{Row, Table};

/// Separator placed between normalized fields before hashing
pub const FIELD_SEPARATOR: &str = "|";

/// BLAKE3 digest of a row's normalized, pipe-joined fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowFingerprint(blake3::Hash);

impl RowFingerprint {
    /// Fingerprint a row
    pub fn of(row: &Row) -> Self {
        let key = row
            .fields
            .iter()
            .map(|f| normalize(f))
            .collect::<Vec<_>>()
            .join(FIELD_SEPARATOR);
        RowFingerprint(blake3::hash(key.as_bytes()))
    }
}

impl fmt::Display for RowFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Fingerprint → last row carrying it, in order of first appearance
#[derive(Debug)]
pub struct FingerprintIndex<'a> {
    rows: IndexMap<RowFingerprint, &'a Row, FxBuildHasher>,
}

impl<'a> FingerprintIndex<'a> {
    /// Index every row of a table; a later row replaces an earlier one with
    /// the same fingerprint but keeps its position
    pub fn build(table: &'a Table) -> Self {
        let mut rows = IndexMap::with_capacity_and_hasher(table.row_count(), FxBuildHasher);
        for row in &table.rows {
            rows.insert(RowFingerprint::of(row), row);
        }
        Self { rows }
    }

    /// Look up the row stored for a fingerprint
    pub fn get(&self, fingerprint: &RowFingerprint) -> Option<&'a Row> {
        self.rows.get(fingerprint).copied()
    }

    pub fn contains(&self, fingerprint: &RowFingerprint) -> bool {
        self.rows.contains_key(fingerprint)
    }

    /// Entries in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = (&RowFingerprint, &'a Row)> + '_ {
        self.rows.iter().map(|(fp, row)| (fp, *row))
    }

    /// Number of distinct fingerprints
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
