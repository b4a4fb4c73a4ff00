//! Data model for parsed CSV files

mod fingerprint;
mod table;

pub use fingerprint::{FingerprintIndex, RowFingerprint, FIELD_SEPARATOR};
pub use table::{Row, Table};
