//! Reading CSV files into tables

mod csv;

use std::ffi::OsStr;

pub use self::csv::CsvParser;

/// Extension (lowercase, with dot) of files whose contents are compared
pub const CSV_EXTENSION: &str = ".csv";

/// Check whether a directory entry name denotes a CSV file (case-insensitive)
pub fn is_csv_file_name(name: &OsStr) -> bool {
    name.to_string_lossy()
        .to_lowercase()
        .ends_with(CSV_EXTENSION)
}
