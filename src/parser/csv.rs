//! CSV file parser

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CompareError, Result};
use crate::model::Table;

/// Parser for CSV files
///
/// Fields are comma separated and may be double-quoted. Backslash escapes a
/// quote inside a quoted field, and so does a doubled quote. Quoted fields
/// may span lines. A blank line is a row with one empty field, except for a
/// single blank line at the very end of the file. The first record is data
/// like any other.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        CsvParser
    }

    /// Parse a file into a Table
    pub fn parse(&self, path: &Path) -> Result<Table> {
        let data = fs::read(path).map_err(|e| CompareError::io(path, e))?;
        let table = self.parse_bytes(&data, path)?;
        debug!("Parsed {} rows from {}", table.row_count(), path.display());
        Ok(table)
    }

    /// Parse CSV held in memory; `path` is only used in error messages
    pub fn parse_bytes(&self, data: &[u8], path: &Path) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(b',')
            .quote(b'"')
            .escape(Some(b'\\'))
            .double_quote(true)
            .from_reader(data);

        let mut table = Table::new();
        let mut record = csv::ByteRecord::new();
        loop {
            // The reader skips blank lines silently; recover them from the
            // bytes consumed ahead of each record.
            let start = csv_reader.position().byte() as usize;
            let more = csv_reader
                .read_byte_record(&mut record)
                .map_err(|e| csv_error(path, e))?;
            let end = csv_reader.position().byte() as usize;

            let previous = start.checked_sub(1).map(|i| data[i]);
            let blank = leading_blank_lines(&data[start..end], previous);
            if !more {
                for _ in 1..blank {
                    table.add_row(vec![String::new()]);
                }
                break;
            }
            for _ in 0..blank {
                table.add_row(vec![String::new()]);
            }

            let fields = record
                .iter()
                .map(|f| String::from_utf8_lossy(f).into_owned())
                .collect();
            table.add_row(fields);
        }

        Ok(table)
    }
}

/// Count the empty lines formed by the run of line terminators at the start
/// of `span`. `previous` is the byte before `span`: a `\n` that completes an
/// earlier `\r\n` terminator does not count.
fn leading_blank_lines(span: &[u8], previous: Option<u8>) -> usize {
    let mut rest = span;
    if previous == Some(b'\r') && rest.first() == Some(&b'\n') {
        rest = &rest[1..];
    }

    let mut count = 0;
    loop {
        match rest {
            [b'\r', b'\n', tail @ ..] | [b'\r', tail @ ..] | [b'\n', tail @ ..] => {
                count += 1;
                rest = tail;
            }
            _ => return count,
        }
    }
}

fn csv_error(path: &Path, err: csv::Error) -> CompareError {
    CompareError::Csv {
        path: path.to_path_buf(),
        source: err,
    }
}
