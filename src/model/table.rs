//! Table and Row data structures

/// A row in the table: raw fields in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Field values exactly as read
    pub fields: Vec<String>,
    /// Original record number in the source file (1-indexed)
    pub source_line: usize,
}

impl Row {
    /// Create a new row
    pub fn new(fields: Vec<String>, source_line: usize) -> Self {
        Self {
            fields,
            source_line,
        }
    }

    /// Get a field by column index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(Into::into).collect(), 0)
    }
}

/// All rows of one CSV file, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row, numbering it after the previous one
    pub fn add_row(&mut self, fields: Vec<String>) {
        let source_line = self.rows.len() + 1;
        self.rows.push(Row::new(fields, source_line));
    }

    /// Build a table from string rows (mostly useful in tests)
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Table::new();
        for row in rows {
            table.add_row(row.into_iter().map(Into::into).collect());
        }
        table
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a row by position
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }
}
