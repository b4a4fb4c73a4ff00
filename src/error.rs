//! Error types for csvtreediff

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a comparison run
#[derive(Error, Debug)]
pub enum CompareError {
    /// Invalid invocation or unusable root directories
    #[error("{0}")]
    Config(String),

    /// A file or directory could not be opened, listed or read
    #[error("Unable to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV record stream of a file is malformed
    #[error("Unable to parse CSV file {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl CompareError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompareError::Io {
            path: path.into(),
            source,
        }
    }

    /// Message including the underlying cause
    pub fn detailed(&self) -> String {
        match std::error::Error::source(self) {
            Some(source) => format!("{}: {}", self, source),
            None => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompareError>;
