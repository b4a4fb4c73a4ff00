//! csvtreediff - Recursive diff of CSV files across two directory trees
//!
//! Walks two trees side by side, reports entries missing on either side and
//! compares same-named CSV files row by row, either positionally or as sets
//! of row fingerprints.

pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod walk;

pub use config::{ComparisonMode, Config};
pub use diff::{Difference, FileComparator};
pub use error::CompareError;
pub use model::Table;
pub use output::DifferenceSink;
pub use walk::{compare_directories, DirectoryWalker};
