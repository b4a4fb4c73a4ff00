//! JSON output format

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::config::ComparisonMode;
use crate::diff::Difference;

use super::{DifferenceSink, OutputFormatter, WalkStats};

/// JSON output formatter
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonDifference<'a> {
    #[serde(flatten)]
    difference: &'a Difference,
    message: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    first_dir: String,
    second_dir: String,
    mode: ComparisonMode,
    identical: bool,
    difference_count: usize,
    stats: WalkStats,
    differences: Vec<JsonDifference<'a>>,
}

impl OutputFormatter for JsonOutput {
    fn render(&self, sink: &DifferenceSink, writer: &mut dyn WriteColor) -> Result<()> {
        let report = JsonReport {
            first_dir: sink.first_dir().display().to_string(),
            second_dir: sink.second_dir().display().to_string(),
            mode: sink.mode(),
            identical: sink.is_empty(),
            difference_count: sink.len(),
            stats: sink.stats,
            differences: sink
                .differences()
                .iter()
                .map(|difference| JsonDifference {
                    difference,
                    message: difference.to_string(),
                })
                .collect(),
        };

        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
        Ok(())
    }
}
