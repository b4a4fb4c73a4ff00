//! Collecting differences and rendering the final report

mod json;
mod terminal;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::config::{ComparisonMode, OutputFormat};
use crate::diff::Difference;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Counters gathered while walking the trees
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    pub directories_visited: usize,
    pub files_compared: usize,
    pub files_skipped: usize,
}

/// Ordered, append-only collection of differences for one run
#[derive(Debug, Clone)]
pub struct DifferenceSink {
    first_dir: PathBuf,
    second_dir: PathBuf,
    mode: ComparisonMode,
    differences: Vec<Difference>,
    pub stats: WalkStats,
}

impl DifferenceSink {
    /// Create an empty sink for a pair of trees
    pub fn new(first_dir: impl Into<PathBuf>, second_dir: impl Into<PathBuf>, mode: ComparisonMode) -> Self {
        Self {
            first_dir: first_dir.into(),
            second_dir: second_dir.into(),
            mode,
            differences: Vec::new(),
            stats: WalkStats::default(),
        }
    }

    pub fn push(&mut self, difference: Difference) {
        self.differences.push(difference);
    }

    pub fn extend(&mut self, differences: impl IntoIterator<Item = Difference>) {
        self.differences.extend(differences);
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Differences in discovery order
    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    pub fn first_dir(&self) -> &Path {
        &self.first_dir
    }

    pub fn second_dir(&self) -> &Path {
        &self.second_dir
    }

    pub fn mode(&self) -> ComparisonMode {
        self.mode
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render the collected differences to a writer
    fn render(&self, sink: &DifferenceSink, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render the report to stdout
pub fn render_to_stdout(sink: &DifferenceSink, format: OutputFormat, color: bool) -> Result<()> {
    let choice = if color && std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let formatter = OutputFactory::create(format);
    let mut stdout = StandardStream::stdout(choice);
    formatter.render(sink, &mut stdout)
}
