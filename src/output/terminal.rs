//! Plain text report with a colored banner

use std::io::Write;

use anyhow::Result;
use termcolor::{Color, ColorSpec, WriteColor};

use super::{DifferenceSink, OutputFormatter};

/// Terminal output: a banner line followed by a bulleted list
pub struct TerminalOutput {
    bullet: &'static str,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { bullet: "-" }
    }

    fn write_banner(&self, writer: &mut dyn WriteColor, color: Color, text: &str) -> Result<()> {
        writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(writer, "{}", text)?;
        writer.reset()?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, sink: &DifferenceSink, writer: &mut dyn WriteColor) -> Result<()> {
        if sink.is_empty() {
            self.write_banner(
                writer,
                Color::Green,
                "✅ All CSV files are identical between the two directories.",
            )?;
            return Ok(());
        }

        self.write_banner(
            writer,
            Color::Red,
            &format!("❌ Found {} differences:", sink.len()),
        )?;
        writeln!(writer)?;
        for difference in sink.differences() {
            writeln!(writer, "{} {}", self.bullet, difference)?;
        }
        Ok(())
    }
}
