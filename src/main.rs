//! csvtreediff - Recursive diff of CSV files across two directory trees

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use csvtreediff::config::{ComparisonMode, Config, OutputFormat, DEFAULT_BASE_DIR};
use csvtreediff::output::render_to_stdout;
use csvtreediff::walk::compare_directories;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Compare CSV files across two directory trees
#[derive(Parser, Debug)]
#[command(name = "csvtreediff")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example: csvtreediff dir1 dir2 --strict-ordering")]
struct Cli {
    /// First directory, relative to the base directory
    dir1: PathBuf,

    /// Second directory, relative to the base directory
    dir2: PathBuf,

    /// Compare rows by position instead of matching them by content
    #[arg(long)]
    strict_ordering: bool,

    /// Directory both trees are resolved under
    #[arg(long, default_value = DEFAULT_BASE_DIR)]
    base_dir: PathBuf,

    /// Double-check rows whose fingerprints match (hash-based mode)
    #[arg(long)]
    verify_rows: bool,

    /// Report unreadable CSV files as differences instead of aborting
    #[arg(long)]
    skip_unreadable: bool,

    /// Exit with status 1 when differences are found
    #[arg(long)]
    fail_on_diff: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{}", e);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            print!("{}", e.render());
            return ExitCode::from(1);
        }
    };

    match run(cli) {
        Ok(true) => ExitCode::from(1), // Differences found with --fail-on-diff
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Returns whether the run should exit with a failure status
fn run(cli: Cli) -> Result<bool> {
    let mode = if cli.strict_ordering {
        ComparisonMode::StrictOrder
    } else {
        ComparisonMode::HashBased
    };

    let config = Config::new(cli.dir1, cli.dir2)
        .with_base_dir(cli.base_dir)
        .with_mode(mode)
        .with_verify_rows(cli.verify_rows)
        .with_skip_unreadable(cli.skip_unreadable)
        .with_fail_on_diff(cli.fail_on_diff)
        .with_output_format(cli.format.into())
        .with_color(!cli.no_color);

    let sink = compare_directories(&config)?;
    render_to_stdout(&sink, config.output_format, config.color)?;

    Ok(config.fail_on_diff && !sink.is_empty())
}
