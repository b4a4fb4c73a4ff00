//! Configuration handling for csvtreediff

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{CompareError, Result};

/// Default directory the two compared trees are resolved under
pub const DEFAULT_BASE_DIR: &str = "directories";

/// How rows of two same-named CSV files are matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    /// Row i of the first file is compared against row i of the second
    StrictOrder,
    /// Rows are matched as a set by their fingerprint
    #[default]
    HashBased,
}

impl std::fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonMode::StrictOrder => write!(f, "strict-order"),
            ComparisonMode::HashBased => write!(f, "hash-based"),
        }
    }
}

/// Output format for the final report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// Configuration for a comparison run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory both trees are resolved under
    pub base_dir: PathBuf,
    /// First tree, relative to `base_dir`
    pub first_dir: PathBuf,
    /// Second tree, relative to `base_dir`
    pub second_dir: PathBuf,
    /// Row matching strategy applied to every file pair
    pub mode: ComparisonMode,
    /// Re-check rows whose fingerprints match (hash-based mode only)
    pub verify_rows: bool,
    /// Report unreadable CSV files as differences instead of aborting
    pub skip_unreadable: bool,
    /// Exit non-zero when differences are found
    pub fail_on_diff: bool,
    /// Output format
    pub output_format: OutputFormat,
    /// Colorize terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            first_dir: PathBuf::new(),
            second_dir: PathBuf::new(),
            mode: ComparisonMode::default(),
            verify_rows: false,
            skip_unreadable: false,
            fail_on_diff: false,
            output_format: OutputFormat::default(),
            color: true,
        }
    }
}

impl Config {
    /// Create a new Config for two trees
    pub fn new(first_dir: impl Into<PathBuf>, second_dir: impl Into<PathBuf>) -> Self {
        Self {
            first_dir: first_dir.into(),
            second_dir: second_dir.into(),
            ..Default::default()
        }
    }

    /// Set the directory both trees are resolved under
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Set the row matching strategy
    pub fn with_mode(mut self, mode: ComparisonMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable exact row verification on fingerprint matches
    pub fn with_verify_rows(mut self, verify: bool) -> Self {
        self.verify_rows = verify;
        self
    }

    /// Enable partial-failure mode for unreadable files
    pub fn with_skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    /// Exit non-zero when differences are found
    pub fn with_fail_on_diff(mut self, fail: bool) -> Self {
        self.fail_on_diff = fail;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enable or disable colored output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Resolve both trees under the base directory and check they are directories
    pub fn resolve_dirs(&self) -> Result<(PathBuf, PathBuf)> {
        let first = resolve(&self.base_dir, &self.first_dir);
        if !first.is_dir() {
            return Err(CompareError::Config(format!(
                "First directory not found: {}",
                first.display()
            )));
        }

        let second = resolve(&self.base_dir, &self.second_dir);
        if !second.is_dir() {
            return Err(CompareError::Config(format!(
                "Second directory not found: {}",
                second.display()
            )));
        }

        Ok((first, second))
    }
}

fn resolve(base: &Path, dir: &Path) -> PathBuf {
    let raw = dir.to_string_lossy();
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        base.join(dir)
    } else {
        base.join(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::new("a", "b");
        assert_eq!(config.base_dir, PathBuf::from(DEFAULT_BASE_DIR));
        assert_eq!(config.mode, ComparisonMode::HashBased);
        assert!(!config.verify_rows);
        assert!(!config.fail_on_diff);
    }

    #[test]
    fn test_resolve_strips_trailing_slash() {
        let base = TempDir::new().unwrap();
        fs::create_dir(base.path().join("left")).unwrap();
        fs::create_dir(base.path().join("right")).unwrap();

        let config = Config::new("left/", "right").with_base_dir(base.path());
        let (first, second) = config.resolve_dirs().unwrap();
        assert_eq!(first, base.path().join("left"));
        assert_eq!(second, base.path().join("right"));
    }

    #[test]
    fn test_resolve_missing_directory() {
        let base = TempDir::new().unwrap();
        fs::create_dir(base.path().join("left")).unwrap();
        fs::write(base.path().join("right"), "not a dir").unwrap();

        let err = Config::new("nope", "left")
            .with_base_dir(base.path())
            .resolve_dirs()
            .unwrap_err();
        assert!(err.to_string().starts_with("First directory not found"));

        let err = Config::new("left", "right")
            .with_base_dir(base.path())
            .resolve_dirs()
            .unwrap_err();
        assert!(err.to_string().starts_with("Second directory not found"));
    }
}
