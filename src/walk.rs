//! Paired traversal of two directory trees

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::diff::{Difference, FileComparator};
use crate::error::{CompareError, Result};
use crate::output::DifferenceSink;
use crate::parser::is_csv_file_name;

/// Walks two trees side by side and feeds differences into a sink
///
/// Entries are visited in sorted name order, depth first: a subdirectory is
/// fully compared before the next entry of its parent. Entries only present
/// in the second tree are reported after the first tree's entries of the
/// same directory have been handled.
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    comparator: FileComparator,
    skip_unreadable: bool,
}

/// One directory level still being visited
struct Frame {
    /// Path relative to both roots
    relative: PathBuf,
    /// Sorted entry names of the first tree at this level
    entries: Vec<OsString>,
    next: usize,
}

struct Roots<'a> {
    first: &'a Path,
    second: &'a Path,
}

impl DirectoryWalker {
    pub fn new(comparator: FileComparator) -> Self {
        Self {
            comparator,
            skip_unreadable: false,
        }
    }

    /// Build a walker from run configuration
    pub fn from_config(config: &Config) -> Self {
        let comparator = FileComparator::new(config.mode).with_verify_rows(config.verify_rows);
        Self::new(comparator).with_skip_unreadable(config.skip_unreadable)
    }

    /// Report unreadable CSV files as differences instead of failing
    pub fn with_skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    /// Compare `first_root` against `second_root`
    pub fn walk(&self, first_root: &Path, second_root: &Path, sink: &mut DifferenceSink) -> Result<()> {
        let roots = Roots {
            first: first_root,
            second: second_root,
        };

        sink.stats.directories_visited += 1;
        let mut stack = vec![Frame {
            relative: PathBuf::new(),
            entries: sorted_entries(first_root)?,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            match frame.entries.get(frame.next) {
                Some(name) => {
                    let relative = frame.relative.join(name);
                    let is_csv = is_csv_file_name(name);
                    frame.next += 1;
                    if let Some(child) = self.visit_entry(&roots, relative, is_csv, sink)? {
                        stack.push(child);
                    }
                }
                None => {
                    let relative = std::mem::take(&mut frame.relative);
                    stack.pop();
                    self.report_only_in_second(&roots, &relative, sink)?;
                }
            }
        }

        Ok(())
    }

    /// Handle one entry of the first tree; returns a frame when it must be descended into
    fn visit_entry(
        &self,
        roots: &Roots<'_>,
        relative: PathBuf,
        is_csv: bool,
        sink: &mut DifferenceSink,
    ) -> Result<Option<Frame>> {
        let first = roots.first.join(&relative);
        let second = roots.second.join(&relative);

        if !second.exists() {
            sink.push(Difference::MissingInSecondDir {
                path: second.display().to_string(),
            });
            return Ok(None);
        }

        match (first.is_dir(), second.is_dir()) {
            (true, true) => {
                debug!("Entering {}", relative.display());
                sink.stats.directories_visited += 1;
                let entries = sorted_entries(&first)?;
                Ok(Some(Frame {
                    relative,
                    entries,
                    next: 0,
                }))
            }
            (true, false) | (false, true) => {
                sink.push(Difference::EntryKindMismatch {
                    first: first.display().to_string(),
                    second: second.display().to_string(),
                });
                Ok(None)
            }
            (false, false) if is_csv => {
                self.compare_pair(&first, &second, &relative, sink)?;
                Ok(None)
            }
            (false, false) => {
                debug!("Skipping non-CSV file {}", relative.display());
                sink.stats.files_skipped += 1;
                Ok(None)
            }
        }
    }

    fn compare_pair(
        &self,
        first: &Path,
        second: &Path,
        relative: &Path,
        sink: &mut DifferenceSink,
    ) -> Result<()> {
        let label = relative.display().to_string();
        match self.comparator.compare_files(first, second, &label) {
            Ok(differences) => {
                sink.stats.files_compared += 1;
                sink.extend(differences);
                Ok(())
            }
            Err(err) if self.skip_unreadable => {
                let reason = err.detailed();
                warn!("Skipping {}: {}", label, reason);
                sink.push(Difference::Unreadable {
                    path: label,
                    reason,
                });
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Presence check for entries of the second tree at one level
    fn report_only_in_second(
        &self,
        roots: &Roots<'_>,
        relative: &Path,
        sink: &mut DifferenceSink,
    ) -> Result<()> {
        let first_dir = roots.first.join(relative);
        for name in sorted_entries(&roots.second.join(relative))? {
            let first = first_dir.join(&name);
            if !first.exists() {
                sink.push(Difference::MissingInFirstDir {
                    path: first.display().to_string(),
                });
            }
        }
        Ok(())
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<OsString>> {
    let mut names = fs::read_dir(dir)
        .map_err(|e| CompareError::io(dir, e))?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| CompareError::io(dir, e))?;
    names.sort();
    Ok(names)
}

/// Resolve the configured trees and compare them
pub fn compare_directories(config: &Config) -> Result<DifferenceSink> {
    let (first, second) = config.resolve_dirs()?;
    info!(
        "Comparing {} with {} ({} mode)",
        first.display(),
        second.display(),
        config.mode
    );

    let mut sink = DifferenceSink::new(&first, &second, config.mode);
    DirectoryWalker::from_config(config).walk(&first, &second, &mut sink)?;

    info!(
        "Visited {} directories, compared {} CSV files, skipped {} other files: {} differences",
        sink.stats.directories_visited,
        sink.stats.files_compared,
        sink.stats.files_skipped,
        sink.len()
    );
    Ok(sink)
}
