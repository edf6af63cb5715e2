use anyhow::Result;
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error_helpers::describe_io_error;
use crate::restyle::process_line;

#[derive(Debug, Clone, PartialEq)]
pub struct LineChange {
    pub line_number: usize,
    pub old_content: String, // Without line terminator
    pub new_content: String,
}

/// Outcome of restyling one file
#[derive(Debug)]
pub struct FileReport {
    pub file_path: PathBuf,
    pub original: String,
    pub restyled: String,
    pub changes: Vec<LineChange>,
    pub written: bool, // False in dry-run mode or when nothing changed
}

impl FileReport {
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Totals over a batch of files
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub scanned: usize,
    pub changed: usize,
    pub written: usize,
    pub lines_changed: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[(PathBuf, Result<FileReport>)]) -> Self {
        let mut summary = Self::default();
        for (_, result) in results {
            summary.scanned += 1;
            match result {
                Ok(report) => {
                    if report.is_changed() {
                        summary.changed += 1;
                        summary.lines_changed += report.changes.len();
                    }
                    if report.written {
                        summary.written += 1;
                    }
                }
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Restyles whole files and writes them back
pub struct FileProcessor {
    dry_run: bool,
}

impl FileProcessor {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Restyle one file, rewriting it unless in dry-run mode.
    ///
    /// Unchanged files are never rewritten. Changed files are written to a
    /// temporary file next to the original and renamed over it, so a failed
    /// write leaves the original intact.
    pub fn restyle_file(&self, file_path: &Path) -> Result<FileReport> {
        info!("Processing {}", file_path.display());

        let bytes = fs::read(file_path).map_err(|e| describe_io_error(e, file_path, "reading"))?;
        let original = String::from_utf8(bytes).map_err(|e| {
            anyhow::anyhow!(
                "{} is not valid UTF-8 (byte offset {}); skipped",
                file_path.display(),
                e.utf8_error().valid_up_to()
            )
        })?;

        let (restyled, changes) = restyle_content(&original);

        let written = if changes.is_empty() {
            debug!("{}: no changes", file_path.display());
            false
        } else if self.dry_run {
            debug!("{}: {} lines would change", file_path.display(), changes.len());
            false
        } else {
            write_atomically(file_path, &restyled)?;
            info!("{}: rewrote {} lines", file_path.display(), changes.len());
            true
        };

        Ok(FileReport {
            file_path: file_path.to_path_buf(),
            original,
            restyled,
            changes,
            written,
        })
    }

    /// Restyle many files in parallel. Results keep the input order.
    pub fn restyle_files(&self, paths: &[PathBuf]) -> Vec<(PathBuf, Result<FileReport>)> {
        paths
            .par_iter()
            .map(|path| (path.clone(), self.restyle_file(path)))
            .collect()
    }
}

/// Restyle a buffer line by line and record which lines changed.
pub fn restyle_content(content: &str) -> (String, Vec<LineChange>) {
    let mut restyled = String::with_capacity(content.len());
    let mut changes = Vec::new();

    for (idx, line) in content.split_inclusive('\n').enumerate() {
        let new_line = process_line(line);
        if new_line != line {
            changes.push(LineChange {
                line_number: idx + 1,
                old_content: strip_terminator(line).to_string(),
                new_content: strip_terminator(&new_line).to_string(),
            });
        }
        restyled.push_str(&new_line);
    }

    (restyled, changes)
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Replace `path` with `content` through a temporary file in the same directory.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    // Write through symlinks instead of replacing them.
    let target = fs::canonicalize(path).map_err(|e| describe_io_error(e, path, "resolving"))?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));

    let permissions = fs::metadata(&target)
        .map_err(|e| describe_io_error(e, &target, "reading metadata of"))?
        .permissions();

    let mut temp_file = NamedTempFile::new_in(dir)
        .map_err(|e| describe_io_error(e, dir, "creating a temporary file in"))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| describe_io_error(e, temp_file.path(), "writing"))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| describe_io_error(e, temp_file.path(), "flushing"))?;
    fs::set_permissions(temp_file.path(), permissions)
        .map_err(|e| describe_io_error(e, temp_file.path(), "setting permissions on"))?;

    temp_file
        .persist(&target)
        .map_err(|e| describe_io_error(e.error, &target, "replacing"))?;

    Ok(())
}
