//! Listing tracked files through the version control tool

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

use crate::config::VcsKind;

const GIT_LIST_ARGS: &[&str] = &["ls-files"];
const HG_LIST_ARGS: &[&str] = &["manifest", "-q"];

/// A concrete version control tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vcs {
    Git,
    Mercurial,
}

impl Vcs {
    /// Resolve the configured kind against the checkout at `root`.
    pub fn resolve(kind: VcsKind, root: &Path) -> Self {
        match kind {
            VcsKind::Git => Vcs::Git,
            VcsKind::Hg => Vcs::Mercurial,
            VcsKind::Auto => {
                if root.join(".hg").is_dir() {
                    Vcs::Mercurial
                } else {
                    Vcs::Git
                }
            }
        }
    }

    /// Program and arguments that print one tracked path per line
    fn list_command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Vcs::Git => ("git", GIT_LIST_ARGS),
            Vcs::Mercurial => ("hg", HG_LIST_ARGS),
        }
    }
}

/// List tracked files, as paths relative to `root`.
pub fn list_tracked_files(vcs: Vcs, root: &Path) -> Result<Vec<String>> {
    let (program, args) = vcs.list_command();
    debug!(program, ?args, root = %root.display(), "listing tracked files");

    let output = Command::new(program)
        .args(args)
        .current_dir(root)
        .output()
        .with_context(|| format!("Failed to run {} {}", program, args.join(" ")))?;

    if !output.status.success() {
        anyhow::bail!(
            "{} {} failed: {}",
            program,
            args.join(" "),
            error_text(&output)
        );
    }

    Ok(parse_file_list(&String::from_utf8_lossy(&output.stdout)))
}

/// One path per non-empty line.
fn parse_file_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Prefer stderr, fall back to stdout.
fn error_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}
