//! Error helper functions for creating actionable error messages

use std::io;
use std::path::Path;

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Check if an IO error is a "not found" error
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Create an enhanced error message for file permission issues
pub fn permission_error(path: &Path, operation: &str) -> String {
    let parent_dir = path
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());

    format!(
        "Permission denied when {} '{}'\n\n\
         Possible fixes:\n\
         1. Check file permissions: ls -l '{}'\n\
         2. The rewrite goes through a temporary file, so the directory needs write access: chmod u+w '{}'\n\
         3. Use --dry-run to see what would change without writing",
        operation,
        path.display(),
        path.display(),
        parent_dir
    )
}

/// Create an enhanced error message for file not found issues
pub fn not_found_error(path: &Path, context: &str) -> String {
    format!(
        "File not found: '{}'\n\n\
         Context: {}\n\n\
         Possible fixes:\n\
         1. Check the file path is correct\n\
         2. Paths from --tree are relative to the repository root; run ptrstyle from there",
        path.display(),
        context
    )
}

/// Attach an actionable message to an IO error when one applies
pub fn describe_io_error(err: io::Error, path: &Path, operation: &str) -> anyhow::Error {
    let message = if is_permission_denied(&err) {
        permission_error(path, operation)
    } else if is_not_found(&err) {
        not_found_error(path, operation)
    } else {
        format!("Failed when {} '{}'", operation, path.display())
    };

    anyhow::Error::new(err).context(message)
}
