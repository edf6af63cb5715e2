use crate::file_processor::{BatchSummary, FileReport};
use colored::*;
use similar::{ChangeTag, TextDiff};
use std::io::IsTerminal;

pub struct DiffFormatter;

impl DiffFormatter {
    /// Auto-detect if we should use colors
    pub fn should_use_color() -> bool {
        // Check NO_COLOR env var (https://no-color.org/)
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }

        std::io::stdout().is_terminal()
    }

    /// Format a file's changes as grouped hunks with context
    pub fn format_report(report: &FileReport, context_size: usize, use_color: bool) -> String {
        let mut output = String::new();
        if !report.is_changed() {
            return output;
        }

        let path = report.file_path.display().to_string();
        if use_color {
            output.push_str(&format!("{}\n", path.bold().cyan()));
        } else {
            output.push_str(&format!("{}\n", path));
        }

        let diff = TextDiff::from_lines(&report.original, &report.restyled);
        for (idx, group) in diff.grouped_ops(context_size).iter().enumerate() {
            if idx > 0 {
                if use_color {
                    output.push_str(&format!("{}\n", "...".dimmed()));
                } else {
                    output.push_str("...\n");
                }
            }

            for op in group {
                for change in diff.iter_changes(op) {
                    let line_num = change
                        .new_index()
                        .or(change.old_index())
                        .map(|i| i + 1)
                        .unwrap_or(0);
                    let content = change.value().trim_end_matches(['\n', '\r']);

                    let (indicator, line) = match change.tag() {
                        ChangeTag::Equal => (" ", content.to_string()),
                        ChangeTag::Delete => ("-", content.to_string()),
                        ChangeTag::Insert => ("+", content.to_string()),
                    };

                    if use_color {
                        let colored_line = match change.tag() {
                            ChangeTag::Equal => format!("L{}: {} {}\n", line_num, indicator.dimmed(), line.dimmed()),
                            ChangeTag::Delete => format!("L{}: {} {}\n", line_num, indicator.red().bold(), line.red()),
                            ChangeTag::Insert => format!("L{}: {} {}\n", line_num, indicator.green().bold(), line.green()),
                        };
                        output.push_str(&colored_line);
                    } else {
                        output.push_str(&format!("L{}: {} {}\n", line_num, indicator, line));
                    }
                }
            }
        }

        output
    }

    /// One-line result for a file in the batch listing
    pub fn format_status(report: &FileReport, dry_run: bool) -> String {
        let verb = if dry_run { "would restyle" } else { "restyled" };
        format!(
            "{}: {} {} line{}",
            report.file_path.display(),
            verb,
            report.changes.len(),
            if report.changes.len() == 1 { "" } else { "s" }
        )
    }

    /// Closing summary for a batch
    pub fn format_summary(summary: &BatchSummary, dry_run: bool) -> String {
        let mut output = format!(
            "{} file{} scanned, {} changed ({} line{})",
            summary.scanned,
            if summary.scanned == 1 { "" } else { "s" },
            summary.changed,
            summary.lines_changed,
            if summary.lines_changed == 1 { "" } else { "s" },
        );

        if dry_run {
            output.push_str(", dry run: nothing written");
        } else {
            output.push_str(&format!(", {} written", summary.written));
        }

        if summary.failed > 0 {
            output.push_str(&format!(", {} failed", summary.failed));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processor::restyle_content;
    use std::path::PathBuf;

    fn report_for(content: &str) -> FileReport {
        let (restyled, changes) = restyle_content(content);
        FileReport {
            file_path: PathBuf::from("js/src/test.cpp"),
            original: content.to_string(),
            restyled,
            changes,
            written: false,
        }
    }

    #[test]
    fn test_format_report_plain() {
        let report = report_for("int a;\nint *b;\nint c;\n");
        let output = DiffFormatter::format_report(&report, 1, false);

        assert!(output.starts_with("js/src/test.cpp\n"));
        assert!(output.contains("L1:   int a;\n"));
        assert!(output.contains("L2: - int *b;\n"));
        assert!(output.contains("L2: + int* b;\n"));
        assert!(output.contains("L3:   int c;\n"));
    }

    #[test]
    fn test_format_report_without_context() {
        let report = report_for("int a;\nint *b;\nint c;\n");
        let output = DiffFormatter::format_report(&report, 0, false);
        assert!(!output.contains("int a;"));
        assert!(!output.contains("int c;"));
    }

    #[test]
    fn test_format_report_separates_hunks() {
        let mut content = String::from("A *a;\n");
        for _ in 0..10 {
            content.push_str("x = y;\n");
        }
        content.push_str("B *b;\n");

        let output = DiffFormatter::format_report(&report_for(&content), 1, false);
        assert!(output.contains("...\n"));
        assert!(output.contains("L12: + B* b;"));
    }

    #[test]
    fn test_format_report_unchanged_is_empty() {
        let report = report_for("return *a;\n");
        assert!(DiffFormatter::format_report(&report, 2, false).is_empty());
    }

    #[test]
    fn test_format_status() {
        let report = report_for("A *a;\n");
        assert_eq!(
            DiffFormatter::format_status(&report, true),
            "js/src/test.cpp: would restyle 1 line"
        );
        assert_eq!(
            DiffFormatter::format_status(&report, false),
            "js/src/test.cpp: restyled 1 line"
        );
    }

    #[test]
    fn test_format_summary() {
        let summary = BatchSummary {
            scanned: 3,
            changed: 1,
            written: 1,
            lines_changed: 2,
            failed: 1,
        };
        assert_eq!(
            DiffFormatter::format_summary(&summary, false),
            "3 files scanned, 1 changed (2 lines), 1 written, 1 failed"
        );
        assert_eq!(
            DiffFormatter::format_summary(&summary, true),
            "3 files scanned, 1 changed (2 lines), dry run: nothing written, 1 failed"
        );
    }
}
