//! ptrstyle: pointer and reference marker placement for C/C++ sources
//!
//! The core is [`restyle::process_line`], a pure per-line rewrite. The rest
//! of the crate selects files, feeds them through it, and writes them back.
//! The main binary is at src/main.rs.

pub mod cli;
pub mod comment_words;
pub mod config;
pub mod diff_formatter;
pub mod error_helpers;
pub mod file_processor;
pub mod file_selection;
pub mod logger;
pub mod regression;
pub mod restyle;
pub mod vcs;

// Re-export commonly used types for convenience
pub use comment_words::{CommentWords, comment_words};
pub use config::Config;
pub use file_processor::{BatchSummary, FileProcessor, FileReport, LineChange};
pub use file_selection::FileSelection;
pub use regression::run_regression_suite;
pub use restyle::{process_line, restyle_text};
