mod error_output;
mod json;
mod progress;
mod text;

pub use error_output::ErrorOutput;
pub use json::JsonFormatter;
pub use progress::PhaseProgress;
pub use text::TextFormatter;

use std::io::IsTerminal;
use std::path::Path;

use serde::Serialize;

use crate::analysis::AnalysisRun;
use crate::checker::Checker;
use crate::error::Result;
use crate::file_info::{FileInfo, FileOutcome};
use crate::scope::FileSelection;

/// ANSI color codes
pub(crate) mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

/// Renders command results in one output format.
pub trait OutputFormatter {
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_report<C: Checker>(
        &self,
        checker: &C,
        run: &AnalysisRun<C::Output>,
        report: &C::Report,
    ) -> Result<String>;

    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_check<C: Checker>(&self, checker: &C, run: &AnalysisRun<C::Output>)
    -> Result<String>;

    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_files(&self, root: &Path, selection: &FileSelection) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    /// Auto-detect: use colors if the stream is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorMode {
    /// Resolve against stdout.
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
        }
    }
}

/// Where one targeted file ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Passed,
    Failed,
    /// Read or analysis failed, or the file was never processed.
    Error,
}

impl FileStatus {
    pub fn of<C: Checker + ?Sized>(checker: &C, info: &FileInfo<C::Output>) -> Self {
        match info.outcome() {
            FileOutcome::Computed(output) if checker.passes(output) => Self::Passed,
            FileOutcome::Computed(_) => Self::Failed,
            FileOutcome::Failed(_) | FileOutcome::Pending | FileOutcome::Read => Self::Error,
        }
    }
}

/// Path shown to the user: relative to the repository root when possible.
pub(crate) fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
