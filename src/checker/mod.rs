//! The capability every file checker implements, and the built-in checkers.

mod basic_style;
mod copyright;

pub use basic_style::{
    BasicStyle, BasicStyleReport, STYLE_RULES, StyleIssue, StyleRule, StyleRuleSummary,
};
pub use copyright::{
    CopyrightEvaluation, CopyrightHeader, CopyrightReport, CopyrightStatus, FailureGroup,
    HEADER_SOURCE_FNMATCHES, header_regex,
};

use std::fmt::{Debug, Display};
use std::path::Path;

use serde::Serialize;

use crate::file_info::{FileError, FileInfos, read_text};

/// A checker plugged into the analysis pipeline.
///
/// `read` and `compute` run on worker threads, one file at a time, so implementations
/// must not rely on shared mutable state.
pub trait Checker: Sync {
    /// Per-file analysis result.
    type Output: Clone + Debug + PartialEq + Send + Sync + Serialize;
    /// Repository-wide summary built from all per-file results.
    type Report: Serialize + Display;

    /// Name used on the command line and in reports.
    fn name(&self) -> &'static str;

    /// Fnmatch patterns for every file this checker can analyze.
    fn scope_patterns(&self) -> &[String];

    /// Fnmatch patterns for the files this invocation asked for. Empty means all of scope.
    fn target_patterns(&self) -> &[String];

    /// Load a file's content.
    ///
    /// # Errors
    /// A [`FileError`] recorded on the file's entry.
    fn read(&self, path: &Path) -> Result<String, FileError> {
        read_text(path)
    }

    /// Analyze one file's content.
    ///
    /// # Errors
    /// A [`FileError`] recorded on the file's entry.
    fn compute(&self, path: &Path, content: &str) -> Result<Self::Output, FileError>;

    /// Whether a computed result counts as passing for `check`.
    fn passes(&self, output: &Self::Output) -> bool;

    /// Human-readable lines locating the problems in a failing result.
    fn explain(&self, output: &Self::Output) -> Vec<String>;

    fn report(&self, infos: &FileInfos<Self::Output>) -> Self::Report;
}
