use std::path::Path;

use serde::Serialize;

use crate::analysis::{Analysis, AnalysisRun};
use crate::checker::Checker;
use crate::error::Result;
use crate::file_info::FileError;
use crate::scope::FileSelection;

use super::{FileStatus, OutputFormatter, display_path};

pub struct JsonFormatter;

#[derive(Serialize)]
struct FileRecord<'a, O> {
    path: String,
    status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a O>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a FileError>,
}

#[derive(Serialize)]
struct ReportOutput<'a, R, O> {
    checker: &'static str,
    analysis: &'a Analysis,
    report: &'a R,
    files: Vec<FileRecord<'a, O>>,
}

#[derive(Serialize)]
struct CheckOutput<'a, O> {
    checker: &'static str,
    analysis: &'a Analysis,
    passed: bool,
    failed_files: usize,
    files: Vec<FileRecord<'a, O>>,
}

#[derive(Serialize)]
struct FilesOutput {
    tracked_files: usize,
    files_in_scope: usize,
    files_targeted: usize,
    targeted: Vec<String>,
}

impl OutputFormatter for JsonFormatter {
    /// `{ checker, analysis, report, files }`
    fn format_report<C: Checker>(
        &self,
        checker: &C,
        run: &AnalysisRun<C::Output>,
        report: &C::Report,
    ) -> Result<String> {
        let output = ReportOutput {
            checker: checker.name(),
            analysis: &run.analysis,
            report,
            files: Self::records(checker, run),
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }

    /// `{ checker, analysis, passed, failed_files, files }`
    fn format_check<C: Checker>(
        &self,
        checker: &C,
        run: &AnalysisRun<C::Output>,
    ) -> Result<String> {
        let files = Self::records(checker, run);
        let failed_files = files
            .iter()
            .filter(|f| f.status != FileStatus::Passed)
            .count();
        let output = CheckOutput {
            checker: checker.name(),
            analysis: &run.analysis,
            passed: failed_files == 0,
            failed_files,
            files,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn format_files(&self, root: &Path, selection: &FileSelection) -> Result<String> {
        let output = FilesOutput {
            tracked_files: selection.tracked_count(),
            files_in_scope: selection.in_scope_count(),
            files_targeted: selection.targeted_count(),
            targeted: selection
                .targeted
                .iter()
                .map(|p| display_path(root, p))
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

impl JsonFormatter {
    fn records<'a, C: Checker>(
        checker: &C,
        run: &'a AnalysisRun<C::Output>,
    ) -> Vec<FileRecord<'a, C::Output>> {
        let root = run.file_infos.root();
        run.file_infos
            .iter()
            .map(|info| FileRecord {
                path: display_path(root, info.path()),
                status: FileStatus::of(checker, info),
                output: info.output(),
                error: info.error(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
