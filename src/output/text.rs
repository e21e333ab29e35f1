use std::fmt::Write;
use std::path::Path;

use crate::analysis::AnalysisRun;
use crate::checker::Checker;
use crate::error::Result;
use crate::scope::FileSelection;

use super::{ColorMode, FileStatus, OutputFormatter, ansi, display_path};

const SEPARATOR: &str = "----------------------------------------------------------------";

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: mode.use_colors(),
            verbose,
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn write_errors<C: Checker>(
        &self,
        out: &mut String,
        checker: &C,
        run: &AnalysisRun<C::Output>,
    ) {
        let root = run.file_infos.root();
        let errors: Vec<_> = run.file_infos.failures().collect();
        if errors.is_empty() {
            return;
        }
        let header = format!(
            "{} files could not be processed by {}:",
            errors.len(),
            checker.name()
        );
        writeln!(out, "{}", self.paint(&header, ansi::YELLOW)).ok();
        for (path, err) in errors {
            writeln!(out, "    {}: {err}", display_path(root, path)).ok();
        }
        writeln!(out, "{SEPARATOR}").ok();
    }
}

impl OutputFormatter for TextFormatter {
    /// Summary block, the checker's report, then any files that could not be processed.
    fn format_report<C: Checker>(
        &self,
        checker: &C,
        run: &AnalysisRun<C::Output>,
        report: &C::Report,
    ) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{SEPARATOR}").ok();
        writeln!(out, "{}", run.analysis).ok();
        writeln!(out, "{SEPARATOR}").ok();
        writeln!(out, "{report}").ok();
        writeln!(out, "{SEPARATOR}").ok();
        self.write_errors(&mut out, checker, run);
        Ok(out)
    }

    /// Summary block, then every failing file with the lines that locate its problems.
    fn format_check<C: Checker>(
        &self,
        checker: &C,
        run: &AnalysisRun<C::Output>,
    ) -> Result<String> {
        let root = run.file_infos.root();
        let mut out = String::new();
        writeln!(out, "{SEPARATOR}").ok();
        writeln!(out, "{}", run.analysis).ok();

        let mut failed = 0;
        for info in &run.file_infos {
            let path = display_path(root, info.path());
            match (FileStatus::of(checker, info), info.output()) {
                (FileStatus::Failed, Some(output)) => {
                    failed += 1;
                    writeln!(out, "{SEPARATOR}").ok();
                    writeln!(out, "An issue was found with {}", self.paint(&path, ansi::RED)).ok();
                    for line in checker.explain(output) {
                        writeln!(out, "{line}").ok();
                    }
                }
                (FileStatus::Passed, _) if self.verbose >= 1 => {
                    writeln!(out, "{} {path}", self.paint("✓", ansi::GREEN)).ok();
                }
                _ => {}
            }
        }
        writeln!(out, "{SEPARATOR}").ok();
        self.write_errors(&mut out, checker, run);

        let errors = run.file_infos.failure_count();
        if failed == 0 && errors == 0 {
            writeln!(out, "{}", self.paint("No issues found!", ansi::GREEN)).ok();
        } else {
            let total = run.file_infos.len();
            let summary = format!(
                "{} of {total} files failed {}",
                failed + errors,
                checker.name()
            );
            writeln!(out, "{}", self.paint(&summary, ansi::RED)).ok();
        }
        writeln!(out, "{SEPARATOR}").ok();
        Ok(out)
    }

    /// Selection counts followed by the targeted files.
    fn format_files(&self, root: &Path, selection: &FileSelection) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{SEPARATOR}").ok();
        writeln!(out, "{:4} files tracked in repo", selection.tracked_count()).ok();
        writeln!(
            out,
            "{:4} files in scope according to script settings",
            selection.in_scope_count()
        )
        .ok();
        writeln!(
            out,
            "{:4} files examined according to listed targets",
            selection.targeted_count()
        )
        .ok();
        writeln!(out, "{SEPARATOR}").ok();
        for path in &selection.targeted {
            writeln!(out, "{}", display_path(root, path)).ok();
        }
        if self.verbose >= 1 {
            let untargeted = selection
                .in_scope
                .iter()
                .filter(|path| !selection.targeted.contains(path));
            for path in untargeted {
                let line = format!("{} (not targeted)", display_path(root, path));
                writeln!(out, "{}", self.paint(&line, ansi::DIM)).ok();
            }
        }
        Ok(out)
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
