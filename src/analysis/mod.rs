//! Pipeline driver: repository → scope → targets → read → compute, plus the summary
//! record every command reports.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::checker::Checker;
use crate::error::Result;
use crate::file_info::FileInfos;
use crate::output::PhaseProgress;
use crate::pool::WorkerPool;
use crate::repository::Repository;
use crate::scope::{FileSelection, ScopeResolver};

/// Counts and timing for one run.
///
/// Always satisfies `tracked_files >= files_in_scope >= files_targeted`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub tracked_files: usize,
    pub files_in_scope: usize,
    pub files_targeted: usize,
    pub jobs: usize,
    /// Seconds spent reading and analyzing.
    pub elapsed_time: f64,
}

impl Analysis {
    #[must_use]
    pub fn new(selection: &FileSelection, jobs: usize, elapsed: Duration) -> Self {
        debug_assert!(selection.tracked_count() >= selection.in_scope_count());
        debug_assert!(selection.in_scope_count() >= selection.targeted_count());
        Self {
            tracked_files: selection.tracked_count(),
            files_in_scope: selection.in_scope_count(),
            files_targeted: selection.targeted_count(),
            jobs,
            elapsed_time: elapsed.as_secs_f64(),
        }
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:4} files tracked in repo", self.tracked_files)?;
        writeln!(
            f,
            "{:4} files in scope according to script settings",
            self.files_in_scope
        )?;
        writeln!(
            f,
            "{:4} files examined according to listed targets",
            self.files_targeted
        )?;
        writeln!(f, "{:4} parallel jobs for computing analysis", self.jobs)?;
        write!(f, "{:.2}s elapsed", self.elapsed_time)
    }
}

/// Everything a command needs to render a result.
#[derive(Debug)]
pub struct AnalysisRun<O> {
    pub analysis: Analysis,
    pub selection: FileSelection,
    pub file_infos: FileInfos<O>,
}

/// One checker over one repository.
///
/// Construction validates everything that can be validated up front (worker count,
/// patterns, repository access) and materializes the file selection; [`ContentCommand::run`]
/// then reads and analyzes the targeted files.
pub struct ContentCommand<'a, C: Checker> {
    repository: &'a dyn Repository,
    checker: &'a C,
    pool: WorkerPool,
    selection: FileSelection,
    quiet: bool,
}

impl<'a, C: Checker> ContentCommand<'a, C> {
    /// # Errors
    /// Configuration errors for bad `jobs` or patterns; environment errors if the
    /// repository cannot list its files or the pool cannot start.
    pub fn new(repository: &'a dyn Repository, checker: &'a C, jobs: usize) -> Result<Self> {
        let pool = WorkerPool::new(jobs)?;
        let resolver = ScopeResolver::for_repository(
            repository,
            checker.scope_patterns(),
            checker.target_patterns(),
        )?;
        let selection = resolver.select(repository.tracked_files()?);
        tracing::info!(
            checker = checker.name(),
            tracked = selection.tracked_count(),
            in_scope = selection.in_scope_count(),
            targeted = selection.targeted_count(),
            "selected files"
        );
        Ok(Self {
            repository,
            checker,
            pool,
            selection,
            quiet: true,
        })
    }

    /// Show per-phase progress bars on stderr (when it is a terminal).
    #[must_use]
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.quiet = !enabled;
        self
    }

    #[must_use]
    pub const fn selection(&self) -> &FileSelection {
        &self.selection
    }

    #[must_use]
    pub const fn jobs(&self) -> usize {
        self.pool.jobs()
    }

    /// Read then analyze every targeted file.
    ///
    /// # Errors
    /// Returns `Environment` if the working tree cannot be accessed. Per-file failures are
    /// recorded in the returned [`FileInfos`] instead.
    pub fn run(self) -> Result<AnalysisRun<C::Output>> {
        let jobs = self.pool.jobs();
        let mut file_infos = FileInfos::with_pool(
            self.pool,
            self.repository.root(),
            self.selection.targeted.iter().cloned(),
        );
        let total = file_infos.len() as u64;

        let start = Instant::now();
        let progress = PhaseProgress::new("Reading", total, self.quiet);
        file_infos.read_all_with(self.checker, &|| progress.inc())?;
        progress.finish();

        let progress = PhaseProgress::new("Analyzing", total, self.quiet);
        file_infos.compute_all_with(self.checker, &|| progress.inc());
        progress.finish();
        let elapsed = start.elapsed();

        let analysis = Analysis::new(&self.selection, jobs, elapsed);
        tracing::info!(
            elapsed = analysis.elapsed_time,
            failures = file_infos.failure_count(),
            "analysis finished"
        );
        Ok(AnalysisRun {
            analysis,
            selection: self.selection,
            file_infos,
        })
    }
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;
