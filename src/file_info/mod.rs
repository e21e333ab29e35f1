//! Per-file records and the two parallel phases (read, then compute) that fill them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::checker::Checker;
use crate::error::{RepoGuardError, Result};
use crate::pool::WorkerPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileErrorKind {
    Read,
    Decode,
    Analysis,
}

impl fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read error"),
            Self::Decode => write!(f, "decode error"),
            Self::Analysis => write!(f, "analysis error"),
        }
    }
}

/// A failure confined to one file. Recorded on its [`FileInfo`], never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub kind: FileErrorKind,
    pub message: String,
}

impl FileError {
    pub fn new(kind: FileErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn read(source: &std::io::Error) -> Self {
        Self::new(FileErrorKind::Read, source.to_string())
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        Self::new(FileErrorKind::Analysis, message)
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FileError {}

/// Read a file as UTF-8 text.
///
/// # Errors
/// `Read` if the file cannot be read, `Decode` if it is not valid UTF-8.
pub fn read_text(path: &Path) -> std::result::Result<String, FileError> {
    let bytes = fs::read(path).map_err(|e| FileError::read(&e))?;
    String::from_utf8(bytes).map_err(|e| {
        FileError::new(
            FileErrorKind::Decode,
            format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        )
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome<O> {
    Pending,
    Read,
    Computed(O),
    Failed(FileError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo<O> {
    path: PathBuf,
    content: Option<String>,
    outcome: FileOutcome<O>,
}

impl<O> FileInfo<O> {
    const fn new(path: PathBuf) -> Self {
        Self {
            path,
            content: None,
            outcome: FileOutcome::Pending,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    #[must_use]
    pub const fn outcome(&self) -> &FileOutcome<O> {
        &self.outcome
    }

    #[must_use]
    pub const fn output(&self) -> Option<&O> {
        match &self.outcome {
            FileOutcome::Computed(output) => Some(output),
            _ => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&FileError> {
        match &self.outcome {
            FileOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn read_with<C>(&mut self, checker: &C)
    where
        C: Checker<Output = O> + ?Sized,
    {
        match checker.read(&self.path) {
            Ok(content) => {
                self.content = Some(content);
                self.outcome = FileOutcome::Read;
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to read file");
                self.outcome = FileOutcome::Failed(err);
            }
        }
    }

    fn compute_with<C>(&mut self, checker: &C)
    where
        C: Checker<Output = O> + ?Sized,
    {
        let (FileOutcome::Read, Some(content)) = (&self.outcome, &self.content) else {
            return;
        };
        self.outcome = match checker.compute(&self.path, content) {
            Ok(output) => FileOutcome::Computed(output),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to analyze file");
                FileOutcome::Failed(err)
            }
        };
        tracing::trace!(path = %self.path.display(), "computed");
    }
}

/// Ordered collection of [`FileInfo`] keyed by path, plus the pool that processes it.
///
/// Iteration order is the order paths were given in, whatever order workers finish in.
/// Duplicate input paths collapse to the first occurrence.
#[derive(Debug)]
pub struct FileInfos<O> {
    root: PathBuf,
    entries: IndexMap<PathBuf, FileInfo<O>>,
    pool: WorkerPool,
}

impl<O: Send> FileInfos<O> {
    /// # Errors
    /// `InvalidJobs` for `jobs == 0`; `WorkerPool` if the pool cannot start.
    pub fn new<I>(jobs: usize, root: &Path, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        Ok(Self::with_pool(WorkerPool::new(jobs)?, root, paths))
    }

    pub fn with_pool<I>(pool: WorkerPool, root: &Path, paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut entries = IndexMap::new();
        for path in paths {
            entries
                .entry(path)
                .or_insert_with_key(|p| FileInfo::new(p.clone()));
        }
        Self {
            root: root.to_path_buf(),
            entries,
            pool,
        }
    }

    /// Load every file's content in parallel.
    ///
    /// # Errors
    /// `Environment` if the working tree root itself cannot be listed. Failures of single
    /// files are recorded on their entries instead.
    pub fn read_all<C>(&mut self, checker: &C) -> Result<()>
    where
        C: Checker<Output = O> + ?Sized,
    {
        self.read_all_with(checker, &|| {})
    }

    /// [`FileInfos::read_all`], calling `tick` once per file.
    ///
    /// # Errors
    /// See [`FileInfos::read_all`].
    pub fn read_all_with<C>(&mut self, checker: &C, tick: &(dyn Fn() + Sync)) -> Result<()>
    where
        C: Checker<Output = O> + ?Sized,
    {
        self.ensure_root_accessible()?;
        tracing::debug!(files = self.entries.len(), jobs = self.pool.jobs(), "read phase");
        let Self { entries, pool, .. } = self;
        pool.install(|| {
            entries.par_values_mut().for_each(|info| {
                info.read_with(checker);
                tick();
            });
        });
        Ok(())
    }

    /// Run the checker's analysis over every successfully read file, in parallel.
    pub fn compute_all<C>(&mut self, checker: &C)
    where
        C: Checker<Output = O> + ?Sized,
    {
        self.compute_all_with(checker, &|| {});
    }

    /// [`FileInfos::compute_all`], calling `tick` once per file.
    pub fn compute_all_with<C>(&mut self, checker: &C, tick: &(dyn Fn() + Sync))
    where
        C: Checker<Output = O> + ?Sized,
    {
        tracing::debug!(files = self.entries.len(), jobs = self.pool.jobs(), "compute phase");
        let Self { entries, pool, .. } = self;
        pool.install(|| {
            entries.par_values_mut().for_each(|info| {
                info.compute_with(checker);
                tick();
            });
        });
    }

    fn ensure_root_accessible(&self) -> Result<()> {
        fs::read_dir(&self.root)
            .map(drop)
            .map_err(|source| RepoGuardError::Environment {
                path: self.root.clone(),
                source,
            })
    }
}

impl<O> FileInfos<O> {
    #[must_use]
    pub const fn jobs(&self) -> usize {
        self.pool.jobs()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&FileInfo<O>> {
        self.entries.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileInfo<O>> {
        self.entries.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }

    /// Entries whose read or analysis failed, in order.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &FileError)> {
        self.iter()
            .filter_map(|info| info.error().map(|err| (info.path(), err)))
    }

    /// Entries with a computed output, in order.
    pub fn outputs(&self) -> impl Iterator<Item = (&Path, &O)> {
        self.iter()
            .filter_map(|info| info.output().map(|out| (info.path(), out)))
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

impl<'a, O> IntoIterator for &'a FileInfos<O> {
    type Item = &'a FileInfo<O>;
    type IntoIter = indexmap::map::Values<'a, PathBuf, FileInfo<O>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
#[path = "file_info_tests.rs"]
mod tests;
