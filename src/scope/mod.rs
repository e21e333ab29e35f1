//! Narrowing tracked files to the files a checker applies to (scope), and then to the
//! files one invocation asked for (targets).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{RepoGuardError, Result};
use crate::filter::{FileFilter, Verdict};
use crate::pattern::Pattern;
use crate::repository::Repository;

/// Builds the scope filter and the target filter from one set of patterns.
///
/// - scope filter: `include(include_fnmatches)` then `exclude(exclude_fnmatches)`
/// - target filter: the scope filter followed by `include(target_fnmatches)`
///
/// With no target patterns the extra rule uses [`Pattern::any`], so the whole scope is
/// targeted.
#[derive(Debug, Clone)]
pub struct ScopeResolver {
    root: PathBuf,
    scope_filter: FileFilter,
    target_filter: FileFilter,
}

impl ScopeResolver {
    /// # Errors
    /// Returns `BasePath` if `root` does not exist, or `InvalidPattern` for a bad pattern.
    pub fn new<I, E, T>(
        root: &Path,
        include_fnmatches: &[I],
        exclude_fnmatches: &[E],
        target_fnmatches: &[T],
    ) -> Result<Self>
    where
        I: AsRef<str>,
        E: AsRef<str>,
        T: AsRef<str>,
    {
        if !root.exists() {
            return Err(RepoGuardError::BasePath {
                path: root.to_path_buf(),
            });
        }

        let mut scope_filter = FileFilter::new();
        scope_filter.append_include(include_fnmatches, root)?;
        scope_filter.append_exclude(exclude_fnmatches, root)?;

        let mut target_filter = scope_filter.clone();
        if target_fnmatches.is_empty() {
            target_filter.append_patterns(Verdict::Include, vec![Pattern::any()], root);
        } else {
            target_filter.append_include(target_fnmatches, root)?;
        }

        Ok(Self {
            root: root.to_path_buf(),
            scope_filter,
            target_filter,
        })
    }

    /// Resolver for `repository`, excluding its declared subtrees.
    ///
    /// # Errors
    /// See [`ScopeResolver::new`].
    pub fn for_repository<R, I, T>(
        repository: &R,
        include_fnmatches: &[I],
        target_fnmatches: &[T],
    ) -> Result<Self>
    where
        R: Repository + ?Sized,
        I: AsRef<str>,
        T: AsRef<str>,
    {
        Self::new(
            repository.root(),
            include_fnmatches,
            repository.info().subtree_fnmatches(),
            target_fnmatches,
        )
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn scope_filter(&self) -> &FileFilter {
        &self.scope_filter
    }

    #[must_use]
    pub const fn target_filter(&self) -> &FileFilter {
        &self.target_filter
    }

    /// Tracked files admitted by the scope filter, in input order.
    #[must_use]
    pub fn files_in_scope(&self, tracked_files: &[PathBuf]) -> Vec<PathBuf> {
        tracked_files
            .iter()
            .filter(|f| self.scope_filter.evaluate(f))
            .cloned()
            .collect()
    }

    /// In-scope files also admitted by the target filter, in input order.
    #[must_use]
    pub fn files_targeted(&self, files_in_scope: &[PathBuf]) -> Vec<PathBuf> {
        files_in_scope
            .iter()
            .filter(|f| self.target_filter.evaluate(f))
            .cloned()
            .collect()
    }

    /// Materialize all three file sets at once.
    #[must_use]
    pub fn select(&self, tracked_files: Vec<PathBuf>) -> FileSelection {
        let in_scope = self.files_in_scope(&tracked_files);
        let targeted = self.files_targeted(&in_scope);
        tracing::debug!(
            tracked = tracked_files.len(),
            in_scope = in_scope.len(),
            targeted = targeted.len(),
            "resolved file scope"
        );
        FileSelection {
            tracked: tracked_files,
            in_scope,
            targeted,
        }
    }
}

/// Tracked, in-scope and targeted files, materialized once so counts and content agree.
///
/// `targeted ⊆ in_scope ⊆ tracked` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileSelection {
    pub tracked: Vec<PathBuf>,
    pub in_scope: Vec<PathBuf>,
    pub targeted: Vec<PathBuf>,
}

impl FileSelection {
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    #[must_use]
    pub fn in_scope_count(&self) -> usize {
        self.in_scope.len()
    }

    #[must_use]
    pub fn targeted_count(&self) -> usize {
        self.targeted.len()
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
