//! Repository handles: where the list of tracked files and the repository info come from.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::RepoInfo;
use crate::error::{RepoGuardError, Result};

/// A working tree whose version-controlled files can be listed.
pub trait Repository {
    /// Absolute, normalized root of the working tree.
    fn root(&self) -> &Path;

    /// Absolute paths of all tracked files, in a stable order.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be read.
    fn tracked_files(&self) -> Result<Vec<PathBuf>>;

    /// Repository metadata, including the declared excluded subtrees.
    fn info(&self) -> &RepoInfo;
}

/// Canonicalize a repository root, failing if it does not exist.
///
/// # Errors
/// Returns `BasePath` if `root` does not exist.
pub fn canonical_root(root: &Path) -> Result<PathBuf> {
    dunce::canonicalize(root).map_err(|_| RepoGuardError::BasePath {
        path: root.to_path_buf(),
    })
}

/// A git clone; tracked files come from the index (`git ls-files`).
#[derive(Debug, Clone)]
pub struct GitRepository {
    repo_path: PathBuf,
    workdir: PathBuf,
    info: RepoInfo,
}

impl GitRepository {
    /// Open the repository containing `path`.
    ///
    /// # Errors
    /// Returns an error if no repository is found or it has no working tree.
    pub fn discover(path: &Path, info: RepoInfo) -> Result<Self> {
        let repo = gix::discover(path)
            .map_err(|e| RepoGuardError::GitRepoNotFound(format!("{}: {e}", path.display())))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| RepoGuardError::Git("Repository has no working directory".into()))?;
        let workdir = canonical_root(workdir)?;
        Ok(Self {
            repo_path: repo.path().to_path_buf(),
            workdir,
            info,
        })
    }

    /// Locate the working tree root containing `path` without opening it fully.
    ///
    /// # Errors
    /// Returns an error if `path` is not inside a git working tree.
    pub fn discover_root(path: &Path) -> Result<PathBuf> {
        let repo = gix::discover(path)
            .map_err(|e| RepoGuardError::GitRepoNotFound(format!("{}: {e}", path.display())))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| RepoGuardError::Git("Repository has no working directory".into()))?;
        canonical_root(workdir)
    }

    fn open_repo(&self) -> Result<gix::Repository> {
        gix::open(&self.repo_path)
            .map_err(|e| RepoGuardError::Git(format!("Failed to open git repository: {e}")))
    }
}

impl Repository for GitRepository {
    fn root(&self) -> &Path {
        &self.workdir
    }

    fn tracked_files(&self) -> Result<Vec<PathBuf>> {
        let repo = self.open_repo()?;
        let index = repo
            .index_or_empty()
            .map_err(|e| RepoGuardError::Git(format!("Failed to open git index: {e}")))?;
        let state: &gix::index::State = &index;

        let mut files: Vec<PathBuf> = state
            .entries()
            .iter()
            .map(|entry| self.workdir.join(gix::path::from_bstr(entry.path(state))))
            .collect();
        // Unmerged paths appear once per conflict stage.
        files.dedup();
        tracing::debug!(count = files.len(), "listed git-tracked files");
        Ok(files)
    }

    fn info(&self) -> &RepoInfo {
        &self.info
    }
}

/// A plain directory; every regular file below the root counts as tracked.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    root: PathBuf,
    info: RepoInfo,
}

impl DirectoryRepository {
    /// # Errors
    /// Returns `BasePath` if `root` does not exist.
    pub fn new(root: &Path, info: RepoInfo) -> Result<Self> {
        Ok(Self {
            root: canonical_root(root)?,
            info,
        })
    }
}

impl Repository for DirectoryRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn tracked_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || e.file_name() != ".git");
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| self.root.clone(), Path::to_path_buf);
                match e.into_io_error() {
                    Some(source) => RepoGuardError::io_at(source, path, "walk directory"),
                    None => RepoGuardError::Config(format!(
                        "filesystem loop detected at {}",
                        path.display()
                    )),
                }
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        tracing::debug!(count = files.len(), "listed files under directory root");
        Ok(files)
    }

    fn info(&self) -> &RepoInfo {
        &self.info
    }
}

/// A fixed list of files under a root. Paths may be given relative to the root.
#[derive(Debug, Clone)]
pub struct StaticRepository {
    root: PathBuf,
    files: Vec<PathBuf>,
    info: RepoInfo,
}

impl StaticRepository {
    #[must_use]
    pub fn new<P: AsRef<Path>>(root: &Path, files: &[P], info: RepoInfo) -> Self {
        let root = crate::pattern::normalize_path(root);
        let files = files
            .iter()
            .map(|f| crate::pattern::resolve(&root, f.as_ref()))
            .collect();
        Self { root, files, info }
    }
}

impl Repository for StaticRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn tracked_files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.files.clone())
    }

    fn info(&self) -> &RepoInfo {
        &self.info
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
