use std::path::{Path, PathBuf};

use crate::error::{RepoGuardError, Result};

use super::RepoInfo;

/// Repository info file looked up at the repository root.
pub const REPO_INFO_FILENAME: &str = ".repo-guard.toml";

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Loads [`RepoInfo`] for a repository.
///
/// Looks for `.repo-guard.toml` in the repository root and falls back to
/// `RepoInfo::default()` when the file is absent.
#[derive(Debug)]
pub struct RepoInfoLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for RepoInfoLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl RepoInfoLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> RepoInfoLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Path of the repository info file for `repo_root`.
    #[must_use]
    pub fn default_path(repo_root: &Path) -> PathBuf {
        repo_root.join(REPO_INFO_FILENAME)
    }

    /// Load the info file from the repository root, or defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self, repo_root: &Path) -> Result<RepoInfo> {
        let path = Self::default_path(repo_root);
        if !self.fs.exists(&path) {
            tracing::debug!(path = %path.display(), "no repository info file, using defaults");
            return Ok(RepoInfo::default());
        }
        self.load_from_path(&path)
    }

    /// Load an explicitly named info file.
    ///
    /// # Errors
    /// Returns a configuration error if the file is missing, unreadable or malformed.
    pub fn load_from_path(&self, path: &Path) -> Result<RepoInfo> {
        if !self.fs.exists(path) {
            return Err(RepoGuardError::Config(format!(
                "Repository info file not found: {}",
                path.display()
            )));
        }
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| RepoGuardError::io_at(e, path.to_path_buf(), "read repository info"))?;
        Self::parse(&content)
    }

    /// Parse repository info from TOML text.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed.
    pub fn parse(content: &str) -> Result<RepoInfo> {
        Ok(toml::from_str(content)?)
    }
}
