use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::RunArgs;
use crate::config::{RepoInfo, RepoInfoLoader};
use crate::error::{RepoGuardError, Result};
use crate::output::OutputFormat;
use crate::pool::default_jobs;
use crate::repository::{DirectoryRepository, GitRepository, Repository, canonical_root};

/// Everything an action needs before a checker is built.
pub struct CommandContext {
    pub repository: Box<dyn Repository>,
    /// Absolute target patterns; empty means the whole scope.
    pub targets: Vec<String>,
    pub jobs: usize,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl CommandContext {
    /// Open the repository, load its info file and turn targets into patterns.
    ///
    /// # Errors
    /// Configuration errors for bad targets or info files; environment errors if the
    /// repository cannot be opened.
    pub fn from_args(args: &RunArgs) -> Result<Self> {
        let start = repository_start(args);
        let repository = open_repository(&start, args)?;
        let targets = target_patterns(repository.root(), &args.targets)?;
        let jobs = args.jobs.unwrap_or_else(default_jobs);
        tracing::debug!(
            root = %repository.root().display(),
            targets = targets.len(),
            jobs,
            "command context ready"
        );
        Ok(Self {
            repository,
            targets,
            jobs,
            format: args.format(),
            output: args.output.clone(),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.repository.root()
    }
}

/// Directory used to locate the repository: `-C`, else the first target, else `.`.
///
/// A plain directory has no enclosing repository to discover, so `--no-git`
/// without `-C` always starts from `.`.
pub(crate) fn repository_start(args: &RunArgs) -> PathBuf {
    if let Some(dir) = &args.repository {
        return dir.clone();
    }
    if args.no_git {
        return PathBuf::from(".");
    }
    match args.targets.first() {
        Some(target) if target.is_dir() => target.clone(),
        Some(target) => target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        None => PathBuf::from("."),
    }
}

fn open_repository(start: &Path, args: &RunArgs) -> Result<Box<dyn Repository>> {
    if args.no_git {
        let root = canonical_root(start)?;
        let info = load_repo_info(&root, args)?;
        return Ok(Box::new(DirectoryRepository::new(&root, info)?));
    }
    let root = GitRepository::discover_root(start)?;
    let info = load_repo_info(&root, args)?;
    Ok(Box::new(GitRepository::discover(&root, info)?))
}

pub(crate) fn load_repo_info(root: &Path, args: &RunArgs) -> Result<RepoInfo> {
    if args.no_repo_info {
        return Ok(RepoInfo::default());
    }
    let loader = RepoInfoLoader::new();
    match &args.repo_info {
        Some(path) => loader.load_from_path(path),
        None => loader.load(root),
    }
}

/// Convert command-line targets into absolute patterns under `root`.
///
/// A file becomes a pattern matching exactly that file, a directory matches
/// everything below it.
///
/// # Errors
/// Returns a configuration error if a target does not exist or lies outside `root`.
pub fn target_patterns(root: &Path, targets: &[PathBuf]) -> Result<Vec<String>> {
    targets.iter().map(|t| target_pattern(root, t)).collect()
}

fn target_pattern(root: &Path, target: &Path) -> Result<String> {
    let path = dunce::canonicalize(target).map_err(|_| {
        RepoGuardError::Config(format!("target '{}' does not exist", target.display()))
    })?;
    if !path.starts_with(root) {
        return Err(RepoGuardError::Config(format!(
            "target '{}' is not inside repository '{}'",
            target.display(),
            root.display()
        )));
    }
    let literal = globset::escape(&path.to_string_lossy());
    if path.is_dir() {
        Ok(format!("{literal}/*"))
    } else {
        Ok(literal)
    }
}

/// Write `content` to `output_path`, or to stdout when no path is given.
///
/// # Errors
/// Returns an I/O error if the file or its parent directories cannot be written.
pub(crate) fn write_output(output_path: Option<&Path>, content: &str) -> Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| RepoGuardError::io_at(e, parent.to_path_buf(), "create directory"))?;
        }
        fs::write(path, content)
            .map_err(|e| RepoGuardError::io_at(e, path.to_path_buf(), "write output"))?;
    } else {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
