use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid fnmatch pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Base path does not exist: {}", path.display())]
    BasePath { path: PathBuf },

    #[error("Invalid number of parallel jobs: {0} (must be at least 1)")]
    InvalidJobs(usize),

    #[error("Invalid regex '{pattern}'")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: Option<PathBuf>,
        operation: Option<&'static str>,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Not a git repository: {0}")]
    GitRepoNotFound(String),

    #[error("Working tree is not accessible: {}", path.display())]
    Environment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl From<std::io::Error> for RepoGuardError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: None,
            operation: None,
        }
    }
}

impl RepoGuardError {
    /// Wraps an IO error with the path and operation that produced it.
    #[must_use]
    pub const fn io_at(source: std::io::Error, path: PathBuf, operation: &'static str) -> Self {
        Self::Io {
            source,
            path: Some(path),
            operation: Some(operation),
        }
    }

    /// Short category name shown in the error header.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::BasePath { .. } => "BasePath",
            Self::InvalidJobs(_) => "InvalidJobs",
            Self::InvalidRegex { .. } => "InvalidRegex",
            Self::Io { .. } => "IO",
            Self::TomlParse(_) => "TomlParse",
            Self::JsonSerialize(_) => "JsonSerialize",
            Self::Git(_) => "Git",
            Self::GitRepoNotFound(_) => "GitRepoNotFound",
            Self::Environment { .. } => "Environment",
            Self::WorkerPool(_) => "WorkerPool",
        }
    }

    /// Primary message without the category prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Config(msg) | Self::Git(msg) | Self::GitRepoNotFound(msg) => msg.clone(),
            Self::InvalidPattern { pattern, .. } => format!("invalid fnmatch pattern '{pattern}'"),
            Self::BasePath { path } => format!("base path '{}' does not exist", path.display()),
            Self::InvalidJobs(jobs) => format!("--jobs must be at least 1, got {jobs}"),
            Self::InvalidRegex { pattern, .. } => format!("invalid regex '{pattern}'"),
            Self::Io {
                path, operation, ..
            } => match (operation, path) {
                (Some(op), Some(p)) => format!("failed to {op} '{}'", p.display()),
                (Some(op), None) => format!("failed to {op}"),
                (None, Some(p)) => format!("IO error on '{}'", p.display()),
                (None, None) => "IO error".to_string(),
            },
            Self::TomlParse(_) => "failed to parse repository info".to_string(),
            Self::JsonSerialize(_) => "failed to serialize JSON output".to_string(),
            Self::Environment { path, .. } => {
                format!("working tree '{}' is not accessible", path.display())
            }
            Self::WorkerPool(_) => "failed to start worker pool".to_string(),
        }
    }

    /// Underlying cause, if there is one worth showing.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source.to_string()),
            Self::InvalidRegex { source, .. } => Some(source.to_string()),
            Self::Io { source, .. } | Self::Environment { source, .. } => Some(source.to_string()),
            Self::TomlParse(e) => Some(e.to_string()),
            Self::JsonSerialize(e) => Some(e.to_string()),
            Self::WorkerPool(e) => Some(e.to_string()),
            Self::Config(_)
            | Self::BasePath { .. }
            | Self::InvalidJobs(_)
            | Self::Git(_)
            | Self::GitRepoNotFound(_) => None,
        }
    }

    /// Actionable hint for the user.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidPattern { .. } => {
                Some("fnmatch patterns support '*', '?' and '[...]' character classes")
            }
            Self::InvalidJobs(_) => Some("omit --jobs to use one job per CPU"),
            Self::GitRepoNotFound(_) => {
                Some("pass --no-git to treat every file under the root as tracked")
            }
            Self::TomlParse(_) => Some("check the syntax of .repo-guard.toml"),
            Self::Environment { .. } => Some("check that the repository exists and is readable"),
            _ => None,
        }
    }

    /// Errors raised while validating the invocation, before any file is read.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::InvalidPattern { .. }
                | Self::BasePath { .. }
                | Self::InvalidJobs(_)
                | Self::InvalidRegex { .. }
                | Self::TomlParse(_)
        )
    }

    /// Errors meaning the run itself cannot proceed.
    #[must_use]
    pub const fn is_environment_error(&self) -> bool {
        matches!(
            self,
            Self::Environment { .. }
                | Self::WorkerPool(_)
                | Self::Git(_)
                | Self::GitRepoNotFound(_)
                | Self::Io { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RepoGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
