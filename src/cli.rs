use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::{ColorMode, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "repo-guard")]
#[command(author, version, about = "Repository guard - parallel style and copyright checks")]
#[command(long_about = "Selects tracked files of a repository by pattern, analyzes them in \
    parallel and reports or checks the results.\n\n\
    Exit codes:\n  \
    0 - All checks passed\n  \
    1 - One or more targeted files failed\n  \
    2 - Configuration or environment error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress logging and progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Whitespace and semicolon rules for C, C++, Python and shell sources
    BasicStyle {
        #[command(subcommand)]
        action: Action,
    },

    /// Copyright header presence and placement
    CopyrightHeader {
        #[command(subcommand)]
        action: Action,
    },
}

impl Commands {
    #[must_use]
    pub const fn checker(&self) -> CheckerKind {
        match self {
            Self::BasicStyle { .. } => CheckerKind::BasicStyle,
            Self::CopyrightHeader { .. } => CheckerKind::CopyrightHeader,
        }
    }

    #[must_use]
    pub const fn action(&self) -> &Action {
        match self {
            Self::BasicStyle { action } | Self::CopyrightHeader { action } => action,
        }
    }
}

/// Which checker a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerKind {
    BasicStyle,
    CopyrightHeader,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Analyze targeted files and print a summary
    Report(RunArgs),

    /// Fail if any targeted file does not pass
    Check(RunArgs),

    /// List tracked, in-scope and targeted files without reading them
    Files(RunArgs),
}

impl Action {
    #[must_use]
    pub const fn args(&self) -> &RunArgs {
        match self {
            Self::Report(args) | Self::Check(args) | Self::Files(args) => args,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Report(_) => "report",
            Self::Check(_) => "check",
            Self::Files(_) => "files",
        }
    }
}

#[derive(Args, Debug, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Files or directories to examine (default: everything in scope)
    pub targets: Vec<PathBuf>,

    /// Number of parallel jobs (default: number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Repository to examine (default: the repository containing the first target)
    #[arg(short = 'C', long = "repository", value_name = "DIR")]
    pub repository: Option<PathBuf>,

    /// Treat every file under the root as tracked instead of reading the git index
    #[arg(long)]
    pub no_git: bool,

    /// Path to the repository info file (default: <root>/.repo-guard.toml)
    #[arg(long, value_name = "PATH", conflicts_with = "no_repo_info")]
    pub repo_info: Option<PathBuf>,

    /// Ignore any repository info file and use defaults
    #[arg(long)]
    pub no_repo_info: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl RunArgs {
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
