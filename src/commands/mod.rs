//! Glue between the command line and the analysis pipeline: one run per
//! (checker, action) pair, rendered in the requested format, mapped to an exit code.

mod check;
mod context;
mod files;
mod report;

pub use context::{CommandContext, target_patterns};

use crate::checker::{BasicStyle, Checker, CopyrightHeader};
use crate::cli::{Action, CheckerKind, Cli};
use crate::error::Result;
use crate::output::{ColorMode, ErrorOutput, OutputFormat, TextFormatter};
use crate::EXIT_CONFIG_ERROR;

/// Run the parsed command line and return the process exit code.
#[must_use]
pub fn run(cli: &Cli) -> i32 {
    match run_impl(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            ErrorOutput::new(cli.color).print(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// # Errors
/// Returns configuration or environment errors raised before or during the run.
pub fn run_impl(cli: &Cli) -> Result<i32> {
    let action = cli.command.action();
    let ctx = CommandContext::from_args(action.args())?;
    match cli.command.checker() {
        CheckerKind::BasicStyle => {
            let checker = BasicStyle::new(ctx.root(), ctx.targets.clone())?;
            run_action(&checker, action, &ctx, cli)
        }
        CheckerKind::CopyrightHeader => {
            let checker =
                CopyrightHeader::new(ctx.root(), ctx.repository.info(), ctx.targets.clone())?;
            run_action(&checker, action, &ctx, cli)
        }
    }
}

fn run_action<C: Checker>(
    checker: &C,
    action: &Action,
    ctx: &CommandContext,
    cli: &Cli,
) -> Result<i32> {
    tracing::info!(checker = checker.name(), action = action.name(), "running");
    match action {
        Action::Report(_) => report::run_report(checker, ctx, cli),
        Action::Check(_) => check::run_check(checker, ctx, cli),
        Action::Files(_) => files::run_files(checker, ctx, cli),
    }
}

/// Text output never carries color codes into a file.
fn text_formatter(ctx: &CommandContext, cli: &Cli) -> TextFormatter {
    let mode = if ctx.output.is_some() {
        ColorMode::Never
    } else {
        cli.color
    };
    TextFormatter::with_verbose(mode, cli.verbose)
}

/// Text on stdout already lists unprocessed files; other destinations get a note on stderr.
fn warn_unprocessed(failures: usize, ctx: &CommandContext, cli: &Cli) {
    let listed = ctx.format == OutputFormat::Text && ctx.output.is_none();
    if failures == 0 || listed || cli.quiet {
        return;
    }
    ErrorOutput::new(cli.color)
        .print_warning(&format!("{failures} files could not be read or analyzed"));
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
