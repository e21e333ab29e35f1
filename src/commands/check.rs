use crate::analysis::ContentCommand;
use crate::checker::Checker;
use crate::cli::Cli;
use crate::error::Result;
use crate::output::{FileStatus, JsonFormatter, OutputFormat, OutputFormatter};
use crate::{EXIT_CHECK_FAILED, EXIT_SUCCESS};

use super::context::{CommandContext, write_output};
use super::{text_formatter, warn_unprocessed};

/// Analyze the targeted files; every one must pass.
pub(super) fn run_check<C: Checker>(checker: &C, ctx: &CommandContext, cli: &Cli) -> Result<i32> {
    let run = ContentCommand::new(ctx.repository.as_ref(), checker, ctx.jobs)?
        .with_progress(!cli.quiet)
        .run()?;

    let content = match ctx.format {
        OutputFormat::Text => text_formatter(ctx, cli).format_check(checker, &run)?,
        OutputFormat::Json => JsonFormatter.format_check(checker, &run)?,
    };
    write_output(ctx.output.as_deref(), &content)?;
    warn_unprocessed(run.file_infos.failure_count(), ctx, cli);

    let all_passed = run
        .file_infos
        .iter()
        .all(|info| FileStatus::of(checker, info) == FileStatus::Passed);
    if all_passed {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_CHECK_FAILED)
    }
}
