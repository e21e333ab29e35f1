use crate::analysis::ContentCommand;
use crate::checker::Checker;
use crate::cli::Cli;
use crate::error::Result;
use crate::output::{JsonFormatter, OutputFormat, OutputFormatter};
use crate::{EXIT_CHECK_FAILED, EXIT_SUCCESS};

use super::context::{CommandContext, write_output};
use super::{text_formatter, warn_unprocessed};

/// Analyze the targeted files and print the checker's summary.
///
/// Exits with failure only when some file could not be read or analyzed.
pub(super) fn run_report<C: Checker>(checker: &C, ctx: &CommandContext, cli: &Cli) -> Result<i32> {
    let run = ContentCommand::new(ctx.repository.as_ref(), checker, ctx.jobs)?
        .with_progress(!cli.quiet)
        .run()?;
    let report = checker.report(&run.file_infos);

    let content = match ctx.format {
        OutputFormat::Text => text_formatter(ctx, cli).format_report(checker, &run, &report)?,
        OutputFormat::Json => JsonFormatter.format_report(checker, &run, &report)?,
    };
    write_output(ctx.output.as_deref(), &content)?;
    warn_unprocessed(run.file_infos.failure_count(), ctx, cli);

    if run.file_infos.failure_count() > 0 {
        Ok(EXIT_CHECK_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}
