use crate::analysis::ContentCommand;
use crate::checker::Checker;
use crate::cli::Cli;
use crate::error::Result;
use crate::output::{JsonFormatter, OutputFormat, OutputFormatter};
use crate::EXIT_SUCCESS;

use super::context::{CommandContext, write_output};
use super::text_formatter;

/// Show which files a run would examine. Nothing is read.
pub(super) fn run_files<C: Checker>(checker: &C, ctx: &CommandContext, cli: &Cli) -> Result<i32> {
    let command = ContentCommand::new(ctx.repository.as_ref(), checker, ctx.jobs)?;
    let selection = command.selection();

    let content = match ctx.format {
        OutputFormat::Text => text_formatter(ctx, cli).format_files(ctx.root(), selection)?,
        OutputFormat::Json => JsonFormatter.format_files(ctx.root(), selection)?,
    };
    write_output(ctx.output.as_deref(), &content)?;
    Ok(EXIT_SUCCESS)
}
