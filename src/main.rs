use clap::Parser;
use tracing_subscriber::EnvFilter;

use repo_guard::cli::Cli;
use repo_guard::commands;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let exit_code = commands::run(&cli);

    std::process::exit(exit_code);
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level one step from `warn`.
fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
