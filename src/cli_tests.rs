use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use super::*;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn basic_style_report_defaults() {
    let cli = Cli::parse_from(["repo-guard", "basic-style", "report"]);

    assert_eq!(cli.command.checker(), CheckerKind::BasicStyle);
    assert!(matches!(cli.command.action(), Action::Report(_)));
    let args = cli.command.action().args();
    assert!(args.targets.is_empty());
    assert_eq!(args.jobs, None);
    assert_eq!(args.format(), OutputFormat::Text);
    assert!(!args.no_git);
    assert_eq!(cli.verbose, 0);
    assert_eq!(cli.color, ColorMode::Auto);
}

#[test]
fn copyright_check_with_options() {
    let cli = Cli::parse_from([
        "repo-guard",
        "copyright-header",
        "check",
        "-j",
        "4",
        "--json",
        "-C",
        "/tmp/repo",
        "--no-git",
        "-o",
        "out.json",
        "src",
        "test/a.py",
    ]);

    assert_eq!(cli.command.checker(), CheckerKind::CopyrightHeader);
    assert_eq!(cli.command.action().name(), "check");
    let args = cli.command.action().args();
    assert_eq!(args.jobs, Some(4));
    assert_eq!(args.format(), OutputFormat::Json);
    assert_eq!(args.repository, Some(PathBuf::from("/tmp/repo")));
    assert!(args.no_git);
    assert_eq!(args.output, Some(PathBuf::from("out.json")));
    assert_eq!(
        args.targets,
        vec![PathBuf::from("src"), PathBuf::from("test/a.py")]
    );
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "repo-guard",
        "basic-style",
        "files",
        "-vv",
        "--quiet",
        "--color",
        "never",
    ]);

    assert_eq!(cli.verbose, 2);
    assert!(cli.quiet);
    assert_eq!(cli.color, ColorMode::Never);
    assert_eq!(cli.command.action().name(), "files");
}

#[test]
fn repo_info_conflicts_with_no_repo_info() {
    let result = Cli::try_parse_from([
        "repo-guard",
        "basic-style",
        "report",
        "--repo-info",
        "info.toml",
        "--no-repo-info",
    ]);
    assert!(result.is_err());
}

#[test]
fn jobs_must_be_a_number() {
    let result = Cli::try_parse_from(["repo-guard", "basic-style", "check", "-j", "many"]);
    assert!(result.is_err());
}

#[test]
fn action_is_required() {
    assert!(Cli::try_parse_from(["repo-guard", "copyright-header"]).is_err());
    assert!(Cli::try_parse_from(["repo-guard", "unknown", "report"]).is_err());
}
