use std::path::PathBuf;

use super::*;

fn render(out: &ErrorOutput, err: &RepoGuardError) -> String {
    let mut buf = Vec::new();
    out.write(&mut buf, err);
    String::from_utf8(buf).unwrap()
}

#[test]
fn plain_error_line() {
    let mut buf = Vec::new();
    ErrorOutput::with_colors(false).write_error(&mut buf, "Config", "bad target", None, None);
    assert_eq!(String::from_utf8(buf).unwrap(), "✖ Config: bad target\n");
}

#[test]
fn error_with_detail_and_help() {
    let mut buf = Vec::new();
    ErrorOutput::with_colors(false).write_error(
        &mut buf,
        "InvalidPattern",
        "invalid fnmatch pattern '[a'",
        Some("unclosed character class"),
        Some("fnmatch patterns support '*', '?' and '[...]' character classes"),
    );
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(
        text,
        "✖ InvalidPattern: invalid fnmatch pattern '[a'\n\
         \x20 × unclosed character class\n\
         \x20 help: fnmatch patterns support '*', '?' and '[...]' character classes\n"
    );
}

#[test]
fn warning_uses_warning_icon() {
    let mut buf = Vec::new();
    ErrorOutput::with_colors(false).write_warning(&mut buf, "2 files could not be read", None, None);
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "⚠ Warning: 2 files could not be read\n"
    );
}

#[test]
fn colored_output_wraps_header() {
    let mut buf = Vec::new();
    ErrorOutput::with_colors(true).write_error(&mut buf, "IO", "failed", Some("denied"), Some("retry"));
    let text = String::from_utf8(buf).unwrap();

    assert!(text.starts_with("\x1b[1m\x1b[31m✖ IO:\x1b[0m failed\n"));
    assert!(text.contains("\x1b[2m× denied\x1b[0m"));
    assert!(text.contains("\x1b[36mhelp:\x1b[0m retry"));
}

#[test]
fn renders_crate_errors() {
    let out = ErrorOutput::with_colors(false);

    let text = render(&out, &RepoGuardError::InvalidJobs(0));
    assert_eq!(
        text,
        "✖ InvalidJobs: --jobs must be at least 1, got 0\n  help: omit --jobs to use one job per CPU\n"
    );

    let text = render(
        &out,
        &RepoGuardError::BasePath {
            path: PathBuf::from("/nowhere"),
        },
    );
    assert_eq!(text, "✖ BasePath: base path '/nowhere' does not exist\n");
}

#[test]
fn never_mode_disables_colors() {
    let out = ErrorOutput::new(ColorMode::Never);
    let text = render(&out, &RepoGuardError::Config("x".into()));
    assert!(!text.contains('\x1b'));
}
