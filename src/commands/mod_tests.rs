use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::{EXIT_CHECK_FAILED, EXIT_SUCCESS};

const HEADER: &str = "// Copyright (c) 2019 The Bitcoin Core developers\n\
                      // Distributed under the MIT software license, see the accompanying\n\
                      // file COPYING or http://www.opensource.org/licenses/mit-license.php.\n";

fn repo(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, content) in files {
        let path = tmp.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    tmp
}

/// Run against `root` as a plain directory, writing output to `out`.
fn run_in(root: &Path, out: &Path, args: &[&str]) -> i32 {
    let root = root.to_string_lossy().into_owned();
    let out = out.to_string_lossy().into_owned();
    let mut argv = vec!["repo-guard", "--quiet"];
    argv.extend_from_slice(&args[..2]);
    argv.extend(["--no-git", "-C", root.as_str(), "-o", out.as_str()]);
    argv.extend_from_slice(&args[2..]);
    run(&Cli::parse_from(argv))
}

fn out_file() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("out.txt");
    (tmp, path)
}

#[test]
fn clean_repository_checks_ok() {
    let tmp = repo(&[("src/a.cpp", "int a;\n"), ("tool.py", "x = 1\n")]);
    let (_out_dir, out) = out_file();

    let code = run_in(tmp.path(), &out, &["basic-style", "check"]);

    assert_eq!(code, EXIT_SUCCESS);
    let text = fs::read_to_string(out).unwrap();
    assert!(text.contains("   2 files examined according to listed targets"));
    assert!(text.contains("No issues found!"));
    assert!(!text.contains('\x1b'));
}

#[test]
fn style_issue_fails_check_but_not_report() {
    let tmp = repo(&[("src/a.cpp", "int\ta;\n"), ("src/b.cpp", "int b;\n")]);
    let (_out_dir, out) = out_file();

    assert_eq!(
        run_in(tmp.path(), &out, &["basic-style", "check"]),
        EXIT_CHECK_FAILED
    );
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("An issue was found with src/a.cpp"));
    assert!(text.contains("1 of 2 files failed basic-style"));

    assert_eq!(
        run_in(tmp.path(), &out, &["basic-style", "report"]),
        EXIT_SUCCESS
    );
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("\"No tabstops\":"));
}

#[test]
fn target_narrows_check() {
    let tmp = repo(&[("src/a.cpp", "int\ta;\n"), ("lib/b.cpp", "int b;\n")]);
    let (_out_dir, out) = out_file();
    let target = tmp.path().join("lib").to_string_lossy().into_owned();

    let code = run_in(tmp.path(), &out, &["basic-style", "check", target.as_str()]);

    assert_eq!(code, EXIT_SUCCESS);
    assert!(
        fs::read_to_string(out)
            .unwrap()
            .contains("   1 files examined according to listed targets")
    );
}

#[test]
fn copyright_check_json() {
    let good = format!("{HEADER}int a;\n");
    let tmp = repo(&[("src/good.cpp", good.as_str()), ("src/bad.cpp", "int b;\n")]);
    let (_out_dir, out) = out_file();

    let code = run_in(tmp.path(), &out, &["copyright-header", "check", "--json"]);

    assert_eq!(code, EXIT_CHECK_FAILED);
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(value["checker"], "copyright-header");
    assert_eq!(value["passed"], false);
    assert_eq!(value["failed_files"], 1);
    assert_eq!(value["analysis"]["files_targeted"], 2);
}

#[test]
fn files_lists_selection_without_reading() {
    let tmp = repo(&[
        ("src/a.cpp", "int\ta;\n"),
        ("vendor/x.cpp", "int x;\n"),
        ("README.md", "# readme\n"),
        (".repo-guard.toml", "[subtrees]\nfnmatches = [\"vendor/*\"]\n"),
    ]);
    let (_out_dir, out) = out_file();

    let code = run_in(tmp.path(), &out, &["basic-style", "files", "--json"]);

    assert_eq!(code, EXIT_SUCCESS);
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(value["tracked_files"], 4);
    assert_eq!(value["files_in_scope"], 1);
    assert_eq!(value["targeted"], serde_json::json!(["src/a.cpp"]));
}

#[test]
fn bad_target_is_config_error() {
    let tmp = repo(&[("src/a.cpp", "int a;\n")]);
    let (_out_dir, out) = out_file();
    let missing = tmp.path().join("missing.cpp").to_string_lossy().into_owned();

    let code = run_in(tmp.path(), &out, &["basic-style", "check", missing.as_str()]);

    assert_eq!(code, EXIT_CONFIG_ERROR);
    assert!(!out.exists());
}

#[test]
fn zero_jobs_is_config_error() {
    let tmp = repo(&[("src/a.cpp", "int a;\n")]);
    let (_out_dir, out) = out_file();

    let code = run_in(tmp.path(), &out, &["basic-style", "report", "-j", "0"]);

    assert_eq!(code, EXIT_CONFIG_ERROR);
}

#[test]
fn malformed_repo_info_is_config_error() {
    let tmp = repo(&[
        ("src/a.cpp", "int a;\n"),
        (".repo-guard.toml", "[subtrees\n"),
    ]);
    let (_out_dir, out) = out_file();

    let err = run_impl(&Cli::parse_from([
        "repo-guard",
        "basic-style",
        "files",
        "--no-git",
        "-C",
        tmp.path().to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]))
    .unwrap_err();
    assert!(err.is_config_error());

    let code = run_in(tmp.path(), &out, &["basic-style", "files", "--no-repo-info"]);
    assert_eq!(code, EXIT_SUCCESS);
}
