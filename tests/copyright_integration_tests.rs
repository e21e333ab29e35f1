//! End-to-end tests for the `copyright-header` checker.

mod common;

use common::{HEADER_CPP, HEADER_PY, TestFixture};
use predicates::prelude::*;

fn header_fixture() -> TestFixture {
    let fixture = TestFixture::new();
    fixture.create_file("src/net.cpp", &format!("{HEADER_CPP}\nint net;\n"));
    fixture.create_file(
        "contrib/run.py",
        &format!("#!/usr/bin/env python3\n{HEADER_PY}\nimport os\n"),
    );
    fixture.create_file("doc/notes.txt", "no header needed\n");
    fixture
}

#[test]
fn valid_headers_pass() {
    let fixture = header_fixture();

    repo_guard!()
        .current_dir(fixture.path())
        .args(["--quiet", "copyright-header", "check", "--no-git"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "   2 files examined according to listed targets",
        ));
}

#[test]
fn missing_header_fails_check() {
    let fixture = header_fixture();
    fixture.create_file("src/bare.h", "#pragma once\n");

    repo_guard!()
        .current_dir(fixture.path())
        .args(["--quiet", "--color", "never", "copyright-header", "check", "--no-git"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("An issue was found with src/bare.h"))
        .stdout(predicate::str::contains("1 of 3 files failed copyright-header"));
}

#[test]
fn report_groups_failures_by_reason() {
    let fixture = header_fixture();
    fixture.create_file("src/bare.h", "#pragma once\n");
    fixture.create_file(
        "src/vendored.c",
        &format!("{HEADER_CPP}/* Copyright 1998 someone else */\n"),
    );

    let output = repo_guard!()
        .current_dir(fixture.path())
        .args(["--quiet", "copyright-header", "report", "--no-git", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["report"]["passed"], 2);
    assert_eq!(value["report"]["failed"], 2);
    let statuses: Vec<&str> = value["report"]["failures"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, ["header_missing", "other_copyright_unexpected"]);
}

#[test]
fn repo_info_exceptions_apply() {
    let fixture = header_fixture();
    fixture.create_file("pkg/__init__.py", "");
    fixture.create_file(
        "src/util.h",
        &format!("{HEADER_CPP}// Portions copyright their authors\n"),
    );
    fixture.create_repo_info(
        r#"
[no_copyright_header_expected]
fnmatches = ["*__init__.py"]

[other_copyright_occurrences_expected]
fnmatches = ["src/util.h"]
"#,
    );

    repo_guard!()
        .current_dir(fixture.path())
        .args(["--quiet", "copyright-header", "check", "--no-git"])
        .assert()
        .success();

    // Without the info file both files fail.
    repo_guard!()
        .current_dir(fixture.path())
        .args(["--quiet", "copyright-header", "check", "--no-git", "--no-repo-info"])
        .assert()
        .code(1);
}

#[test]
fn custom_holders_from_repo_info() {
    let fixture = TestFixture::new();
    fixture.create_file(
        "a.cpp",
        &HEADER_CPP.replace("The Bitcoin Core developers", "Example Corp."),
    );
    let info = fixture.join("holders.toml");
    std::fs::write(&info, "[copyright]\nholders = [\"Example Corp.\"]\n").unwrap();

    repo_guard!()
        .current_dir(fixture.path())
        .args(["--quiet", "copyright-header", "check", "--no-git"])
        .assert()
        .code(1);

    repo_guard!()
        .current_dir(fixture.path())
        .args(["--quiet", "copyright-header", "check", "--no-git", "--repo-info"])
        .arg(&info)
        .assert()
        .success();
}
