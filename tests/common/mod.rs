#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the repo-guard binary.
#[macro_export]
macro_rules! repo_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("repo-guard"))
    };
}

/// A valid license header for the default copyright holder.
pub const HEADER_CPP: &str = "\
// Copyright (c) 2015-2019 The Bitcoin Core developers
// Distributed under the MIT software license, see the accompanying
// file COPYING or http://www.opensource.org/licenses/mit-license.php.
";

pub const HEADER_PY: &str = "\
# Copyright (c) 2017 The Bitcoin Core developers
# Distributed under the MIT software license, see the accompanying
# file COPYING or http://www.opensource.org/licenses/mit-license.php.
";

/// Repository info excluding a bundled `src/leveldb` subtree.
pub const LEVELDB_SUBTREE: &str = r#"
[subtrees]
description = "bundled upstream code"
fnmatches = ["src/leveldb/*"]
"#;

/// A temporary working tree used as a plain-directory repository.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content, creating parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_repo_info(&self, content: &str) {
        self.create_file(".repo-guard.toml", content);
    }

    /// Turns the fixture into a git working tree with an empty index.
    pub fn init_git(&self) {
        self.git(&["init", "-q"]);
        self.git(&["config", "user.email", "test@test.com"]);
        self.git(&["config", "user.name", "Test User"]);
    }

    /// Stages the given paths.
    pub fn git_add(&self, paths: &[&str]) {
        let mut args = vec!["add", "--"];
        args.extend_from_slice(paths);
        self.git(&args);
    }

    fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(output.status.success(), "git {args:?} failed");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }
}
