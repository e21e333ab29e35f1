use std::fs;

use tempfile::TempDir;

use super::*;
use crate::pattern::Pattern;

fn tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("src/sub")).unwrap();
    fs::write(tmp.path().join("src/a.cpp"), "int a;\n").unwrap();
    fs::write(tmp.path().join("src/sub/b.h"), "int b;\n").unwrap();
    tmp
}

fn root_of(tmp: &TempDir) -> PathBuf {
    dunce::canonicalize(tmp.path()).unwrap()
}

#[test]
fn file_target_matches_only_that_file() {
    let tmp = tree();
    let root = root_of(&tmp);
    let patterns = target_patterns(&root, &[root.join("src/a.cpp")]).unwrap();

    assert_eq!(patterns.len(), 1);
    let pattern = Pattern::new(&patterns[0], &root).unwrap();
    assert!(pattern.is_match(&root.join("src/a.cpp")));
    assert!(!pattern.is_match(&root.join("src/a.cpp.orig")));
}

#[test]
fn directory_target_matches_everything_below() {
    let tmp = tree();
    let root = root_of(&tmp);
    let patterns = target_patterns(&root, &[root.join("src")]).unwrap();

    assert!(patterns[0].ends_with("/*"));
    let pattern = Pattern::new(&patterns[0], &root).unwrap();
    assert!(pattern.is_match(&root.join("src/a.cpp")));
    assert!(pattern.is_match(&root.join("src/sub/b.h")));
    assert!(!pattern.is_match(&root.join("README.md")));
}

#[test]
fn glob_characters_in_target_names_are_literal() {
    let tmp = tree();
    let root = root_of(&tmp);
    fs::write(root.join("src/[x]*.c"), "").unwrap();
    let patterns = target_patterns(&root, &[root.join("src/[x]*.c")]).unwrap();

    let pattern = Pattern::new(&patterns[0], &root).unwrap();
    assert!(pattern.is_match(&root.join("src/[x]*.c")));
    assert!(!pattern.is_match(&root.join("src/x1.c")));
}

#[test]
fn missing_target_is_config_error() {
    let tmp = tree();
    let root = root_of(&tmp);
    let err = target_patterns(&root, &[root.join("nope.c")]).unwrap_err();

    assert!(err.is_config_error());
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn target_outside_root_is_config_error() {
    let tmp = tree();
    let other = TempDir::new().unwrap();
    let err = target_patterns(&root_of(&tmp), &[other.path().to_path_buf()]).unwrap_err();

    assert!(err.is_config_error());
    assert!(err.to_string().contains("not inside repository"));
}

#[test]
fn repository_start_prefers_explicit_directory() {
    let args = RunArgs {
        repository: Some(PathBuf::from("/explicit")),
        targets: vec![PathBuf::from("src/a.cpp")],
        ..RunArgs::default()
    };
    assert_eq!(repository_start(&args), PathBuf::from("/explicit"));
}

#[test]
fn repository_start_follows_first_target() {
    let tmp = tree();
    let dir_args = RunArgs {
        targets: vec![tmp.path().join("src")],
        ..RunArgs::default()
    };
    assert_eq!(repository_start(&dir_args), tmp.path().join("src"));

    let file_args = RunArgs {
        targets: vec![tmp.path().join("src/a.cpp")],
        ..RunArgs::default()
    };
    assert_eq!(repository_start(&file_args), tmp.path().join("src"));

    let bare = RunArgs {
        targets: vec![PathBuf::from("a.cpp")],
        ..RunArgs::default()
    };
    assert_eq!(repository_start(&bare), PathBuf::from("."));
    assert_eq!(repository_start(&RunArgs::default()), PathBuf::from("."));

    let no_git = RunArgs {
        no_git: true,
        targets: vec![tmp.path().join("src")],
        ..RunArgs::default()
    };
    assert_eq!(repository_start(&no_git), PathBuf::from("."));
}

#[test]
fn repo_info_sources() {
    let tmp = tree();
    let root = root_of(&tmp);
    fs::write(
        root.join(".repo-guard.toml"),
        "[subtrees]\nfnmatches = [\"src/sub/*\"]\n",
    )
    .unwrap();
    let custom = root.join("custom.toml");
    fs::write(&custom, "[subtrees]\nfnmatches = [\"other/*\"]\n").unwrap();

    let from_root = load_repo_info(&root, &RunArgs::default()).unwrap();
    assert_eq!(from_root.subtree_fnmatches(), ["src/sub/*"]);

    let explicit = RunArgs {
        repo_info: Some(custom),
        ..RunArgs::default()
    };
    assert_eq!(load_repo_info(&root, &explicit).unwrap().subtree_fnmatches(), ["other/*"]);

    let disabled = RunArgs {
        no_repo_info: true,
        ..RunArgs::default()
    };
    assert!(load_repo_info(&root, &disabled).unwrap().subtree_fnmatches().is_empty());
}

#[test]
fn context_from_directory_repository() {
    let tmp = tree();
    let args = RunArgs {
        repository: Some(tmp.path().to_path_buf()),
        no_git: true,
        jobs: Some(3),
        json: true,
        targets: vec![tmp.path().join("src/sub")],
        ..RunArgs::default()
    };
    let ctx = CommandContext::from_args(&args).unwrap();

    assert_eq!(ctx.root(), root_of(&tmp));
    assert_eq!(ctx.jobs, 3);
    assert_eq!(ctx.format, OutputFormat::Json);
    assert_eq!(ctx.targets.len(), 1);
    assert_eq!(ctx.repository.tracked_files().unwrap().len(), 2);
}

#[test]
fn write_output_creates_parent_directories() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("out/nested/report.txt");
    write_output(Some(&path), "hello\n").unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "hello\n");
}
