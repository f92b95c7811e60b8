//! End-to-end tests for `lockforge tree`.

use predicates::prelude::*;

mod common;
use common::TestProject;

#[test]
fn test_tree_shows_nested_paths() {
    let project = TestProject::new();
    project.write_manifest(
        r#"{"name": "app", "version": "1.0.0", "dependencies": {"a": "^1.0.0"}}"#,
    );
    project.write_yarn_lock(
        "a@^1.0.0:\n  version \"1.0.0\"\nb@^2.0.0:\n  version \"2.1.0\"\n",
    );
    let a_dir = project.install_with_manifest(
        project.root(),
        "a",
        r#"{"name": "a", "version": "1.0.0", "dependencies": {"b": "^2.0.0"}}"#,
    );
    project.install_with_manifest(&a_dir, "b", r#"{"name": "b", "version": "2.1.0"}"#);

    project
        .command()
        .args(["--quiet", "tree", "package.json"])
        .assert()
        .success()
        .stdout(predicate::eq("a @ 1.0.0\na -> b @ 2.1.0\n"));
}

#[test]
fn test_tree_nothing_for_empty_project() {
    let project = TestProject::new();
    project.write_manifest(r#"{"name": "bare", "version": "0.1.0"}"#);
    project.write_yarn_lock("# yarn lockfile v1\n");

    project
        .command()
        .args(["--quiet", "tree", "package.json"])
        .assert()
        .success()
        .stdout(predicate::eq(""));
}

/// `--hoist` shows the deduplicated shape: the nested copy is promoted
/// and the chain line disappears.
#[test]
fn test_tree_hoist_flag_flattens() {
    let project = TestProject::new();
    project.write_manifest(
        r#"{"name": "app", "version": "1.0.0", "dependencies": {"a": "^1.0.0"}}"#,
    );
    project.write_yarn_lock(
        "a@^1.0.0:\n  version \"1.0.0\"\nb@^2.0.0:\n  version \"2.0.0\"\n",
    );
    let a_dir = project.install_with_manifest(
        project.root(),
        "a",
        r#"{"name": "a", "version": "1.0.0", "dependencies": {"b": "^2.0.0"}}"#,
    );
    project.install_with_manifest(&a_dir, "b", r#"{"name": "b", "version": "2.0.0"}"#);

    project
        .command()
        .args(["--quiet", "tree", "package.json", "--hoist"])
        .assert()
        .success()
        .stdout(predicate::eq("a @ 1.0.0\nb @ 2.0.0\n"));
}

#[test]
fn test_tree_fails_without_lockfile() {
    let project = TestProject::new();
    project.write_manifest(r#"{"name": "app", "version": "1.0.0"}"#);

    project
        .command()
        .args(["tree", "package.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("yarn.lock"));
}
