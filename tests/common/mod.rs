//! Common test utilities for lockforge integration tests.
//!
//! [`TestProject`] lays out a realistic project in a tempdir - manifest,
//! `yarn.lock`, and nested `node_modules` directories - and runs the real
//! binary against it.

// Not every helper is used by every integration test file.
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway project directory with builders for the three inputs.
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// The project root (also the default working directory for the binary).
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root().join("package.json")
    }

    /// Write the root `package.json`.
    pub fn write_manifest(&self, content: &str) {
        fs::write(self.manifest_path(), content).expect("failed to write manifest");
    }

    /// Write the root `yarn.lock`.
    pub fn write_yarn_lock(&self, content: &str) {
        fs::write(self.root().join("yarn.lock"), content).expect("failed to write yarn.lock");
    }

    /// Install a package at `<base>/node_modules/<name>` with the given
    /// manifest body, returning the package directory so nested installs
    /// can chain off it.
    pub fn install_with_manifest(&self, base: &Path, name: &str, manifest: &str) -> PathBuf {
        let dir = base.join("node_modules").join(name);
        fs::create_dir_all(&dir).expect("failed to create package dir");
        fs::write(dir.join("package.json"), manifest).expect("failed to write package manifest");
        dir
    }

    /// Install a dependency-free package at the project root.
    pub fn install(&self, name: &str, version: &str) -> PathBuf {
        self.install_with_manifest(
            self.root(),
            name,
            &format!(r#"{{"name": "{name}", "version": "{version}"}}"#),
        )
    }

    /// A command for the lockforge binary, rooted in the project with
    /// colors disabled for stable assertions.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("lockforge").expect("lockforge binary should build");
        cmd.current_dir(self.root()).env("NO_COLOR", "1");
        cmd
    }
}
