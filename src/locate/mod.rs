//! Upward-walking directory location.
//!
//! Node-style resolution finds an installed package by probing
//! `<dir>/node_modules/<name>` in the requiring package's own directory
//! first and then in each ancestor, so a dependency hoisted to the project
//! root is found by every package below it. The same walk locates support
//! files such as `yarn.lock` for projects whose lockfile lives at a
//! workspace root above the manifest being converted.
//!
//! Both probes are read-only and stateless: every call re-walks from its
//! own start directory, and a miss at the filesystem root is a typed error.

use crate::core::LockforgeError;
use anyhow::Result;
use std::path::{Path, PathBuf};

const NODE_MODULES: &str = "node_modules";
const PACKAGE_MANIFEST: &str = "package.json";

/// Find the installed directory of `name`, starting at `start_dir`.
///
/// At each level the candidate is `<dir>/node_modules/<name>`, accepted
/// only if it contains a `package.json`. Scoped names (`@scope/name`) are
/// plain two-segment joins. The start directory itself is probed before
/// any ancestor.
pub fn find_package_dir(name: &str, start_dir: &Path) -> Result<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let candidate = current.join(NODE_MODULES).join(name);
        if candidate.join(PACKAGE_MANIFEST).is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(LockforgeError::PackageDirNotFound {
                name: name.to_string(),
                start: start_dir.display().to_string(),
            }
            .into());
        }
    }
}

/// Find the nearest `file_name` in `start_dir` or any of its ancestors.
pub fn find_file_upward(file_name: &str, start_dir: &Path) -> Result<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let candidate = current.join(file_name);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(LockforgeError::FileNotFoundUpward {
                file: file_name.to_string(),
                start: start_dir.display().to_string(),
            }
            .into());
        }
    }
}
