//! The generated `package-lock.json` model.
//!
//! npm's v1 lockfile is a nested tree: a root object naming the project,
//! and a `dependencies` mapping whose entries each pin an exact version
//! and may themselves carry a nested `dependencies` mapping. This module
//! owns that shape, its serialization rules, and atomic persistence.
//!
//! Two rules keep the output byte-reproducible:
//! - every mapping is an [`IndexMap`], so entries serialize in the order
//!   they were built (which mirrors manifest declaration order)
//! - `requires` and `dependencies` on an entry are [`Option`]s that are
//!   only ever `Some` of a non-empty mapping; absent fields are omitted
//!   entirely rather than serialized as `{}`
//!
//! # Examples
//!
//! ```rust
//! use lockforge::lockfile::{LockEntry, PackageLock};
//! use indexmap::IndexMap;
//!
//! let mut dependencies = IndexMap::new();
//! dependencies.insert("left-pad".to_string(), LockEntry::new("1.3.0"));
//!
//! let lock = PackageLock::new("app", "1.0.0", dependencies);
//! let json = lock.to_json()?;
//! assert!(json.contains("\"lockfileVersion\": 1"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::core::LockforgeError;
use crate::utils::fs::atomic_write;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One resolved package in the lockfile tree.
///
/// Field declaration order is serialization order. A package that came
/// from the yarn index carries `integrity`/`resolved` verbatim; a
/// workspace-linked package carries neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEntry {
    /// Exact installed version
    pub version: String,

    /// Integrity hash, verbatim from the yarn index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,

    /// Tarball URL, verbatim from the yarn index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,

    /// The package's own declared dependencies (name → range text);
    /// present only when the installed manifest declares at least one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<IndexMap<String, String>>,

    /// Nested resolved dependencies; present only when non-empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<IndexMap<String, LockEntry>>,
}

impl LockEntry {
    /// A minimal entry pinning just a version.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            integrity: None,
            resolved: None,
            requires: None,
            dependencies: None,
        }
    }
}

/// A complete v1 `package-lock.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageLock {
    /// Root project name, from its manifest
    pub name: String,

    /// Root project version, from its manifest
    pub version: String,

    /// Lockfile format version; always 1
    #[serde(rename = "lockfileVersion")]
    pub lockfile_version: u32,

    /// Always `true` in the v1 format
    pub requires: bool,

    /// The resolved tree; present even when empty
    pub dependencies: IndexMap<String, LockEntry>,
}

impl PackageLock {
    /// Lockfile format version this tool generates.
    const CURRENT_VERSION: u32 = 1;

    /// Standard lockfile name.
    pub const FILE_NAME: &'static str = "package-lock.json";

    /// Wrap a resolved tree in the v1 root object.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        dependencies: IndexMap<String, LockEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            lockfile_version: Self::CURRENT_VERSION,
            requires: true,
            dependencies,
        }
    }

    /// Serialize as pretty-printed JSON (2-space indentation, UTF-8,
    /// no trailing newline).
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize lockfile to JSON")
    }

    /// Write the lockfile atomically, with a trailing newline.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = self.to_json()?;
        content.push('\n');
        atomic_write(path, content.as_bytes())
            .with_context(|| format!("Failed to write lockfile: {}", path.display()))
    }

    /// Read a previously generated lockfile back.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read lockfile: {}", path.display()))?;

        let lock: Self = serde_json::from_str(&content)
            .map_err(|e| LockforgeError::LockfileParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
            .with_context(|| format!("Invalid JSON in lockfile: {}", path.display()))?;

        Ok(lock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn leaf(version: &str, integrity: &str, resolved: &str) -> LockEntry {
        LockEntry {
            version: version.to_string(),
            integrity: Some(integrity.to_string()),
            resolved: Some(resolved.to_string()),
            requires: None,
            dependencies: None,
        }
    }

    #[test]
    fn test_root_serialization_shape() {
        let mut dependencies = IndexMap::new();
        dependencies.insert(
            "left-pad".to_string(),
            leaf("1.0.0", "sha512-abc", "https://example/left-pad-1.0.0.tgz"),
        );
        let lock = PackageLock::new("root", "1.0.0", dependencies);

        let expected = r#"{
  "name": "root",
  "version": "1.0.0",
  "lockfileVersion": 1,
  "requires": true,
  "dependencies": {
    "left-pad": {
      "version": "1.0.0",
      "integrity": "sha512-abc",
      "resolved": "https://example/left-pad-1.0.0.tgz"
    }
  }
}"#;
        assert_eq!(lock.to_json().unwrap(), expected);
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let entry = LockEntry::new("2.0.0");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"version":"2.0.0"}"#);
    }

    #[test]
    fn test_empty_root_dependencies_still_serialized() {
        let lock = PackageLock::new("bare", "0.1.0", IndexMap::new());
        let json = lock.to_json().unwrap();
        assert!(json.contains("\"dependencies\": {}"));
    }

    #[test]
    fn test_entry_order_is_insertion_order() {
        let mut dependencies = IndexMap::new();
        dependencies.insert("zebra".to_string(), LockEntry::new("1.0.0"));
        dependencies.insert("alpha".to_string(), LockEntry::new("2.0.0"));
        let lock = PackageLock::new("app", "1.0.0", dependencies);

        let json = lock.to_json().unwrap();
        let zebra = json.find("\"zebra\"").unwrap();
        let alpha = json.find("\"alpha\"").unwrap();
        assert!(zebra < alpha, "insertion order must survive serialization");
    }

    #[test]
    fn test_nested_entry_serialization() {
        let mut requires = IndexMap::new();
        requires.insert("b".to_string(), "^2.0.0".to_string());
        let mut nested = IndexMap::new();
        nested.insert("b".to_string(), LockEntry::new("2.1.0"));

        let entry = LockEntry {
            version: "1.0.0".to_string(),
            integrity: None,
            resolved: None,
            requires: Some(requires),
            dependencies: Some(nested),
        };

        let value: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["requires"]["b"], "^2.0.0");
        assert_eq!(value["dependencies"]["b"]["version"], "2.1.0");
        assert!(value.get("integrity").is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(PackageLock::FILE_NAME);

        let mut dependencies = IndexMap::new();
        dependencies.insert(
            "lodash".to_string(),
            leaf("4.17.21", "sha512-xyz", "https://registry/lodash.tgz"),
        );
        let lock = PackageLock::new("app", "3.0.0", dependencies);

        lock.save(&path).unwrap();

        // Written file ends with exactly one newline.
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        assert!(!written.ends_with("\n\n"));

        let loaded = PackageLock::load(&path).unwrap();
        assert_eq!(loaded, lock);
        assert_eq!(loaded.lockfile_version, 1);
        assert!(loaded.requires);
    }

    #[test]
    fn test_load_invalid_json_is_typed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(PackageLock::FILE_NAME);
        fs::write(&path, "{ broken").unwrap();

        let err = PackageLock::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LockforgeError>(),
            Some(LockforgeError::LockfileParseError { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = PackageLock::load(&temp.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Cannot read lockfile"));
    }
}
