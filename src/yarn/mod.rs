//! Yarn v1 lockfile parsing.
//!
//! A `yarn.lock` records the outcome of a resolution that already happened:
//! every `name@range` a project (transitively) declared, mapped to the exact
//! version that was picked, the tarball URL it was fetched from, and its
//! integrity hash. This module parses that format into an order-preserving
//! index keyed by the verbatim `name@range` text so the builder can probe it
//! with a single lookup per declared dependency.
//!
//! The format is line-oriented:
//!
//! ```text
//! # yarn lockfile v1
//!
//! "@scope/pkg@^7.0.0", "@scope/pkg@^7.1.0":
//!   version "7.22.13"
//!   resolved "https://registry.yarnpkg.com/..."
//!   integrity sha512-Xktu...
//!   dependencies:
//!     chalk "^2.4.2"
//! ```
//!
//! Top-level lines ending in `:` open an entry for every comma-separated
//! (optionally quoted) key; two-space-indented lines carry its fields;
//! deeper-indented blocks (the transitive requirement lists) are not needed
//! for conversion (the installed manifests are authoritative for those)
//! and are skipped.
//!
//! # Examples
//!
//! ```rust
//! use lockforge::yarn::YarnLock;
//!
//! let lock = YarnLock::parse(
//!     "left-pad@^1.0.0:\n  version \"1.3.0\"\n  integrity sha512-abc\n",
//! )?;
//!
//! let entry = lock.get("left-pad", "^1.0.0").unwrap();
//! assert_eq!(entry.version, "1.3.0");
//! assert!(lock.get("left-pad", "^2.0.0").is_none());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::core::LockforgeError;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::path::Path;

/// One resolved entry from a yarn lockfile.
///
/// `version` is always present (an entry without it is a parse error);
/// `resolved` and `integrity` are optional because workspace and file
/// entries never carry them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YarnEntry {
    /// Exact version the range resolved to
    pub version: String,
    /// Tarball URL the package was fetched from
    pub resolved: Option<String>,
    /// Subresource integrity string for the tarball
    pub integrity: Option<String>,
}

/// A parsed yarn lockfile: `name@range` → resolved entry.
#[derive(Debug, Clone, Default)]
pub struct YarnLock {
    entries: IndexMap<String, YarnEntry>,
}

/// Parser state for the entry currently being assembled.
struct EntryBuilder {
    keys: Vec<String>,
    header_line: usize,
    version: Option<String>,
    resolved: Option<String>,
    integrity: Option<String>,
}

impl EntryBuilder {
    fn flush(self, entries: &mut IndexMap<String, YarnEntry>) -> Result<()> {
        let version = self.version.ok_or_else(|| {
            anyhow::anyhow!(
                "line {}: entry '{}' has no version field",
                self.header_line,
                self.keys.first().map_or("", String::as_str)
            )
        })?;

        let entry = YarnEntry {
            version,
            resolved: self.resolved,
            integrity: self.integrity,
        };
        // Every key of a multi-key header resolves to the same entry.
        for key in self.keys {
            entries.insert(key, entry.clone());
        }
        Ok(())
    }
}

impl YarnLock {
    /// Standard lockfile name searched for next to (or above) the manifest.
    pub const FILE_NAME: &'static str = "yarn.lock";

    /// Read and parse a lockfile from disk.
    ///
    /// Syntax failures become [`LockforgeError::LockfileParseError`] with
    /// the offending line number in the reason.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read lockfile: {}", path.display()))?;

        Self::parse(&content).map_err(|e| {
            anyhow::Error::from(LockforgeError::LockfileParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
        })
    }

    /// Parse yarn v1 lockfile text.
    pub fn parse(content: &str) -> Result<Self> {
        let mut entries = IndexMap::new();
        let mut current: Option<EntryBuilder> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let indent = raw.len() - raw.trim_start().len();

            if indent == 0 {
                // New entry header; the previous one is complete.
                if let Some(builder) = current.take() {
                    builder.flush(&mut entries)?;
                }

                let header = trimmed.strip_suffix(':').ok_or_else(|| {
                    anyhow::anyhow!("line {line_no}: expected ':' after lockfile entry key")
                })?;

                let keys: Vec<String> = header
                    .split(',')
                    .map(|key| unquote(key.trim()).to_string())
                    .collect();
                if keys.iter().any(String::is_empty) {
                    return Err(anyhow::anyhow!("line {line_no}: empty lockfile entry key"));
                }

                current = Some(EntryBuilder {
                    keys,
                    header_line: line_no,
                    version: None,
                    resolved: None,
                    integrity: None,
                });
            } else if indent < 4 {
                let builder = current.as_mut().ok_or_else(|| {
                    anyhow::anyhow!("line {line_no}: field outside of any lockfile entry")
                })?;

                // A trailing ':' opens a nested block (dependencies,
                // optionalDependencies); its contents are skipped below.
                if trimmed.ends_with(':') {
                    continue;
                }

                if let Some((field, value)) = trimmed.split_once(' ') {
                    let value = unquote(value.trim()).to_string();
                    match field {
                        "version" => builder.version = Some(value),
                        "resolved" => builder.resolved = Some(value),
                        "integrity" => builder.integrity = Some(value),
                        _ => {}
                    }
                }
            }
            // indent >= 4: nested block content, not needed for conversion.
        }

        if let Some(builder) = current.take() {
            builder.flush(&mut entries)?;
        }

        Ok(Self { entries })
    }

    /// Look up the entry a `name@range` declaration resolved to.
    #[must_use]
    pub fn get(&self, name: &str, range: &str) -> Option<&YarnEntry> {
        self.entries.get(&format!("{name}@{range}"))
    }

    /// Number of keys in the index (multi-key headers count once per key).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lockfile had no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}
