//! The `package.json` manifest model.
//!
//! A manifest declares a package's identity (`name`, `version`) and its
//! direct runtime dependencies as a name → range text mapping. Only those
//! three fields participate in conversion; everything else in the file
//! (scripts, devDependencies, engines, ...) is ignored on load.
//!
//! Dependency declaration order is significant: it drives the order of
//! resolution and therefore the order of entries in the generated
//! lockfile, so the mapping is an [`IndexMap`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use lockforge::manifest::PackageManifest;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let manifest = PackageManifest::load(Path::new("package.json")).await?;
//! println!("{} v{}", manifest.name, manifest.version);
//! for (name, range) in &manifest.dependencies {
//!     println!("  requires {name} {range}");
//! }
//! # Ok(())
//! # }
//! ```

use crate::core::LockforgeError;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A parsed `package.json`.
///
/// `name` and `version` are required; a manifest without them cannot
/// participate in identity checks or version fallback. Unknown fields are
/// ignored, and ranges are opaque text; they are never interpreted as
/// semver, only used as lookup keys against the yarn index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// The package's declared name
    pub name: String,

    /// The package's declared version
    pub version: String,

    /// Direct runtime dependencies: package name → declared range text,
    /// in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: IndexMap<String, String>,
}

impl PackageManifest {
    /// Standard manifest file name.
    pub const FILE_NAME: &'static str = "package.json";

    /// Load and parse a manifest file.
    ///
    /// Read failures carry the path; JSON failures become
    /// [`LockforgeError::ManifestParseError`] so callers can match on them.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read manifest file: {}", path.display()))?;

        let manifest: Self = serde_json::from_str(&content)
            .map_err(|e| LockforgeError::ManifestParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
            .with_context(|| {
                format!(
                    "Invalid JSON in manifest file: {}\n\n\
                    Common causes:\n\
                    - Trailing commas after the last entry\n\
                    - Comments (JSON does not allow them)\n\
                    - Missing 'name' or 'version' field",
                    path.display()
                )
            })?;

        Ok(manifest)
    }
}
