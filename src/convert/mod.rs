//! The conversion pipeline.
//!
//! This module wires the individual stages into the single operation the
//! tool exists for: take a project manifest, find and parse the
//! `yarn.lock` that resolved it, rebuild the resolved tree from the
//! installed `node_modules` directories, optionally hoist it flat, and
//! optionally persist it as `package-lock.json`.
//!
//! Every stage is fatal on error and nothing is written until the whole
//! tree has been built, so a failed conversion leaves no file behind.
//!
//! # Examples
//!
//! ```rust,no_run
//! use lockforge::convert::{ConvertOptions, convert};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let options = ConvertOptions::new("package.json");
//! let lock = convert(&options).await?;
//! println!("{}", lock.to_json()?);
//! # Ok(())
//! # }
//! ```

use crate::hoist::hoist_dependencies;
use crate::locate;
use crate::lockfile::PackageLock;
use crate::manifest::PackageManifest;
use crate::resolver::build_lock_file;
use crate::yarn::YarnLock;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// What to convert and where the result should go.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Path to the root `package.json`
    pub manifest_path: PathBuf,

    /// Where to write the generated lockfile; `None` means the result is
    /// only returned, with no file side effect
    pub output_path: Option<PathBuf>,

    /// Whether to run the hoisting pass on the built tree
    pub hoist: bool,
}

impl ConvertOptions {
    /// Options for an in-memory conversion with hoisting enabled.
    #[must_use]
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            output_path: None,
            hoist: true,
        }
    }
}

/// Run the full conversion described by `options`.
///
/// The `yarn.lock` is searched for in the manifest's directory and every
/// ancestor, so converting one workspace member picks up the lockfile at
/// the workspace root. Hoisting, when enabled, runs strictly after the
/// tree is complete.
pub async fn convert(options: &ConvertOptions) -> Result<PackageLock> {
    let root_dir = manifest_dir(&options.manifest_path);

    let yarn_path = locate::find_file_upward(YarnLock::FILE_NAME, root_dir)?;
    info!("using lockfile {}", yarn_path.display());
    let yarn = YarnLock::load(&yarn_path).await?;

    let manifest = PackageManifest::load(&options.manifest_path).await?;
    info!(
        "converting {} v{} ({} direct dependencies)",
        manifest.name,
        manifest.version,
        manifest.dependencies.len()
    );

    let mut lock = build_lock_file(&manifest, &yarn, root_dir).await?;

    if options.hoist {
        hoist_dependencies(&mut lock.dependencies);
    }

    if let Some(path) = &options.output_path {
        lock.save(path)?;
        info!("wrote {}", path.display());
    }

    Ok(lock)
}

/// The directory a manifest path lives in; a bare file name means the
/// current directory.
fn manifest_dir(manifest_path: &Path) -> &Path {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
