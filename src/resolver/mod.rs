//! Lock tree construction.
//!
//! This module implements the core conversion algorithm: walking a root
//! manifest's declared dependencies against the installed `node_modules`
//! tree and the parsed yarn index, and producing the nested
//! [`PackageLock`] tree.
//!
//! # Resolution of one dependency
//!
//! For every declared `(name, range)` pair, in declaration order:
//!
//! 1. **Locate**: [`locate::find_package_dir`] walks upward from the
//!    requiring package's directory, so hoisted installations are found
//!    exactly like Node's own resolution would find them. A miss is fatal.
//! 2. **Canonicalize**: the installed directory is resolved through
//!    symlinks before anything else looks at it. Workspace-linked packages
//!    therefore have one identity no matter how many links point at them.
//! 3. **Verify identity**: the directory's own manifest must name the
//!    requested package. A mismatch means the installation is corrupted,
//!    and the whole build aborts rather than describe a broken tree.
//! 4. **Pick the version source**: a `name@range` hit in the yarn index
//!    supplies `version`, `integrity`, and `resolved` verbatim. A miss
//!    means the package never went through the registry (workspace link);
//!    its own manifest supplies the version and there is nothing to attest
//!    integrity against.
//! 5. **Record requirements**: the installed manifest's dependencies
//!    become the entry's `requires` mapping (omitted when empty) and are
//!    queued for expansion into the entry's nested `dependencies`.
//!
//! # Iterative walk
//!
//! The tree is traversed with an explicit frame stack rather than call
//! recursion, so pathological `node_modules` depths cannot exhaust the
//! call stack. One frame tracks the level currently being filled; parked
//! parent levels wait in a `Vec<Suspended>`.
//!
//! Cycles are broken with a set of identities *active on the current
//! path*: each identity is a `(name, canonical directory)` pair, pushed
//! when a package's dependencies start expanding and popped when they
//! finish. Meeting an active identity again records the entry (version,
//! integrity, `requires`) but skips its subtree. Keying on the active path
//! rather than everything ever visited keeps diamond dependencies honest:
//! two parents that both depend on `c` each get their own independent
//! `c` node.

use crate::core::LockforgeError;
use crate::locate;
use crate::lockfile::{LockEntry, PackageLock};
use crate::manifest::PackageManifest;
use crate::utils::fs::safe_canonicalize;
use crate::yarn::YarnLock;
use anyhow::Result;
use indexmap::IndexMap;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Identity of one package occurrence on the resolution path.
type PackageId = (String, PathBuf);

/// A resolution level parked while one of its entries is being expanded.
struct Suspended {
    /// Dependencies of this level not yet resolved
    queue: VecDeque<(String, String)>,
    /// Canonical directory resolution starts from at this level
    dir: PathBuf,
    /// Entries resolved at this level so far
    entries: IndexMap<String, LockEntry>,
    /// Key in `entries` that receives the child level's mapping
    slot: String,
    /// Identity this level holds in the active-path set
    id: PackageId,
}

/// Build a complete [`PackageLock`] for `manifest`, resolving installed
/// packages from `root_dir` and versions from the yarn index.
///
/// `root_dir` is canonicalized up front; every installed directory the
/// walk touches is canonicalized as well, so all identity decisions see
/// symlink-free paths. The first failure anywhere aborts the whole build
/// with nothing persisted.
pub async fn build_lock_file(
    manifest: &PackageManifest,
    yarn: &YarnLock,
    root_dir: &Path,
) -> Result<PackageLock> {
    let root_dir = safe_canonicalize(root_dir)?;
    debug!(
        "building lock tree for {} v{} from {}",
        manifest.name,
        manifest.version,
        root_dir.display()
    );

    let dependencies = resolve_tree(manifest, yarn, &root_dir).await?;
    Ok(PackageLock::new(
        manifest.name.clone(),
        manifest.version.clone(),
        dependencies,
    ))
}

/// Expand the root manifest's dependencies into the nested entry tree.
async fn resolve_tree(
    root: &PackageManifest,
    yarn: &YarnLock,
    root_dir: &Path,
) -> Result<IndexMap<String, LockEntry>> {
    let mut active: HashSet<PackageId> = HashSet::new();
    let mut cur_id: PackageId = (root.name.clone(), root_dir.to_path_buf());
    active.insert(cur_id.clone());

    let mut cur_queue: VecDeque<(String, String)> =
        root.dependencies.clone().into_iter().collect();
    let mut cur_dir = root_dir.to_path_buf();
    let mut cur_entries: IndexMap<String, LockEntry> = IndexMap::new();
    let mut stack: Vec<Suspended> = Vec::new();

    loop {
        if let Some((name, range)) = cur_queue.pop_front() {
            let pkg_dir = locate::find_package_dir(&name, &cur_dir)?;
            let pkg_dir = safe_canonicalize(&pkg_dir)?;
            let manifest =
                PackageManifest::load(&pkg_dir.join(PackageManifest::FILE_NAME)).await?;

            if manifest.name != name {
                return Err(LockforgeError::PackageIdentityMismatch {
                    requested: name,
                    found: manifest.name,
                    path: pkg_dir.display().to_string(),
                }
                .into());
            }

            let mut entry = match yarn.get(&name, &range) {
                Some(locked) => {
                    debug!("{name}@{range} -> {} (lockfile index)", locked.version);
                    LockEntry {
                        version: locked.version.clone(),
                        integrity: locked.integrity.clone(),
                        resolved: locked.resolved.clone(),
                        requires: None,
                        dependencies: None,
                    }
                }
                None => {
                    // Never went through the registry: a workspace-linked
                    // package. Its manifest is the only version source and
                    // there is no tarball to attest.
                    debug!("{name}@{range} -> {} (workspace-linked)", manifest.version);
                    LockEntry::new(manifest.version.clone())
                }
            };
            if !manifest.dependencies.is_empty() {
                entry.requires = Some(manifest.dependencies.clone());
            }

            let id: PackageId = (name.clone(), pkg_dir.clone());
            if manifest.dependencies.is_empty() {
                cur_entries.insert(name, entry);
            } else if active.contains(&id) {
                warn!(
                    "dependency cycle: {name}@{range} at {} is already being expanded, \
                    recording it without its subtree",
                    pkg_dir.display()
                );
                cur_entries.insert(name, entry);
            } else {
                // Park this level and descend into the child's dependencies.
                active.insert(id.clone());
                cur_entries.insert(name.clone(), entry);
                stack.push(Suspended {
                    queue: std::mem::take(&mut cur_queue),
                    dir: std::mem::replace(&mut cur_dir, pkg_dir),
                    entries: std::mem::take(&mut cur_entries),
                    slot: name,
                    id: std::mem::replace(&mut cur_id, id),
                });
                cur_queue = manifest.dependencies.into_iter().collect();
            }
        } else {
            // Level complete: fold its entries into the parent entry, or
            // finish when the root level itself is done.
            active.remove(&cur_id);
            match stack.pop() {
                None => return Ok(cur_entries),
                Some(parent) => {
                    let Suspended {
                        queue,
                        dir,
                        mut entries,
                        slot,
                        id,
                    } = parent;
                    if !cur_entries.is_empty()
                        && let Some(slot_entry) = entries.get_mut(&slot)
                    {
                        slot_entry.dependencies = Some(cur_entries);
                    }
                    cur_queue = queue;
                    cur_dir = dir;
                    cur_entries = entries;
                    cur_id = id;
                }
            }
        }
    }
}
