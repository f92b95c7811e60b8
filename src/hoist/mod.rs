//! Nested-tree hoisting.
//!
//! The builder produces a fully nested tree: every package's resolved
//! dependencies hang off that package's own entry. npm's flat layout
//! conventionally lifts packages toward the top level instead, and this
//! pass rewrites the built tree into that shape, in place, without ever
//! changing what any package would resolve to.
//!
//! # Policy
//!
//! The tree is scanned for nested entries (depth two and deeper) and each
//! one is compared against the top-level mapping by name:
//!
//! - name absent at top level: the entry is **promoted** - detached with
//!   its whole subtree and appended to the top level
//! - name present at top level with the same version: the nested copy is
//!   a duplicate of the promoted one and is **pruned**
//! - name present with a different version: the nested copy stays where
//!   it is, shadowed under its parent exactly as npm would install it
//!
//! One action is applied per scan and the scan repeats until it finds
//! nothing. Every action either deletes a node or strictly reduces its
//! depth, so the loop terminates; once a scan finds nothing the pass is
//! stable, and running it again is a no-op. Scans walk entries in
//! insertion order and removals use `shift_remove`, so the result is
//! deterministic.
//!
//! Only `dependencies` mappings are rewritten. `requires` records what a
//! package's manifest declares and is untouched by relocation. A parent
//! whose nested mapping empties loses the field entirely, keeping the
//! present-iff-non-empty serialization rule intact.

use crate::lockfile::LockEntry;
use indexmap::IndexMap;
use tracing::debug;

/// One rewrite found by a scan, addressed by its name path from the
/// top level down to the nested entry.
enum Action {
    Promote(Vec<String>),
    Prune(Vec<String>),
}

/// Hoist a built dependency tree in place until stable.
///
/// Invoked once, after construction completes and before serialization;
/// never interleaved with resolution.
pub fn hoist_dependencies(root: &mut IndexMap<String, LockEntry>) {
    while let Some(action) = next_action(root) {
        apply_action(root, action);
    }
}

/// Find the first applicable rewrite, scanning each entry's direct
/// children before descending, siblings in insertion order.
fn next_action(root: &IndexMap<String, LockEntry>) -> Option<Action> {
    let mut stack: Vec<(Vec<String>, &LockEntry)> = root
        .iter()
        .rev()
        .map(|(name, entry)| (vec![name.clone()], entry))
        .collect();

    while let Some((path, entry)) = stack.pop() {
        let Some(children) = &entry.dependencies else {
            continue;
        };

        for (name, child) in children {
            match root.get(name) {
                None => {
                    let mut target = path.clone();
                    target.push(name.clone());
                    return Some(Action::Promote(target));
                }
                Some(existing) if existing.version == child.version => {
                    let mut target = path.clone();
                    target.push(name.clone());
                    return Some(Action::Prune(target));
                }
                // Different version at the top level: stays shadowed.
                Some(_) => {}
            }
        }

        for (name, child) in children.iter().rev() {
            let mut next = path.clone();
            next.push(name.clone());
            stack.push((next, child));
        }
    }

    None
}

fn apply_action(root: &mut IndexMap<String, LockEntry>, action: Action) {
    match action {
        Action::Promote(path) => {
            if let Some(entry) = detach(root, &path)
                && let Some(name) = path.last()
            {
                debug!("hoisting {} to the top level", path.join(" -> "));
                root.insert(name.clone(), entry);
            }
        }
        Action::Prune(path) => {
            debug!("pruning {} (same version at the top level)", path.join(" -> "));
            let _ = detach(root, &path);
        }
    }
}

/// Remove and return the entry at `path`, clearing the parent's
/// `dependencies` field if the removal empties it.
fn detach(root: &mut IndexMap<String, LockEntry>, path: &[String]) -> Option<LockEntry> {
    let (child, parents) = path.split_last()?;
    let (first, rest) = parents.split_first()?;

    let mut entry = root.get_mut(first)?;
    for seg in rest {
        entry = entry.dependencies.as_mut()?.get_mut(seg)?;
    }

    let deps = entry.dependencies.as_mut()?;
    let removed = deps.shift_remove(child);
    if deps.is_empty() {
        entry.dependencies = None;
    }
    removed
}
