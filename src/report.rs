//! Flat text rendering of a lock tree.
//!
//! A diagnostic view, not a persisted artifact: every node in the tree
//! becomes one line naming the path from the top level down to it plus
//! the resolved version, so a deeply nested tree can be scanned or
//! grepped without following JSON indentation.
//!
//! ```text
//! a @ 1.0.0
//! a -> b @ 2.0.0
//! a -> b -> c @ 3.0.0
//! z @ 9.0.0
//! ```

use crate::lockfile::LockEntry;
use indexmap::IndexMap;
use std::fmt::Write;

/// Render a lock tree as one `path @ version` line per node, pre-order,
/// siblings in insertion order. The root produces no line of its own.
#[must_use]
pub fn render_tree(dependencies: &IndexMap<String, LockEntry>) -> String {
    let mut out = String::new();
    let mut stack: Vec<(Vec<&str>, &LockEntry)> = dependencies
        .iter()
        .rev()
        .map(|(name, entry)| (vec![name.as_str()], entry))
        .collect();

    while let Some((path, entry)) = stack.pop() {
        let _ = writeln!(out, "{} @ {}", path.join(" -> "), entry.version);

        if let Some(children) = &entry.dependencies {
            // Reversed push so siblings pop in declaration order.
            for (name, child) in children.iter().rev() {
                let mut next = path.clone();
                next.push(name.as_str());
                stack.push((next, child));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(version: &str) -> LockEntry {
        LockEntry::new(version)
    }

    fn with_children(version: &str, children: &[(&str, LockEntry)]) -> LockEntry {
        let mut e = LockEntry::new(version);
        e.dependencies = Some(
            children
                .iter()
                .map(|(name, child)| (name.to_string(), child.clone()))
                .collect(),
        );
        e
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        assert_eq!(render_tree(&IndexMap::new()), "");
    }

    #[test]
    fn test_single_leaf() {
        let mut root = IndexMap::new();
        root.insert("left-pad".to_string(), entry("1.3.0"));
        assert_eq!(render_tree(&root), "left-pad @ 1.3.0\n");
    }

    #[test]
    fn test_nested_chain_shows_full_path() {
        let mut root = IndexMap::new();
        root.insert(
            "a".to_string(),
            with_children(
                "1.0.0",
                &[("b", with_children("2.0.0", &[("c", entry("3.0.0"))]))],
            ),
        );

        assert_eq!(
            render_tree(&root),
            "a @ 1.0.0\na -> b @ 2.0.0\na -> b -> c @ 3.0.0\n"
        );
    }

    #[test]
    fn test_preorder_with_siblings() {
        let mut root = IndexMap::new();
        root.insert(
            "a".to_string(),
            with_children("1.0.0", &[("x", entry("1.1.0")), ("y", entry("1.2.0"))]),
        );
        root.insert("z".to_string(), entry("9.0.0"));

        // a's whole subtree before z, x before y.
        assert_eq!(
            render_tree(&root),
            "a @ 1.0.0\na -> x @ 1.1.0\na -> y @ 1.2.0\nz @ 9.0.0\n"
        );
    }
}
