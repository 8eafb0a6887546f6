//! Content tree model.
//!
//! `build_tree` turns one directory level of content listing rows into a
//! rooted tree the explorer can render. The tree is immutable after
//! construction: a new listing (including a deeper level fetched on expand)
//! always produces a new tree via `build_tree`/`graft_children`, never an
//! in-place patch.

use std::cmp::Ordering;

use crate::models::github::ContentEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Display label: the last path segment.
    pub name: String,
    /// Full path from the repository root. Empty string is reserved for the
    /// synthetic root.
    pub path: String,
    pub kind: NodeKind,
    /// `Some` for directories (possibly empty until their level is fetched),
    /// `None` for files.
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Dir
    }

    fn root() -> Self {
        Self {
            name: "root".to_string(),
            path: String::new(),
            kind: NodeKind::Dir,
            children: Some(Vec::new()),
        }
    }
}

/// Name ordering used within one kind group.
///
/// Approximates locale comparison with a case-insensitive Unicode pass;
/// ties break on the raw string so distinct names never compare equal.
pub fn name_order(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

fn entry_kind(entry: &ContentEntry) -> NodeKind {
    // Anything the API does not call a plain file (dir, symlink, submodule)
    // is treated as a directory rather than failing the build.
    if entry.is_file() {
        NodeKind::File
    } else {
        NodeKind::Dir
    }
}

/// Build a tree from one directory level of listing rows.
///
/// Pure: the input is not mutated, and the same input always yields a
/// structurally equal tree. Directories sort before files; within a kind,
/// names follow `name_order`. No entry is dropped or duplicated.
pub fn build_tree(entries: &[ContentEntry]) -> TreeNode {
    let mut sorted: Vec<&ContentEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        let rank = |e: &ContentEntry| match entry_kind(e) {
            NodeKind::Dir => 0,
            NodeKind::File => 1,
        };
        rank(a)
            .cmp(&rank(b))
            .then_with(|| name_order(&a.name, &b.name))
    });

    let mut children = Vec::with_capacity(sorted.len());
    for entry in sorted {
        let kind = entry_kind(entry);
        children.push(TreeNode {
            name: entry.name.clone(),
            path: entry.path.clone(),
            kind,
            children: match kind {
                NodeKind::Dir => Some(Vec::new()),
                NodeKind::File => None,
            },
        });
    }

    let mut root = TreeNode::root();
    root.children = Some(children);
    root
}

/// Return a new tree equal to `node` except that the directory at `dir_path`
/// has its children replaced by a freshly built level from `entries`.
///
/// Used for fetch-on-expand: the explorer reports a never-loaded directory,
/// the caller fetches that level and grafts it here. If `dir_path` names no
/// directory in the tree the result is an unchanged copy.
pub fn graft_children(node: &TreeNode, dir_path: &str, entries: &[ContentEntry]) -> TreeNode {
    if node.is_dir() && node.path == dir_path {
        return TreeNode {
            name: node.name.clone(),
            path: node.path.clone(),
            kind: NodeKind::Dir,
            children: build_tree(entries).children,
        };
    }

    TreeNode {
        name: node.name.clone(),
        path: node.path.clone(),
        kind: node.kind,
        children: node
            .children
            .as_ref()
            .map(|kids| kids.iter().map(|c| graft_children(c, dir_path, entries)).collect()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
