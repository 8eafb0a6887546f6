use super::*;
use crate::models::github::ContentEntry;

fn entry(kind: &str, name: &str, path: &str) -> ContentEntry {
    ContentEntry {
        kind: kind.to_string(),
        name: name.to_string(),
        path: path.to_string(),
        sha: format!("sha-{name}"),
        size: 0,
        download_url: None,
    }
}

#[test]
fn test_empty_listing_yields_bare_root() {
    let root = build_tree(&[]);
    assert_eq!(root.path, "");
    assert_eq!(root.name, "root");
    assert_eq!(root.kind, NodeKind::Dir);
    assert_eq!(root.children.as_deref(), Some(&[][..]));
}

#[test]
fn test_directories_sort_before_files() {
    let entries = vec![
        entry("file", "b.txt", "b.txt"),
        entry("dir", "A", "A"),
        entry("file", "a.txt", "a.txt"),
    ];

    let root = build_tree(&entries);
    let names: Vec<&str> = root
        .children
        .as_ref()
        .unwrap()
        .iter()
        .map(|n| n.name.as_str())
        .collect();

    assert_eq!(names, vec!["A", "a.txt", "b.txt"]);
    assert_eq!(root.children.as_ref().unwrap()[0].kind, NodeKind::Dir);
}

#[test]
fn test_no_entry_dropped_or_duplicated() {
    let entries = vec![
        entry("file", "main.rs", "src/main.rs"),
        entry("dir", "tests", "tests"),
        entry("file", "Cargo.toml", "Cargo.toml"),
        entry("dir", "src", "src"),
    ];

    let root = build_tree(&entries);
    let children = root.children.as_ref().unwrap();
    assert_eq!(children.len(), entries.len());

    let mut paths: Vec<&str> = children.iter().map(|n| n.path.as_str()).collect();
    paths.sort_unstable();
    paths.dedup();
    assert_eq!(paths.len(), entries.len());
}

#[test]
fn test_build_is_structurally_idempotent() {
    let entries = vec![
        entry("dir", "docs", "docs"),
        entry("file", "README.md", "README.md"),
    ];

    assert_eq!(build_tree(&entries), build_tree(&entries));
}

#[test]
fn test_files_have_no_children_dirs_have_empty() {
    let entries = vec![
        entry("dir", "src", "src"),
        entry("file", "README.md", "README.md"),
    ];

    let root = build_tree(&entries);
    let children = root.children.as_ref().unwrap();
    assert_eq!(children[0].children.as_deref(), Some(&[][..]));
    assert!(children[1].children.is_none());
}

#[test]
fn test_unknown_type_treated_as_directory() {
    let entries = vec![entry("symlink", "link", "link")];

    let root = build_tree(&entries);
    let node = &root.children.as_ref().unwrap()[0];
    assert_eq!(node.kind, NodeKind::Dir);
    assert!(node.children.is_some());
}

#[test]
fn test_name_order_is_case_insensitive_with_raw_tiebreak() {
    use std::cmp::Ordering;

    assert_eq!(name_order("alpha", "Beta"), Ordering::Less);
    // Accented letters fold but keep code-point order, so they land after ASCII.
    assert_eq!(name_order("Élan", "zeta"), Ordering::Greater);
    assert_eq!(name_order("Makefile", "makefile"), Ordering::Less);
    assert_eq!(name_order("same", "same"), Ordering::Equal);
}

#[test]
fn test_graft_fills_one_directory_without_touching_the_rest() {
    let top = vec![
        entry("dir", "src", "src"),
        entry("file", "README.md", "README.md"),
    ];
    let level = vec![
        entry("file", "lib.rs", "src/lib.rs"),
        entry("dir", "views", "src/views"),
    ];

    let root = build_tree(&top);
    let grafted = graft_children(&root, "src", &level);

    // Original tree untouched.
    assert_eq!(root.children.as_ref().unwrap()[0].children.as_deref(), Some(&[][..]));

    let src = &grafted.children.as_ref().unwrap()[0];
    let names: Vec<&str> = src
        .children
        .as_ref()
        .unwrap()
        .iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, vec!["views", "lib.rs"]);

    // Sibling file is unchanged.
    assert_eq!(grafted.children.as_ref().unwrap()[1].name, "README.md");
}

#[test]
fn test_graft_with_unknown_path_is_identity() {
    let top = vec![entry("dir", "src", "src")];
    let root = build_tree(&top);
    let grafted = graft_children(&root, "no/such/dir", &[entry("file", "x", "x")]);
    assert_eq!(root, grafted);
}
