use super::*;
use crate::models::file_tree::build_tree;
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

/// Root listing: dirs `src`, `tests`; file `README.md`.
fn explorer_with_root_listing() -> ExplorerView {
    let mut view = ExplorerView::new();
    view.set_tree(build_tree(&[
        entry("file", "README.md", "README.md"),
        entry("dir", "src", "src"),
        entry("dir", "tests", "tests"),
    ]));
    view
}

#[test]
fn test_first_level_visible_without_interaction() {
    let view = explorer_with_root_listing();
    let rows = view.visible_rows();

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["src", "tests", "README.md"]);
    assert!(rows.iter().all(|r| r.depth == 0));
}

#[test]
fn test_child_directories_start_collapsed() {
    let view = explorer_with_root_listing();
    assert!(view.is_expanded(""));
    assert!(!view.is_expanded("src"));
    assert!(!view.is_expanded("tests"));
}

#[test]
fn test_expanding_unloaded_directory_requests_its_level() {
    let mut view = explorer_with_root_listing();

    // Row 0 is `src`, never fetched.
    assert_eq!(view.activate(0), EventResult::LoadDir("src".to_string()));
    assert!(view.is_expanded("src"));

    // Toggling back and forth again does not re-request: still unloaded,
    // so re-expanding asks again.
    assert_eq!(view.activate(0), EventResult::Consumed);
    assert!(!view.is_expanded("src"));
    assert_eq!(view.activate(0), EventResult::LoadDir("src".to_string()));
}

#[test]
fn test_graft_then_expand_shows_children_at_deeper_indent() {
    let mut view = explorer_with_root_listing();
    view.activate(0); // expand src
    view.graft(
        "src",
        &[
            entry("file", "main.rs", "src/main.rs"),
            entry("dir", "views", "src/views"),
        ],
    );

    let rows = view.visible_rows();
    let names: Vec<(&str, u16)> = rows.iter().map(|r| (r.name.as_str(), r.depth)).collect();
    assert_eq!(
        names,
        vec![
            ("src", 0),
            ("views", 1),
            ("main.rs", 1),
            ("tests", 0),
            ("README.md", 0),
        ]
    );

    // A loaded directory toggles without another load request.
    assert_eq!(view.activate(0), EventResult::Consumed);
    assert_eq!(view.activate(0), EventResult::Consumed);
}

#[test]
fn test_collapse_removes_descendants_from_rendered_rows() {
    let mut view = explorer_with_root_listing();
    view.activate(0);
    view.graft(
        "src",
        &[
            entry("file", "main.rs", "src/main.rs"),
            entry("file", "lib.rs", "src/lib.rs"),
        ],
    );

    let expanded_count = view.visible_rows().len();
    assert_eq!(expanded_count, 5);

    view.activate(0); // collapse src
    let collapsed = view.visible_rows();
    assert_eq!(collapsed.len(), expanded_count - 2);
    assert!(collapsed.iter().all(|r| !r.path.starts_with("src/")));
}

#[test]
fn test_file_activation_reports_exact_path_and_keeps_state() {
    let mut view = explorer_with_root_listing();
    view.activate(0); // expand src
    view.graft("src", &[entry("file", "main.rs", "src/main.rs")]);

    let before = view.visible_rows();
    // Row 1 is src/main.rs.
    assert_eq!(
        view.activate(1),
        EventResult::SelectFile("src/main.rs".to_string())
    );

    // No expand/collapse state changed.
    let after = view.visible_rows();
    assert_eq!(before.len(), after.len());
    assert!(view.is_expanded("src"));
    assert!(!view.is_expanded("tests"));
}

#[test]
fn test_activation_out_of_range_is_ignored() {
    let mut view = explorer_with_root_listing();
    assert_eq!(view.activate(99), EventResult::Ignored);
}

#[test]
fn test_empty_tree_renders_nothing() {
    let mut view = ExplorerView::new();
    assert!(view.visible_rows().is_empty());

    view.set_tree(build_tree(&[]));
    assert!(view.visible_rows().is_empty());
}

#[test]
fn test_directory_with_absent_children_is_childless() {
    // A dir node whose children were never attached degrades to childless.
    let mut view = ExplorerView::new();
    let mut tree = build_tree(&[entry("dir", "src", "src")]);
    if let Some(children) = tree.children.as_mut() {
        children[0].children = None;
    }
    view.set_tree(tree);

    assert_eq!(view.activate(0), EventResult::LoadDir("src".to_string()));
    assert_eq!(view.visible_rows().len(), 1);
}

#[test]
fn test_set_tree_resets_expand_state() {
    let mut view = explorer_with_root_listing();
    view.activate(0);
    assert!(view.is_expanded("src"));

    view.set_tree(build_tree(&[entry("dir", "src", "src")]));
    assert!(!view.is_expanded("src"));
    assert!(view.is_expanded(""));
}

#[test]
fn test_keyboard_selection_and_enter() {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    let press = |code| {
        InputEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    };

    let mut view = explorer_with_root_listing();
    assert!(view.handle_input(&press(KeyCode::Down)).is_consumed());
    assert!(view.handle_input(&press(KeyCode::Down)).is_consumed());

    // Selection sits on README.md now.
    assert_eq!(
        view.handle_input(&press(KeyCode::Enter)),
        EventResult::SelectFile("README.md".to_string())
    );
}

#[test]
fn test_ellipsize_respects_cell_width() {
    assert_eq!(ellipsize("short", 10), "short");
    assert_eq!(ellipsize("long_file_name.rs", 8), "long_fi…");
    assert_eq!(ellipsize("x", 0), "");
}
