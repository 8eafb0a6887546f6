use super::*;
use crate::app::theme::ThemeMode;
use crate::services::github::GithubError;
use std::sync::mpsc;

fn test_workbench() -> (
    Workbench,
    tokio::runtime::Runtime,
    mpsc::Receiver<FetchOutcome>,
) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let (tx, rx) = mpsc::channel();
    let client = GithubClient::new(runtime.handle().clone(), tx).unwrap();
    (Workbench::new(client), runtime, rx)
}

fn entry(kind: &str, name: &str, path: &str) -> crate::models::github::ContentEntry {
    crate::models::github::ContentEntry {
        kind: kind.to_string(),
        name: name.to_string(),
        path: path.to_string(),
        sha: String::new(),
        size: 0,
        download_url: None,
    }
}

#[test]
fn test_open_query_routes_by_shape() {
    let (mut wb, _rt, _rx) = test_workbench();

    wb.open_query("octocat");
    assert!(matches!(wb.screen, Screen::Profile(_)));

    wb.open_query("rust-lang/rust");
    assert!(matches!(wb.screen, Screen::Repository(_)));
}

#[test]
fn test_stale_outcome_is_dropped() {
    let (mut wb, _rt, _rx) = test_workbench();
    wb.open_query("octocat/hello");
    let current = wb.generation;

    wb.on_fetch(FetchOutcome {
        generation: current - 1,
        label: "repository",
        result: Err(GithubError::Status {
            code: 500,
            url: "https://api.github.com/repos/octocat/hello".to_string(),
        }),
    });
    assert!(wb.status.is_none());

    wb.on_fetch(FetchOutcome {
        generation: current,
        label: "commits",
        result: Err(GithubError::Status {
            code: 500,
            url: "https://api.github.com/repos/octocat/hello/commits".to_string(),
        }),
    });
    assert!(wb.status.is_some());
}

#[test]
fn test_root_contents_auto_selects_readme() {
    let (mut wb, _rt, _rx) = test_workbench();
    wb.open_query("octocat/hello");

    wb.on_fetch(FetchOutcome {
        generation: wb.generation,
        label: "contents",
        result: Ok(FetchPayload::Contents {
            path: String::new(),
            entries: vec![
                entry("dir", "src", "src"),
                entry("file", "README.md", "README.md"),
            ],
        }),
    });

    let Screen::Repository(view) = &wb.screen else {
        panic!("expected repository screen");
    };
    assert!(view.explorer.has_tree());
    assert_eq!(view.preview.path(), Some("README.md"));
}

#[test]
fn test_escape_walks_back_to_home_then_quits() {
    let (mut wb, _rt, _rx) = test_workbench();
    wb.open_query("octocat");

    assert_eq!(wb.navigate_back(), EventResult::Consumed);
    assert!(matches!(wb.screen, Screen::Home(_)));
    assert_eq!(wb.navigate_back(), EventResult::Quit);
}

#[test]
fn test_theme_toggle_binding() {
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    let (mut wb, _rt, _rx) = test_workbench();
    assert_eq!(wb.theme().mode, ThemeMode::Dark);

    let event = InputEvent::Key(KeyEvent {
        code: KeyCode::Char('t'),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    });
    assert!(wb.handle_input(&event).is_consumed());
    assert_eq!(wb.theme().mode, ThemeMode::Light);
}

#[test]
fn test_navigation_bumps_generation() {
    let (mut wb, _rt, _rx) = test_workbench();
    let start = wb.generation;
    wb.open_query("octocat");
    wb.open_query("octocat/hello");
    assert_eq!(wb.generation, start + 2);
}
