//! Workbench: screen routing and input dispatch.
//!
//! Owns the three screens (home, profile, repository), the API client, and
//! the theme. Views bubble navigation and fetch requests up as
//! `EventResult`s; fetch completions come back through `on_fetch`.
//!
//! Every navigation bumps a generation counter and outcomes are stamped with
//! the generation that requested them, so a fetch that resolves after the
//! user navigated away is dropped instead of mutating the wrong screen.

use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::theme::UiTheme;
use crate::core::{EventResult, InputEvent, View};
use crate::services::github::{FetchOutcome, FetchPayload, GithubClient};
use crate::views::{HomeView, ProfileView, RepositoryView};

const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const COMMITS_PER_PAGE: u32 = 30;

enum Screen {
    Home(HomeView),
    Profile(ProfileView),
    Repository(RepositoryView),
}

pub struct Workbench {
    client: GithubClient,
    theme: UiTheme,
    screen: Screen,
    /// Profile screen stashed while a repository is open, so Esc restores it
    /// without refetching.
    saved_profile: Option<ProfileView>,
    status: Option<String>,
    generation: u64,
}

impl Workbench {
    pub fn new(client: GithubClient) -> Self {
        Self {
            client,
            theme: UiTheme::default(),
            screen: Screen::Home(HomeView::new()),
            saved_profile: None,
            status: None,
            generation: 0,
        }
    }

    pub fn theme(&self) -> &UiTheme {
        &self.theme
    }

    /// Jump straight to a profile or repository, e.g. from a CLI argument.
    pub fn open_query(&mut self, query: &str) {
        match HomeView::parse_query(query) {
            Some(EventResult::OpenProfile(login)) => self.navigate_profile(&login),
            Some(EventResult::OpenRepository { owner, name }) => {
                self.navigate_repository(&owner, &name)
            }
            _ => {}
        }
    }

    fn navigate_profile(&mut self, login: &str) {
        self.generation += 1;
        self.status = None;
        self.saved_profile = None;
        self.screen = Screen::Profile(ProfileView::new(login));
        self.client.fetch_user(self.generation, login);
        self.client.fetch_user_repositories(self.generation, login);
        tracing::info!(login, "open profile");
    }

    fn navigate_repository(&mut self, owner: &str, name: &str) {
        self.generation += 1;
        self.status = None;
        if let Screen::Profile(profile) = std::mem::replace(&mut self.screen, Screen::Home(HomeView::new()))
        {
            self.saved_profile = Some(profile);
        }
        self.screen = Screen::Repository(RepositoryView::new(owner, name));
        self.client.fetch_repository(self.generation, owner, name);
        self.client.fetch_contents(self.generation, owner, name, "");
        self.client
            .fetch_commits(self.generation, owner, name, COMMITS_PER_PAGE);
        self.client.fetch_languages(self.generation, owner, name);
        tracing::info!(owner, name, "open repository");
    }

    fn navigate_back(&mut self) -> EventResult {
        match &self.screen {
            Screen::Home(_) => EventResult::Quit,
            Screen::Profile(_) => {
                self.generation += 1;
                self.status = None;
                self.screen = Screen::Home(HomeView::new());
                EventResult::Consumed
            }
            Screen::Repository(view) => {
                let owner = view.owner().to_string();
                match self.saved_profile.take() {
                    Some(profile) if profile.login() == owner && profile.is_loaded() => {
                        self.generation += 1;
                        self.status = None;
                        self.screen = Screen::Profile(profile);
                    }
                    _ => self.navigate_profile(&owner),
                }
                EventResult::Consumed
            }
        }
    }

    fn handle_global_key(&mut self, event: &crossterm::event::KeyEvent) -> Option<EventResult> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(EventResult::Quit),
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                self.theme = self.theme.toggled();
                Some(EventResult::Consumed)
            }
            (KeyCode::Esc, _) => Some(self.navigate_back()),
            _ => None,
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        if let InputEvent::Key(key_event) = event {
            if let Some(result) = self.handle_global_key(key_event) {
                return result;
            }
        }

        let result = match &mut self.screen {
            Screen::Home(view) => view.handle_input(event),
            Screen::Profile(view) => view.handle_input(event),
            Screen::Repository(view) => view.handle_input(event),
        };

        match result {
            EventResult::OpenProfile(login) => {
                self.navigate_profile(&login);
                EventResult::Consumed
            }
            EventResult::OpenRepository { owner, name } => {
                self.navigate_repository(&owner, &name);
                EventResult::Consumed
            }
            EventResult::SelectFile(path) => {
                if let Screen::Repository(view) = &mut self.screen {
                    let owner = view.owner().to_string();
                    let name = view.name().to_string();
                    view.preview.begin(&path);
                    self.client
                        .fetch_file_content(self.generation, &owner, &name, &path);
                }
                EventResult::Consumed
            }
            EventResult::LoadDir(path) => {
                if let Screen::Repository(view) = &self.screen {
                    self.client
                        .fetch_contents(self.generation, view.owner(), view.name(), &path);
                }
                EventResult::Consumed
            }
            other => other,
        }
    }

    /// Apply one completed fetch. Outcomes from a previous generation are
    /// discarded: the screen that asked for them is gone.
    pub fn on_fetch(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            tracing::debug!(label = outcome.label, "dropping stale fetch outcome");
            return;
        }

        let payload = match outcome.result {
            Ok(payload) => payload,
            Err(err) => {
                let message = err.to_string();
                self.status = Some(message.clone());
                match &mut self.screen {
                    Screen::Profile(view) if outcome.label == "user profile" => {
                        view.set_error(message);
                    }
                    Screen::Repository(view) => match outcome.label {
                        "repository" | "contents" => view.set_error(message),
                        "file content" => view.preview.set_failed(message),
                        _ => {}
                    },
                    _ => {}
                }
                return;
            }
        };

        match (payload, &mut self.screen) {
            (FetchPayload::User(profile), Screen::Profile(view)) => view.set_profile(profile),
            (FetchPayload::Repositories(repos), Screen::Profile(view)) => {
                view.set_repositories(repos)
            }
            (FetchPayload::Repository(repo), Screen::Repository(view)) => view.set_repository(repo),
            (FetchPayload::Contents { path, entries }, Screen::Repository(view)) => {
                if let Some(readme) = view.ingest_contents(&path, &entries) {
                    let owner = view.owner().to_string();
                    let name = view.name().to_string();
                    view.preview.begin(&readme);
                    self.client
                        .fetch_file_content(self.generation, &owner, &name, &readme);
                }
            }
            (FetchPayload::FileContent { path, text }, Screen::Repository(view)) => {
                view.preview.set_content(&path, text);
            }
            (FetchPayload::Commits(commits), Screen::Repository(view)) => view.set_commits(commits),
            (FetchPayload::Languages(languages), Screen::Repository(view)) => {
                view.set_languages(languages)
            }
            _ => tracing::debug!("fetch outcome does not match current screen"),
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let crumb = match &self.screen {
            Screen::Home(_) => String::new(),
            Screen::Profile(view) => format!("  /  {}", view.login()),
            Screen::Repository(view) => format!("  /  {} / {}", view.owner(), view.name()),
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "hubdash",
                Style::default()
                    .fg(self.theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(crumb, Style::default().fg(self.theme.muted_fg)),
        ]))
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(message) => Span::styled(
                message.clone(),
                Style::default().fg(self.theme.error_fg),
            ),
            None => {
                let hint = match &self.screen {
                    Screen::Home(_) => "Type a login or owner/repo, then Enter",
                    Screen::Profile(_) => "↑/↓: select  Enter: open repo  Esc: home  Ctrl+Q: quit",
                    Screen::Repository(_) => {
                        "Tab: switch pane  ↑/↓: move  Enter: open  Esc: back  Ctrl+Q: quit"
                    }
                };
                Span::styled(hint, Style::default().fg(self.theme.muted_fg))
            }
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT + 1),
                Constraint::Min(0),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        let theme = self.theme.clone();
        match &mut self.screen {
            Screen::Home(view) => view.render(frame, chunks[1], &theme),
            Screen::Profile(view) => view.render(frame, chunks[1], &theme),
            Screen::Repository(view) => view.render(frame, chunks[1], &theme),
        }

        self.render_status(frame, chunks[2]);

        if let Some((x, y)) = self.cursor_position() {
            frame.set_cursor_position((x, y));
        }
    }

    pub fn cursor_position(&self) -> Option<(u16, u16)> {
        match &self.screen {
            Screen::Home(view) => view.cursor_position(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/workbench.rs"]
mod tests;
