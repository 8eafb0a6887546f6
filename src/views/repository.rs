//! Repository screen: header, language bar, recent commits, and the
//! explorer/preview pair.
//!
//! The view owns no fetch logic. The workbench feeds it API payloads and
//! forwards the explorer's `SelectFile`/`LoadDir` requests back to the
//! client.

use crossterm::event::{KeyCode, KeyEventKind, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::theme::UiTheme;
use crate::core::{EventResult, InputEvent, View};
use crate::models::file_tree::build_tree;
use crate::models::github::{format_date, Commit, ContentEntry, Repository};
use crate::views::{ExplorerView, PreviewView};

const COMMITS_SHOWN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Explorer,
    Preview,
}

pub struct RepositoryView {
    owner: String,
    name: String,
    repo: Option<Box<Repository>>,
    /// `(language, bytes, percent)` largest first.
    languages: Vec<(String, u64, u8)>,
    commits: Vec<Commit>,
    pub explorer: ExplorerView,
    pub preview: PreviewView,
    focus: Pane,
    error: Option<String>,
}

impl RepositoryView {
    pub fn new(owner: &str, name: &str) -> Self {
        let mut explorer = ExplorerView::new();
        explorer.set_focused(true);
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            repo: None,
            languages: Vec::new(),
            commits: Vec::new(),
            explorer,
            preview: PreviewView::new(),
            focus: Pane::Explorer,
            error: None,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_repository(&mut self, repo: Box<Repository>) {
        self.repo = Some(repo);
    }

    pub fn set_languages(&mut self, languages: std::collections::BTreeMap<String, u64>) {
        self.languages = language_shares(&languages);
    }

    pub fn set_commits(&mut self, commits: Vec<Commit>) {
        self.commits = commits;
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Feed one fetched directory level into the explorer.
    ///
    /// The root listing replaces the whole tree and is scanned for a
    /// `readme.md` file to auto-select (returned so the caller can fetch
    /// it); deeper levels are grafted into a new tree.
    pub fn ingest_contents(&mut self, path: &str, entries: &[ContentEntry]) -> Option<String> {
        if path.is_empty() {
            self.explorer.set_tree(build_tree(entries));
            entries
                .iter()
                .find(|e| e.is_file() && e.name.eq_ignore_ascii_case("readme.md"))
                .map(|e| e.path.clone())
        } else {
            self.explorer.graft(path, entries);
            None
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Explorer => Pane::Preview,
            Pane::Preview => Pane::Explorer,
        };
        self.explorer.set_focused(self.focus == Pane::Explorer);
        self.preview.set_focused(self.focus == Pane::Preview);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.inactive_border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from(vec![
            Span::styled(
                self.owner.clone(),
                Style::default().fg(theme.accent_fg),
            ),
            Span::styled(" / ", Style::default().fg(theme.muted_fg)),
            Span::styled(
                self.name.clone(),
                Style::default()
                    .fg(theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];

        match &self.repo {
            Some(repo) => {
                if let Some(description) = &repo.description {
                    lines.push(Line::from(Span::styled(
                        description.clone(),
                        Style::default().fg(theme.text_fg),
                    )));
                }
                if !repo.topics.is_empty() {
                    lines.push(Line::from(Span::styled(
                        repo.topics.join("  "),
                        Style::default().fg(theme.accent_fg),
                    )));
                }
                lines.push(Line::from(Span::styled(
                    format!(
                        "★ {} stars  ⑂ {} forks  {} watchers  {} open issues  ·  Updated {}",
                        repo.stargazers_count,
                        repo.forks_count,
                        repo.watchers_count,
                        repo.open_issues_count,
                        format_date(&repo.updated_at),
                    ),
                    Style::default().fg(theme.muted_fg),
                )));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "Loading repository...",
                    Style::default().fg(theme.muted_fg),
                )));
            }
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_languages(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        if self.languages.is_empty() || area.height == 0 {
            return;
        }

        let mut legend = vec![Span::styled(
            "Languages: ",
            Style::default().fg(theme.muted_fg),
        )];
        let mut bar: Vec<Span> = Vec::new();
        let cells = bar_cells(&self.languages, area.width as usize);

        for (i, (language, _bytes, percent)) in self.languages.iter().enumerate() {
            let color = theme.bar_colors[i % theme.bar_colors.len()];
            if i > 0 {
                legend.push(Span::styled("  ", Style::default()));
            }
            legend.push(Span::styled(
                format!("{language} {percent}%"),
                Style::default().fg(color),
            ));

            bar.push(Span::styled("█".repeat(cells[i]), Style::default().fg(color)));
        }

        let lines = vec![Line::from(legend), Line::from(bar)];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_commits(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.inactive_border))
            .title(" Recent Commits ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.commits.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Loading commits...",
                    Style::default().fg(theme.muted_fg),
                )),
                inner,
            );
            return;
        }

        let lines: Vec<Line> = self
            .commits
            .iter()
            .take(COMMITS_SHOWN)
            .map(|commit| {
                Line::from(vec![
                    Span::styled(
                        commit.short_sha().to_string(),
                        Style::default().fg(theme.accent_fg),
                    ),
                    Span::styled(
                        format!("  {}", commit.summary()),
                        Style::default().fg(theme.text_fg),
                    ),
                    Span::styled(
                        format!(
                            "  — {}, {}",
                            commit.author_label(),
                            format_date(&commit.commit.author.date),
                        ),
                        Style::default().fg(theme.muted_fg),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, message: &str, theme: &UiTheme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error_fg))
            .title(" Error Loading Repository ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let lines = vec![
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(theme.error_fg),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Esc: back to {}", self.owner),
                Style::default().fg(theme.muted_fg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl View for RepositoryView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return EventResult::Ignored;
                }
                if key.code == KeyCode::Tab {
                    self.toggle_focus();
                    return EventResult::Consumed;
                }
                match self.focus {
                    Pane::Explorer => self.explorer.handle_input(event),
                    Pane::Preview => self.preview.handle_input(event),
                }
            }
            InputEvent::Mouse(mouse) => {
                if let MouseEventKind::Down(_) = mouse.kind {
                    if self.explorer.contains(mouse.column, mouse.row) && self.focus != Pane::Explorer
                    {
                        self.toggle_focus();
                    } else if self.preview.contains(mouse.column, mouse.row)
                        && self.focus != Pane::Preview
                    {
                        self.toggle_focus();
                    }
                }
                if self.explorer.contains(mouse.column, mouse.row) {
                    self.explorer.handle_input(event)
                } else if self.preview.contains(mouse.column, mouse.row) {
                    self.preview.handle_input(event)
                } else {
                    EventResult::Ignored
                }
            }
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        if let Some(message) = self.error.clone() {
            self.render_error(frame, area, &message, theme);
            return;
        }

        let language_rows = if self.languages.is_empty() { 0 } else { 2 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(language_rows),
                Constraint::Min(5),
                Constraint::Length(COMMITS_SHOWN as u16 + 2),
            ])
            .split(area);

        self.render_header(frame, chunks[0], theme);
        self.render_languages(frame, chunks[1], theme);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[2]);
        self.explorer.render(frame, body[0], theme);
        self.preview.render(frame, body[1], theme);

        self.render_commits(frame, chunks[3], theme);
    }
}

/// Byte counts per language as whole percentages, largest share first.
fn language_shares(languages: &std::collections::BTreeMap<String, u64>) -> Vec<(String, u64, u8)> {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<(String, u64, u8)> = languages
        .iter()
        .map(|(language, &bytes)| {
            let percent = ((bytes as f64 / total as f64) * 100.0).round() as u8;
            (language.clone(), bytes, percent)
        })
        .collect();
    shares.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    shares
}

/// Bar segment widths for the language shares. Each boundary is placed from
/// the cumulative byte count, so the segments always sum to exactly `width`
/// regardless of how the per-language percentages round.
fn bar_cells(shares: &[(String, u64, u8)], width: usize) -> Vec<usize> {
    let total: u64 = shares.iter().map(|(_, bytes, _)| *bytes).sum();
    if total == 0 {
        return vec![0; shares.len()];
    }

    let mut cells = Vec::with_capacity(shares.len());
    let mut cum = 0u64;
    let mut filled = 0usize;
    for (_, bytes, _) in shares {
        cum += bytes;
        let upto = ((width as u64 * cum) / total) as usize;
        cells.push(upto - filled);
        filled = upto;
    }
    cells
}
