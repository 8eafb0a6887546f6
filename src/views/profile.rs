//! Profile screen: user card, stat cards, top languages, repository list.

use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::theme::UiTheme;
use crate::core::{EventResult, InputEvent, View};
use crate::models::github::{format_date, Repository, UserProfile};
use crate::views::widgets::{render_stat_card, stat_columns};

pub struct ProfileView {
    login: String,
    profile: Option<UserProfile>,
    repos: Vec<Repository>,
    /// `(language, repo count)` sorted by count, capped at five.
    top_languages: Vec<(String, usize)>,
    selected: usize,
    scroll: usize,
    list_area: Option<Rect>,
    error: Option<String>,
}

impl ProfileView {
    pub fn new(login: &str) -> Self {
        Self {
            login: login.to_string(),
            profile: None,
            repos: Vec::new(),
            top_languages: Vec::new(),
            selected: 0,
            scroll: 0,
            list_area: None,
            error: None,
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    pub fn set_repositories(&mut self, repos: Vec<Repository>) {
        self.top_languages = top_languages(&repos, 5);
        self.repos = repos;
        self.selected = 0;
        self.scroll = 0;
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn is_loaded(&self) -> bool {
        self.profile.is_some()
    }

    fn selected_repo(&self) -> Option<&Repository> {
        self.repos.get(self.selected)
    }

    fn open_selected(&self) -> EventResult {
        match self.selected_repo() {
            Some(repo) => EventResult::OpenRepository {
                owner: repo.owner.login.clone(),
                name: repo.name.clone(),
            },
            None => EventResult::Ignored,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.repos.is_empty() {
            self.selected = 0;
            return;
        }
        let current = self.selected.min(self.repos.len() - 1) as isize;
        self.selected =
            current.saturating_add(delta).clamp(0, self.repos.len() as isize - 1) as usize;
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> EventResult {
        let Some(area) = self.list_area else {
            return EventResult::Ignored;
        };
        let inside = event.column >= area.x
            && event.column < area.x + area.width
            && event.row >= area.y
            && event.row < area.y + area.height;

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                let index = (event.row - area.y) as usize + self.scroll;
                if index < self.repos.len() {
                    self.selected = index;
                    return self.open_selected();
                }
                EventResult::Ignored
            }
            MouseEventKind::ScrollUp if inside => {
                self.move_selection(-1);
                EventResult::Consumed
            }
            MouseEventKind::ScrollDown if inside => {
                self.move_selection(1);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn render_user_card(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.inactive_border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        match &self.profile {
            Some(profile) => {
                let display_name = profile.name.clone().unwrap_or_else(|| profile.login.clone());
                lines.push(Line::from(vec![
                    Span::styled(
                        display_name,
                        Style::default()
                            .fg(theme.header_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  @{}", profile.login),
                        Style::default().fg(theme.muted_fg),
                    ),
                ]));
                if let Some(bio) = &profile.bio {
                    lines.push(Line::from(Span::styled(
                        bio.clone(),
                        Style::default().fg(theme.text_fg),
                    )));
                }

                let mut facts: Vec<String> = Vec::new();
                if let Some(company) = &profile.company {
                    facts.push(company.clone());
                }
                if let Some(location) = &profile.location {
                    facts.push(location.clone());
                }
                if let Some(blog) = &profile.blog {
                    if !blog.is_empty() {
                        facts.push(blog.clone());
                    }
                }
                facts.push(format!("Joined {}", format_date(&profile.created_at)));
                lines.push(Line::from(Span::styled(
                    facts.join("  ·  "),
                    Style::default().fg(theme.muted_fg),
                )));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    format!("Loading profile for {}...", self.login),
                    Style::default().fg(theme.muted_fg),
                )));
            }
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_languages(&self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        if self.top_languages.is_empty() {
            return;
        }
        let mut spans = vec![Span::styled(
            "Top languages: ",
            Style::default().fg(theme.muted_fg),
        )];
        for (i, (language, count)) in self.top_languages.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ·  ", Style::default().fg(theme.muted_fg)));
            }
            let color = theme.bar_colors[i % theme.bar_colors.len()];
            spans.push(Span::styled(
                format!("{language} ({count})"),
                Style::default().fg(color),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_repo_list(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.focus_border))
            .title(" Repositories (Enter to open) ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.list_area = Some(inner);

        if self.repos.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Loading repositories...",
                    Style::default().fg(theme.muted_fg),
                )),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        if height == 0 {
            return;
        }
        self.selected = self.selected.min(self.repos.len() - 1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }

        let end = (self.scroll + height).min(self.repos.len());
        let lines: Vec<Line> = self.repos[self.scroll..end]
            .iter()
            .enumerate()
            .map(|(i, repo)| {
                let is_selected = self.scroll + i == self.selected;
                let mut meta = format!(
                    "  ★ {}  ⑂ {}  Updated {}",
                    repo.stargazers_count,
                    repo.forks_count,
                    format_date(&repo.updated_at),
                );
                if let Some(language) = &repo.language {
                    meta.push_str(&format!("  [{language}]"));
                }
                if repo.fork {
                    meta.push_str("  (fork)");
                }

                let (name_style, meta_style) = if is_selected {
                    let base = Style::default()
                        .bg(theme.selected_bg)
                        .fg(theme.selected_fg);
                    (base.add_modifier(Modifier::BOLD), base)
                } else {
                    (
                        Style::default().fg(theme.accent_fg),
                        Style::default().fg(theme.muted_fg),
                    )
                };

                Line::from(vec![
                    Span::styled(repo.name.clone(), name_style),
                    Span::styled(meta, meta_style),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, message: &str, theme: &UiTheme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error_fg))
            .title(" Error Loading Profile ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let lines = vec![
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(theme.error_fg),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Esc: back to home",
                Style::default().fg(theme.muted_fg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl View for ProfileView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return EventResult::Ignored;
                }
                match key.code {
                    KeyCode::Up => {
                        self.move_selection(-1);
                        EventResult::Consumed
                    }
                    KeyCode::Down => {
                        self.move_selection(1);
                        EventResult::Consumed
                    }
                    KeyCode::Enter => self.open_selected(),
                    _ => EventResult::Ignored,
                }
            }
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        if let Some(message) = self.error.clone() {
            self.render_error(frame, area, &message, theme);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(3),
            ])
            .split(area);

        self.render_user_card(frame, chunks[0], theme);

        if let Some(profile) = self.profile.clone() {
            let cols = stat_columns(chunks[1], 4);
            render_stat_card(
                frame,
                cols[0],
                "Repositories",
                &profile.public_repos.to_string(),
                theme,
            );
            render_stat_card(frame, cols[1], "Followers", &profile.followers.to_string(), theme);
            render_stat_card(frame, cols[2], "Following", &profile.following.to_string(), theme);
            render_stat_card(frame, cols[3], "Gists", &profile.public_gists.to_string(), theme);
        }

        self.render_languages(frame, chunks[2], theme);
        self.render_repo_list(frame, chunks[3], theme);
    }
}

/// Count repositories per primary language, most used first.
fn top_languages(repos: &[Repository], cap: usize) -> Vec<(String, usize)> {
    use std::collections::BTreeMap;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for repo in repos {
        if let Some(language) = &repo.language {
            *counts.entry(language.as_str()).or_default() += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(language, count)| (language.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(cap);
    ranked
}
