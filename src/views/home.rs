//! Home screen: a single query box.
//!
//! A plain login navigates to the profile screen; `owner/repo` goes straight
//! to the repository screen.

use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::theme::UiTheme;
use crate::core::{EventResult, InputEvent, View};

pub struct HomeView {
    input: String,
    input_area: Option<Rect>,
}

impl HomeView {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            input_area: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Resolve the typed query into a navigation request.
    pub fn parse_query(query: &str) -> Option<EventResult> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        match query.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
                Some(EventResult::OpenRepository {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            Some(_) => None,
            None => Some(EventResult::OpenProfile(query.to_string())),
        }
    }
}

impl Default for HomeView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for HomeView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        let Some(key) = event.as_key() else {
            return EventResult::Ignored;
        };
        if key.kind != KeyEventKind::Press {
            return EventResult::Ignored;
        }

        match key.code {
            KeyCode::Char(ch) => {
                self.input.push(ch);
                EventResult::Consumed
            }
            KeyCode::Backspace => {
                self.input.pop();
                EventResult::Consumed
            }
            KeyCode::Enter => match Self::parse_query(&self.input) {
                Some(result) => result,
                None => EventResult::Consumed,
            },
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let card_width = area.width.clamp(20, 60);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        let centered = |r: Rect| Rect {
            x: r.x + (r.width.saturating_sub(card_width)) / 2,
            width: card_width.min(r.width),
            ..r
        };

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "GitHub Dashboard",
                Style::default()
                    .fg(theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Look up a user or an owner/repo",
                Style::default().fg(theme.muted_fg),
            )),
        ]);
        frame.render_widget(title, centered(chunks[1]));

        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.focus_border));
        let input_area = centered(chunks[2]);
        let inner = input_block.inner(input_area);
        frame.render_widget(input_block, input_area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                self.input.clone(),
                Style::default().fg(theme.text_fg),
            )),
            inner,
        );
        self.input_area = Some(inner);

        let hint = Paragraph::new(Span::styled(
            "Enter: search   Ctrl+T: theme   Ctrl+Q: quit",
            Style::default().fg(theme.muted_fg),
        ));
        frame.render_widget(hint, centered(chunks[3]));
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        let area = self.input_area?;
        let offset = self.input.width().min(area.width.saturating_sub(1) as usize) as u16;
        Some((area.x + offset, area.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut view = HomeView::new();
        for ch in "octo".chars() {
            view.handle_input(&press(KeyCode::Char(ch)));
        }
        view.handle_input(&press(KeyCode::Backspace));
        assert_eq!(view.input(), "oct");
    }

    #[test]
    fn test_enter_on_login_opens_profile() {
        let mut view = HomeView::new();
        for ch in "octocat".chars() {
            view.handle_input(&press(KeyCode::Char(ch)));
        }
        assert_eq!(
            view.handle_input(&press(KeyCode::Enter)),
            EventResult::OpenProfile("octocat".to_string())
        );
    }

    #[test]
    fn test_parse_query_variants() {
        assert_eq!(
            HomeView::parse_query("rust-lang/rust"),
            Some(EventResult::OpenRepository {
                owner: "rust-lang".to_string(),
                name: "rust".to_string(),
            })
        );
        assert_eq!(
            HomeView::parse_query("  octocat  "),
            Some(EventResult::OpenProfile("octocat".to_string()))
        );
        assert_eq!(HomeView::parse_query(""), None);
        assert_eq!(HomeView::parse_query("owner/"), None);
    }
}
