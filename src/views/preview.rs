//! File preview pane: shows the content of the file selected in the explorer.
//!
//! Three states: nothing selected (placeholder), selection made but content
//! still in flight (loading), content present (scrollable text). Fetch
//! failures land here as a textual error state, never a crash.

use crossterm::event::{KeyCode, KeyEventKind, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::theme::UiTheme;
use crate::core::{EventResult, InputEvent, View};

#[derive(Debug, Clone, PartialEq, Eq)]
enum PreviewState {
    Empty,
    Loading,
    Loaded(String),
    Failed(String),
}

pub struct PreviewView {
    path: Option<String>,
    state: PreviewState,
    scroll: u16,
    area: Option<Rect>,
    focused: bool,
}

impl PreviewView {
    pub fn new() -> Self {
        Self {
            path: None,
            state: PreviewState::Empty,
            scroll: 0,
            area: None,
            focused: false,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// A file was selected; content is on its way.
    pub fn begin(&mut self, path: &str) {
        self.path = Some(path.to_string());
        self.state = PreviewState::Loading;
        self.scroll = 0;
    }

    /// Content arrived. Ignored unless it matches the current selection.
    pub fn set_content(&mut self, path: &str, text: String) {
        if self.path.as_deref() == Some(path) {
            self.state = PreviewState::Loaded(text);
            self.scroll = 0;
        }
    }

    pub fn set_failed(&mut self, message: String) {
        if self.path.is_some() {
            self.state = PreviewState::Failed(message);
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area
            .map(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
            .unwrap_or(false)
    }

    fn line_count(&self) -> u16 {
        match &self.state {
            PreviewState::Loaded(text) => text.lines().count().min(u16::MAX as usize) as u16,
            _ => 0,
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = self.line_count().saturating_sub(1);
        let next = (self.scroll as i32 + delta).clamp(0, max as i32);
        self.scroll = next as u16;
    }
}

impl Default for PreviewView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for PreviewView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return EventResult::Ignored;
                }
                match key.code {
                    KeyCode::Up => {
                        self.scroll_by(-1);
                        EventResult::Consumed
                    }
                    KeyCode::Down => {
                        self.scroll_by(1);
                        EventResult::Consumed
                    }
                    KeyCode::PageUp => {
                        self.scroll_by(-20);
                        EventResult::Consumed
                    }
                    KeyCode::PageDown => {
                        self.scroll_by(20);
                        EventResult::Consumed
                    }
                    KeyCode::Home => {
                        self.scroll = 0;
                        EventResult::Consumed
                    }
                    _ => EventResult::Ignored,
                }
            }
            InputEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.scroll_by(-3);
                    EventResult::Consumed
                }
                MouseEventKind::ScrollDown => {
                    self.scroll_by(3);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let border = if self.focused {
            theme.focus_border
        } else {
            theme.inactive_border
        };
        let title = match &self.path {
            Some(path) => format!(" {path} "),
            None => " Preview ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.area = Some(inner);

        let muted = Style::default().fg(theme.muted_fg);
        let widget = match &self.state {
            PreviewState::Empty => Paragraph::new(Span::styled(
                "Select a file from the explorer to view its content",
                muted,
            )),
            PreviewState::Loading => Paragraph::new(Span::styled("Loading file content...", muted)),
            PreviewState::Failed(message) => Paragraph::new(Span::styled(
                format!("Error loading file content: {message}"),
                Style::default().fg(theme.error_fg),
            )),
            PreviewState::Loaded(text) => Paragraph::new(text.clone())
                .style(Style::default().fg(theme.text_fg))
                .scroll((self.scroll, 0)),
        };
        frame.render_widget(widget, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_for_stale_path_is_ignored() {
        let mut view = PreviewView::new();
        view.begin("src/a.rs");
        view.begin("src/b.rs");
        view.set_content("src/a.rs", "stale".to_string());
        assert_eq!(view.state, PreviewState::Loading);

        view.set_content("src/b.rs", "fresh".to_string());
        assert_eq!(view.state, PreviewState::Loaded("fresh".to_string()));
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut view = PreviewView::new();
        view.begin("f");
        view.set_content("f", "a\nb\nc".to_string());

        view.scroll_by(100);
        assert_eq!(view.scroll, 2);
        view.scroll_by(-100);
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_failure_without_selection_stays_empty() {
        let mut view = PreviewView::new();
        view.set_failed("boom".to_string());
        assert_eq!(view.state, PreviewState::Empty);
    }
}
