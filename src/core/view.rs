//! View trait: every renderable, interactive panel implements this.

use super::event::InputEvent;
use crate::app::theme::UiTheme;
use ratatui::layout::Rect;
use ratatui::Frame;

pub trait View {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult;

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme);

    fn cursor_position(&self) -> Option<(u16, u16)> {
        None
    }
}

/// What a view asks its caller to do after consuming an input event.
///
/// Views never fetch or navigate themselves; requests bubble one level up
/// to the workbench, which owns the API client and the screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
    Quit,
    /// A file node was activated; the payload is its repository-root-relative path.
    SelectFile(String),
    /// A directory was expanded whose contents have never been fetched.
    LoadDir(String),
    /// Navigate to a user profile screen.
    OpenProfile(String),
    /// Navigate to a repository screen.
    OpenRepository { owner: String, name: String },
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, EventResult::Ignored)
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, EventResult::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_result() {
        assert!(EventResult::Consumed.is_consumed());
        assert!(EventResult::Ignored.is_ignored());
        assert!(EventResult::Quit.is_quit());
        assert!(!EventResult::SelectFile("src/main.rs".into()).is_consumed());
    }
}
