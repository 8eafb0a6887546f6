//! Small shared render helpers.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::theme::UiTheme;

/// One bordered stat card: a muted title above a bold value.
pub fn render_stat_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    theme: &UiTheme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.inactive_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(theme.muted_fg),
        )),
        Line::from(Span::styled(
            value.to_string(),
            Style::default()
                .fg(theme.text_fg)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Split an area into `n` equal columns with the card layout the stat row uses.
pub fn stat_columns(area: Rect, n: usize) -> Vec<Rect> {
    let constraints: Vec<Constraint> =
        (0..n).map(|_| Constraint::Ratio(1, n as u32)).collect();
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_columns_cover_area() {
        let area = Rect::new(0, 0, 80, 4);
        let cols = stat_columns(area, 4);
        assert_eq!(cols.len(), 4);
        let total: u16 = cols.iter().map(|r| r.width).sum();
        assert_eq!(total, 80);
    }
}
