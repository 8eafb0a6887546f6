//! Repository file explorer.
//!
//! Renders the content tree, owns per-directory expand/collapse state, and
//! reports file activations upward as `EventResult::SelectFile`. The view
//! never fetches anything itself: expanding a directory whose level has not
//! been fetched yields `EventResult::LoadDir` and the workbench grafts the
//! listing back in.
//!
//! Expand state is keyed by node path in an explicit set (the recursion is
//! flattened into a stack traversal), so each node's state is independent
//! and survives the tree being replaced by a graft.

use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use rustc_hash::FxHashSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::theme::UiTheme;
use crate::core::{EventResult, InputEvent, View};
use crate::models::file_tree::{graft_children, TreeNode};
use crate::models::github::ContentEntry;

/// Guard against pathological nesting; nothing deeper is flattened.
const MAX_DEPTH: u16 = 64;

#[derive(Debug, Clone)]
pub struct ExplorerRow {
    pub path: String,
    pub name: String,
    pub depth: u16,
    pub is_dir: bool,
    pub is_expanded: bool,
}

pub struct ExplorerView {
    tree: Option<TreeNode>,
    /// Expanded directory paths. The synthetic root ("") starts expanded;
    /// every deeper directory starts collapsed.
    expanded: FxHashSet<String>,
    /// Directory paths whose one level of contents has been fetched.
    loaded: FxHashSet<String>,
    selected: usize,
    scroll: usize,
    area: Option<Rect>,
    focused: bool,
}

impl ExplorerView {
    pub fn new() -> Self {
        Self {
            tree: None,
            expanded: FxHashSet::default(),
            loaded: FxHashSet::default(),
            selected: 0,
            scroll: 0,
            area: None,
            focused: false,
        }
    }

    /// Install a freshly built tree, discarding all per-node state.
    pub fn set_tree(&mut self, tree: TreeNode) {
        self.tree = Some(tree);
        self.expanded = FxHashSet::default();
        self.expanded.insert(String::new());
        self.loaded = FxHashSet::default();
        self.loaded.insert(String::new());
        self.selected = 0;
        self.scroll = 0;
    }

    /// Replace the tree with one where `dir_path` has its fetched level
    /// grafted in. Expand state is path-keyed and carries over.
    pub fn graft(&mut self, dir_path: &str, entries: &[ContentEntry]) {
        if let Some(tree) = &self.tree {
            self.tree = Some(graft_children(tree, dir_path, entries));
            self.loaded.insert(dir_path.to_string());
        }
    }

    pub fn has_tree(&self) -> bool {
        self.tree.is_some()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    pub fn selected_row(&self) -> Option<ExplorerRow> {
        self.visible_rows().into_iter().nth(self.selected)
    }

    /// Flatten the tree into the rows that are actually rendered. Collapsed
    /// subtrees are absent from the result, not merely hidden.
    pub fn visible_rows(&self) -> Vec<ExplorerRow> {
        let mut rows = Vec::new();
        let Some(tree) = &self.tree else {
            return rows;
        };

        let mut stack: Vec<(&TreeNode, u16)> = Vec::new();
        if self.expanded.contains(tree.path.as_str()) {
            if let Some(children) = &tree.children {
                for child in children.iter().rev() {
                    stack.push((child, 0));
                }
            }
        }

        while let Some((node, depth)) = stack.pop() {
            rows.push(ExplorerRow {
                path: node.path.clone(),
                name: node.name.clone(),
                depth,
                is_dir: node.is_dir(),
                is_expanded: node.is_dir() && self.expanded.contains(node.path.as_str()),
            });

            if node.is_dir() && depth < MAX_DEPTH && self.expanded.contains(node.path.as_str()) {
                if let Some(children) = &node.children {
                    for child in children.iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }

        rows
    }

    /// Activate the row at `index`: toggle a directory, or report a file
    /// selection. File activation changes no expand state.
    pub fn activate(&mut self, index: usize) -> EventResult {
        let rows = self.visible_rows();
        let Some(row) = rows.get(index) else {
            return EventResult::Ignored;
        };

        if !row.is_dir {
            return EventResult::SelectFile(row.path.clone());
        }

        if self.expanded.contains(row.path.as_str()) {
            self.expanded.remove(row.path.as_str());
            EventResult::Consumed
        } else {
            self.expanded.insert(row.path.clone());
            if self.loaded.contains(row.path.as_str()) {
                EventResult::Consumed
            } else {
                EventResult::LoadDir(row.path.clone())
            }
        }
    }

    fn activate_selected(&mut self) -> EventResult {
        self.activate(self.selected)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected.min(len - 1) as isize;
        self.selected = current.saturating_add(delta).clamp(0, len as isize - 1) as usize;
    }

    /// Collapse the selected directory, matching common explorer bindings.
    fn collapse_selected(&mut self) -> EventResult {
        let rows = self.visible_rows();
        let Some(row) = rows.get(self.selected) else {
            return EventResult::Ignored;
        };
        if row.is_dir && self.expanded.contains(row.path.as_str()) {
            self.expanded.remove(row.path.as_str());
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    fn expand_selected(&mut self) -> EventResult {
        let rows = self.visible_rows();
        let Some(row) = rows.get(self.selected) else {
            return EventResult::Ignored;
        };
        if row.is_dir && !self.expanded.contains(row.path.as_str()) {
            return self.activate(self.selected);
        }
        EventResult::Ignored
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area
            .map(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
            .unwrap_or(false)
    }

    pub fn hit_test_row(&self, event: &MouseEvent) -> Option<usize> {
        let area = self.area?;
        if event.column < area.x || event.column >= area.x + area.width {
            return None;
        }
        if event.row < area.y || event.row >= area.y + area.height {
            return None;
        }
        Some((event.row - area.y) as usize + self.scroll)
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> EventResult {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(index) = self.hit_test_row(event) else {
                    return EventResult::Ignored;
                };
                if index >= self.visible_rows().len() {
                    return EventResult::Ignored;
                }
                self.selected = index;
                self.activate(index)
            }
            MouseEventKind::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                EventResult::Consumed
            }
            MouseEventKind::ScrollDown => {
                let len = self.visible_rows().len();
                self.scroll = (self.scroll + 1).min(len.saturating_sub(1));
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn render_row(&self, row: &ExplorerRow, is_selected: bool, width: usize, theme: &UiTheme) -> Line<'static> {
        let indent = "  ".repeat(row.depth as usize);
        let marker = if row.is_dir {
            if row.is_expanded {
                "▼ 📁 "
            } else {
                "▶ 📁 "
            }
        } else {
            "  📄 "
        };

        let used = indent.width() + marker.width();
        let name = ellipsize(&row.name, width.saturating_sub(used));
        let text = format!("{indent}{marker}{name}");

        let style = if is_selected {
            Style::default()
                .bg(theme.selected_bg)
                .fg(theme.selected_fg)
        } else if row.is_dir {
            Style::default().fg(theme.dir_fg)
        } else {
            Style::default().fg(theme.text_fg)
        };

        Line::from(Span::styled(text, style))
    }

    fn ensure_selected_visible(&mut self, height: usize, row_count: usize) {
        if row_count == 0 || height == 0 {
            self.scroll = 0;
            return;
        }
        self.selected = self.selected.min(row_count - 1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }
        self.scroll = self.scroll.min(row_count.saturating_sub(1));
    }
}

impl Default for ExplorerView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for ExplorerView {
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
                    KeyCode::Enter => self.activate_selected(),
                    KeyCode::Left => self.collapse_selected(),
                    KeyCode::Right => self.expand_selected(),
                    _ => EventResult::Ignored,
                }
            }
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &UiTheme) {
        let border = if self.focused {
            theme.focus_border
        } else {
            theme.inactive_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Repository Files ");
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.area = Some(inner);

        let rows = self.visible_rows();
        if rows.is_empty() {
            let placeholder = if self.tree.is_some() {
                "(empty)"
            } else {
                "Loading file tree..."
            };
            frame.render_widget(
                Paragraph::new(Span::styled(placeholder, Style::default().fg(theme.muted_fg))),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        self.ensure_selected_visible(height, rows.len());
        let end = (self.scroll + height).min(rows.len());

        let lines: Vec<Line> = rows[self.scroll..end]
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let is_selected = self.focused && self.scroll + i == self.selected;
                self.render_row(row, is_selected, inner.width as usize, theme)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Truncate to `max_width` terminal cells, appending an ellipsis when cut.
fn ellipsize(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
#[path = "../../tests/unit/views/explorer.rs"]
mod tests;
