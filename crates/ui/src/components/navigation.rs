//! Table-of-contents panel: the header tree rendered flat, with the active
//! section highlighted and a keyboard cursor for jumping.

use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::Rect,
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use sidetrack_core::NavHeader;

use crate::state::AppState;
use crate::theme::Theme;

/// One visible row of the flattened header tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRow {
    pub id: String,
    pub title: String,
    pub anchor: String,
    pub level: u8,
}

/// Flattened lookup table over the header tree.
///
/// Built once per header-set change, not per interaction: rows hold the
/// depth-first visit order and `by_id` resolves an id to its row in O(1).
#[derive(Debug, Clone, Default)]
pub struct NavIndex {
    rows: Vec<NavRow>,
    by_id: HashMap<String, usize>,
}

impl NavIndex {
    pub fn build(headers: &[NavHeader]) -> Self {
        let mut index = Self::default();
        index.push_all(headers);
        index
    }

    fn push_all(&mut self, headers: &[NavHeader]) {
        for header in headers {
            self.by_id.insert(header.id.clone(), self.rows.len());
            self.rows.push(NavRow {
                id: header.id.clone(),
                title: header.title.clone(),
                anchor: header.anchor.clone(),
                level: header.level,
            });
            self.push_all(&header.children);
        }
    }

    pub fn rows(&self) -> &[NavRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NavRow> {
        self.rows.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }
}

/// Vertical scroll that keeps `selected` on screen.
pub(crate) fn row_scroll(selected: usize, height: u16) -> usize {
    let height = usize::from(height.max(1));
    selected.saturating_sub(height - 1)
}

/// Navigation panel component
pub struct NavigationPanel<'a> {
    state: &'a AppState,
}

impl<'a> NavigationPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Render into `area`, skipping `skip_cols` leading columns of content.
    ///
    /// The skip keeps the panel text pinned to its final left edge while
    /// the panel itself is still sliding in from the left.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, skip_cols: u16) {
        frame.render_widget(Block::default().style(Theme::panel()), area);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let nav = &self.state.nav;
        let mut lines: Vec<Line<'static>> = Vec::with_capacity(nav.len().max(1));

        if nav.is_empty() {
            lines.push(Line::from(Span::styled("No sections", Theme::muted().bg(Theme::PANEL_BG))));
        }

        for (row_index, row) in nav.rows().iter().enumerate() {
            let is_active = self.state.active_id.as_deref() == Some(row.id.as_str());
            let is_selected = row_index == self.state.selected;

            let marker = if is_active { "\u{203a} " } else { "  " };
            let indent = "  ".repeat(usize::from(row.level.saturating_sub(1)));

            let mut style = if row.level == 1 {
                Theme::panel().bold()
            } else {
                Theme::muted().bg(Theme::PANEL_BG)
            };
            if is_active {
                style = style.fg(Theme::BLUE);
            }
            if is_selected {
                style = style.bg(Theme::ACTIVE);
            }

            lines.push(Line::from(Span::styled(format!("{}{}{}", marker, indent, row.title), style)));
        }

        let scroll_rows = row_scroll(self.state.selected, area.height) as u16;
        let paragraph =
            Paragraph::new(lines).style(Theme::panel()).scroll((scroll_rows, skip_cols));
        frame.render_widget(paragraph, area);
    }

    /// Map a click row inside the panel back to a nav row index.
    pub fn row_at(&self, area: Rect, click_row: u16) -> Option<usize> {
        if click_row < area.y || click_row >= area.y + area.height {
            return None;
        }
        let index = usize::from(click_row - area.y) + row_scroll(self.state.selected, area.height);
        (index < self.state.nav.len()).then_some(index)
    }
}
