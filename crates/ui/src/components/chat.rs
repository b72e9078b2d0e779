//! Chat transcript surface.

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Paragraph},
};

use crate::state::AppState;
use crate::theme::Theme;
use crate::transcript::TranscriptView;

/// Renders the wrapped transcript at the current scroll offset, dimmed in
/// step with the motion controller's derived opacity.
pub struct ChatSurface<'a> {
    state: &'a AppState,
    view: &'a TranscriptView,
}

impl<'a> ChatSurface<'a> {
    pub fn new(state: &'a AppState, view: &'a TranscriptView) -> Self {
        Self { state, view }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let style = Theme::chat_text(self.state.motion.chat_opacity());
        frame.render_widget(Block::default().style(style), area);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let scroll = self.state.scroll.min(self.view.max_scroll(area.height)) as u16;
        let paragraph =
            Paragraph::new(self.view.lines().to_vec()).style(style).scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn row_text(terminal: &Terminal<TestBackend>, row: u16, width: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..width).map(|col| buffer[(col, row)].symbol().to_string()).collect()
    }

    #[test]
    fn test_renders_role_labels_and_content() {
        let state = AppState::for_test();
        let view = TranscriptView::build(&state.messages, 40);

        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| ChatSurface::new(&state, &view).render(frame, frame.area()))
            .unwrap();

        assert!(row_text(&terminal, 0, 40).contains("You"));
        assert!(row_text(&terminal, 1, 40).contains("First question"));
    }

    #[test]
    fn test_scroll_offset_shifts_content() {
        let mut state = AppState::for_test();
        let view = TranscriptView::build(&state.messages, 40);
        state.scroll = view.anchor_line("message-2").unwrap();

        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| ChatSurface::new(&state, &view).render(frame, frame.area()))
            .unwrap();

        assert!(row_text(&terminal, 1, 40).contains("Second question"));
    }
}
