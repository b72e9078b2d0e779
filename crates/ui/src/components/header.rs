use ratatui::{
    Frame,
    layout::Rect,
    style::Stylize,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::AppState;
use crate::theme::Theme;

/// One-line header: app name plus conversation size.
pub struct Header<'a> {
    state: &'a AppState,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" sidetrack ", Theme::primary().bold()),
            Span::styled(
                format!("{} messages", self.state.messages.len()),
                Theme::muted(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).style(Theme::base()), area);
    }
}
