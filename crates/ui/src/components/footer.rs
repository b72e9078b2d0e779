use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::AppState;
use crate::theme::Theme;

/// Fit `title` into `max` display columns, keeping the tail.
///
/// The section title is right-aligned, so when it overflows the leading
/// characters are the expendable ones.
fn tail_fit(title: &str, max: u16) -> String {
    let max = usize::from(max);
    if UnicodeWidthStr::width(title) <= max {
        return title.to_string();
    }

    let avail = max.saturating_sub(1);
    let mut width = 0;
    let mut tail: Vec<char> = Vec::new();
    for ch in title.chars().rev() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > avail {
            break;
        }
        width += w;
        tail.push(ch);
    }

    let mut out = String::from("\u{2026}");
    out.extend(tail.into_iter().rev());
    out
}

/// One-line footer: key hints on the left, the active section title on the
/// right.
pub struct Footer<'a> {
    state: &'a AppState,
}

impl<'a> Footer<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(area);

        let hints = Line::from(Span::styled(
            " q quit \u{b7} tab panel \u{b7} j/k scroll \u{b7} enter jump",
            Theme::muted(),
        ));
        frame.render_widget(Paragraph::new(hints).style(Theme::base()), chunks[0]);

        let active = self
            .state
            .active_id
            .as_deref()
            .and_then(|id| self.state.nav.position(id))
            .and_then(|index| self.state.nav.get(index))
            .map(|row| tail_fit(&row.title, chunks[1].width))
            .unwrap_or_default();
        let section = Line::from(Span::styled(active, Theme::primary())).right_aligned();
        frame.render_widget(Paragraph::new(section).style(Theme::base()), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_footer_shows_active_section_title() {
        let mut state = AppState::for_test();
        state.active_id = Some("message-0".to_string());

        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| Footer::new(&state).render(frame, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..80).map(|col| buffer[(col, 0)].symbol().to_string()).collect();
        assert!(row.contains("q quit"));
        assert!(row.contains("Q: First question"));
    }

    #[test]
    fn test_footer_without_active_section() {
        let state = AppState::for_test();

        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| Footer::new(&state).render(frame, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..80).map(|col| buffer[(col, 0)].symbol().to_string()).collect();
        assert!(row.contains("enter jump"));
    }

    #[test]
    fn test_tail_fit_keeps_title_end() {
        assert_eq!(tail_fit("Q: short", 30), "Q: short");
        let long = "Q: a rather long question about lifetime elision rules";
        let fitted = tail_fit(long, 20);
        assert!(fitted.starts_with('\u{2026}'));
        assert!(fitted.ends_with("elision rules"));
        assert!(UnicodeWidthStr::width(fitted.as_str()) <= 20);
    }
}
