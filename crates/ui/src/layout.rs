use ratatui::layout::{Constraint, Direction, Layout, Rect};
use sidetrack_core::PanelMotion;

/// Calculated layout for the TUI
///
/// The motion controller works in fractional cells; the layout quantizes
/// its chat offset to whole columns. The navigation panel occupies the
/// columns the chat surface has vacated, so the panel edge and the chat
/// edge always meet. While the panel is partially open its content stays
/// pinned to what will be its final left edge: `panel_skip` is how many of
/// its leading columns are still off-screen and must be skipped when
/// rendering.
#[derive(Debug, Clone)]
pub struct PanelLayout {
    /// Header area (1 line)
    pub header: Rect,
    /// Navigation panel, `None` while fully closed
    pub panel: Option<Rect>,
    /// Chat transcript area
    pub chat: Rect,
    /// Footer hints area (1 line)
    pub footer: Rect,
    /// Leading panel columns currently off-screen
    pub panel_skip: u16,
}

impl PanelLayout {
    pub fn calculate(area: Rect, motion: &PanelMotion) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let header = chunks[0];
        let main = chunks[1];
        let footer = chunks[2];

        let travel = (f64::from(area.width) / 2.0).floor();
        let panel_cols = motion.chat_offset().round().clamp(0.0, travel) as u16;

        let (panel, chat, panel_skip) = if panel_cols == 0 {
            (None, main, 0)
        } else {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(panel_cols), Constraint::Min(0)])
                .split(main);
            let skip = travel as u16 - panel_cols;
            (Some(split[0]), split[1], skip)
        };

        Self { header, panel, chat, footer, panel_skip }
    }

    /// Full panel width once the snap completes, in columns.
    pub fn panel_travel(area: Rect) -> u16 {
        area.width / 2
    }

    /// Which surface a pointer event at `column` lands on.
    pub fn surface_at(&self, column: u16) -> Surface {
        match self.panel {
            Some(panel) if column < panel.x + panel.width => Surface::Panel,
            _ => Surface::Chat,
        }
    }
}

/// Hit-test result for pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Panel,
    Chat,
}
