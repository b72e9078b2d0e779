use ratatui::style::{Color, Modifier, Style};

/// Iceberg color theme for the sidetrack TUI
///
/// Based on iceberg.vim (https://github.com/cocopon/iceberg.vim), a bluish
/// dark theme with eye-friendly contrast for long reading sessions.
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Primary background: deep blue-black (fills terminal)
    pub const BG: Color = Color::Rgb(22, 24, 33);

    /// Foreground: light blue-gray (primary text)
    pub const FG: Color = Color::Rgb(198, 200, 209);

    /// Panel background: lighter blue-black (navigation panel)
    pub const PANEL_BG: Color = Color::Rgb(30, 33, 50);

    /// Hover/active states: visual selection
    pub const ACTIVE: Color = Color::Rgb(39, 44, 66);

    /// Primary accent: blue
    pub const BLUE: Color = Color::Rgb(132, 160, 198);

    /// Secondary accent: cyan
    pub const CYAN: Color = Color::Rgb(137, 184, 194);

    /// Tertiary accent: purple
    pub const PURPLE: Color = Color::Rgb(160, 147, 199);

    /// Muted text: dimmed foreground
    pub const MUTED: Color = Color::Rgb(107, 112, 137);

    /// Border color
    pub const BORDER: Color = Color::Rgb(60, 65, 90);

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    /// Primary accent style
    pub fn primary() -> Style {
        Style::default().fg(Self::BLUE).bg(Self::BG)
    }

    /// Secondary accent style
    pub fn secondary() -> Style {
        Style::default().fg(Self::CYAN).bg(Self::BG)
    }

    /// Muted style (for secondary text)
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BG)
    }

    /// Panel style
    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL_BG)
    }

    /// Active (selected) style
    pub fn active() -> Style {
        Style::default().fg(Self::FG).bg(Self::ACTIVE)
    }

    /// Border style
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Chat surface text style for a given opacity in [0.8, 1.0].
    ///
    /// Terminals have no alpha channel, so the fade that accompanies the
    /// panel opening maps to a dim step instead: fully opaque text is the
    /// base style, anything below 0.9 renders dimmed.
    pub fn chat_text(opacity: f64) -> Style {
        if opacity < 0.9 { Self::base().add_modifier(Modifier::DIM) } else { Self::base() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_text_dim_step() {
        assert_eq!(Theme::chat_text(1.0), Theme::base());
        assert_eq!(Theme::chat_text(0.95), Theme::base());
        assert_eq!(Theme::chat_text(0.8), Theme::base().add_modifier(Modifier::DIM));
    }
}
