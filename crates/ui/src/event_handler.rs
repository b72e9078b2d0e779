use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

/// Actions the keyboard can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Exit,
    TogglePanel,
    ScrollUp(usize),
    ScrollDown(usize),
    ScrollTop,
    ScrollBottom,
    SelectPrevious,
    SelectNext,
    ActivateSelected,
}

impl KeyAction {
    /// Map a key press to an action. Release/repeat events and unbound
    /// keys map to nothing.
    pub fn from_key(event: KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Exit),
            KeyCode::Tab => Some(Self::TogglePanel),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::ScrollUp(1)),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::ScrollDown(1)),
            KeyCode::PageUp => Some(Self::ScrollUp(10)),
            KeyCode::PageDown => Some(Self::ScrollDown(10)),
            KeyCode::Char('g') | KeyCode::Home => Some(Self::ScrollTop),
            KeyCode::Char('G') | KeyCode::End => Some(Self::ScrollBottom),
            KeyCode::Char('p') => Some(Self::SelectPrevious),
            KeyCode::Char('n') => Some(Self::SelectNext),
            KeyCode::Enter => Some(Self::ActivateSelected),
            _ => None,
        }
    }
}

/// Event source for the TUI application
pub struct EventHandler;

impl EventHandler {
    /// Read a single event from the terminal.
    ///
    /// Returns `Some(event)` if one arrives within `timeout`, `None` on
    /// timeout or error. Terminal errors are logged but not propagated,
    /// since they are typically fatal and the application exits on the
    /// next iteration.
    pub fn read(timeout: Duration) -> Option<Event> {
        match crossterm::event::poll(timeout) {
            Ok(true) => match crossterm::event::read() {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::error!("terminal read error: {}", e);
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                tracing::error!("event poll error: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(KeyAction::from_key(press(KeyCode::Char('q'))), Some(KeyAction::Exit));
        assert_eq!(KeyAction::from_key(press(KeyCode::Esc)), Some(KeyAction::Exit));
        assert_eq!(KeyAction::from_key(press(KeyCode::Tab)), Some(KeyAction::TogglePanel));
        assert_eq!(KeyAction::from_key(press(KeyCode::Char('j'))), Some(KeyAction::ScrollDown(1)));
        assert_eq!(KeyAction::from_key(press(KeyCode::Char('k'))), Some(KeyAction::ScrollUp(1)));
        assert_eq!(KeyAction::from_key(press(KeyCode::PageDown)), Some(KeyAction::ScrollDown(10)));
        assert_eq!(KeyAction::from_key(press(KeyCode::Char('g'))), Some(KeyAction::ScrollTop));
        assert_eq!(KeyAction::from_key(press(KeyCode::Char('G'))), Some(KeyAction::ScrollBottom));
        assert_eq!(KeyAction::from_key(press(KeyCode::Enter)), Some(KeyAction::ActivateSelected));
        assert_eq!(KeyAction::from_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut event = press(KeyCode::Char('q'));
        event.kind = KeyEventKind::Release;
        assert_eq!(KeyAction::from_key(event), None);
    }
}
