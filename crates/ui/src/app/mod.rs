pub mod event_loop;

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{Frame, Terminal, backend::Backend, layout::Rect};
use sidetrack_core::{ChatMessage, Config, DragSurface};
use tracing::debug;

use crate::components::{ChatSurface, Footer, Header, NavigationPanel};
use crate::event_handler::KeyAction;
use crate::feedback::{FeedbackHook, NoopFeedback};
use crate::layout::{PanelLayout, Surface};
use crate::state::AppState;
use crate::transcript::TranscriptView;

/// Lines scrolled per mouse wheel notch.
const WHEEL_SCROLL_LINES: isize = 3;

#[derive(Debug)]
struct Gesture {
    surface: DragSurface,
    last_column: u16,
    last_at: Instant,
    moved: bool,
}

/// Top-level TUI application.
///
/// Owns the state, the render-ready transcript, the feedback hook, and the
/// in-flight pointer gesture. The transcript is re-wrapped only at rest or
/// on resize, never mid-animation.
pub struct App {
    pub state: AppState,
    view: TranscriptView,
    feedback: Box<dyn FeedbackHook>,
    gesture: Option<Gesture>,
    area: Rect,
}

impl App {
    pub fn new(messages: Vec<ChatMessage>, config: &Config) -> Self {
        let area = Rect::new(0, 0, 80, 24);
        let state = AppState::new(messages, config.motion, f64::from(area.width));
        let view = TranscriptView::build(&state.messages, area.width);

        let mut app = Self { state, view, feedback: Box::new(NoopFeedback), gesture: None, area };
        app.rebuild_view();
        app
    }

    pub fn with_feedback(mut self, feedback: Box<dyn FeedbackHook>) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn should_exit(&self) -> bool {
        self.state.should_exit
    }

    pub fn is_animating(&self) -> bool {
        self.state.motion.is_snapping()
    }

    fn layout(&self) -> PanelLayout {
        PanelLayout::calculate(self.area, &self.state.motion)
    }

    fn chat_height(&self) -> u16 {
        self.layout().chat.height
    }

    /// Re-wrap the transcript to the current chat column width.
    fn rebuild_view(&mut self) {
        let width = self.layout().chat.width;
        if width != self.view.width() {
            self.view = TranscriptView::build(&self.state.messages, width);
            let height = self.chat_height();
            self.state.scroll = self.state.scroll.min(self.view.max_scroll(height));
            self.sync_active_section();
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
        self.state.motion.set_viewport_width(f64::from(width));
        self.rebuild_view();
    }

    fn sync_active_section(&mut self) {
        let height = self.chat_height();
        if let Some(report) = self.state.sync_active_section(&self.view, height)
            && let Some(id) = report
        {
            self.feedback.section_changed(&id);
        }
    }

    /// Advance the snap animation by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if self.state.motion.tick(dt) {
            return;
        }
        // Snap just settled; the chat column width changed with the phase.
        self.rebuild_view();
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let Some(action) = KeyAction::from_key(key) else {
            return;
        };
        let height = self.chat_height();

        match action {
            KeyAction::Exit => self.state.should_exit = true,
            KeyAction::TogglePanel => self.state.motion.toggle(),
            KeyAction::ScrollUp(lines) => {
                self.state.scroll_by(-(lines as isize), &self.view, height);
                self.sync_active_section();
            }
            KeyAction::ScrollDown(lines) => {
                self.state.scroll_by(lines as isize, &self.view, height);
                self.sync_active_section();
            }
            KeyAction::ScrollTop => {
                self.state.scroll_to_top();
                self.sync_active_section();
            }
            KeyAction::ScrollBottom => {
                self.state.scroll_to_bottom(&self.view, height);
                self.sync_active_section();
            }
            KeyAction::SelectPrevious => self.state.select_previous(),
            KeyAction::SelectNext => self.state.select_next(),
            // The jump marks the row active optimistically; the tracker
            // catches up on the next scroll rather than immediately, so
            // the clicked section is not overridden by a band-mate.
            KeyAction::ActivateSelected => self.state.activate_selected(&self.view),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let layout = self.layout();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let surface = match layout.surface_at(mouse.column) {
                    Surface::Panel => DragSurface::Panel,
                    Surface::Chat => DragSurface::Chat,
                };
                self.state.motion.begin_drag(surface);
                self.gesture = Some(Gesture {
                    surface,
                    last_column: mouse.column,
                    last_at: Instant::now(),
                    moved: false,
                });
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(gesture) = self.gesture.as_mut() else {
                    return;
                };
                let now = Instant::now();
                let delta = f64::from(mouse.column) - f64::from(gesture.last_column);
                self.state.motion.drag_by(delta, now - gesture.last_at);

                gesture.moved |= delta != 0.0;
                gesture.last_column = mouse.column;
                gesture.last_at = now;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(gesture) = self.gesture.take() else {
                    return;
                };

                // A press-and-release on the panel is a click, not a drag.
                if !gesture.moved
                    && gesture.surface == DragSurface::Panel
                    && let Some(panel_area) = layout.panel
                {
                    let panel = NavigationPanel::new(&self.state);
                    if let Some(index) = panel.row_at(panel_area, mouse.row) {
                        debug!(index, "nav row clicked");
                        self.state.motion.release();
                        self.state.activate_row(index, &self.view);
                        return;
                    }
                }
                self.state.motion.release();
            }
            MouseEventKind::ScrollDown => {
                self.state.scroll_by(WHEEL_SCROLL_LINES, &self.view, layout.chat.height);
                self.sync_active_section();
            }
            MouseEventKind::ScrollUp => {
                self.state.scroll_by(-WHEEL_SCROLL_LINES, &self.view, layout.chat.height);
                self.sync_active_section();
            }
            _ => {}
        }
    }

    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> std::io::Result<()> {
        let size = terminal.size()?;
        if size.width != self.area.width || size.height != self.area.height {
            self.resize(size.width, size.height);
        }

        terminal.draw(|frame| self.render(frame))?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame<'_>) {
        let layout = PanelLayout::calculate(frame.area(), &self.state.motion);

        Header::new(&self.state).render(frame, layout.header);
        ChatSurface::new(&self.state, &self.view).render(frame, layout.chat);
        if let Some(panel_area) = layout.panel {
            NavigationPanel::new(&self.state).render(frame, panel_area, layout.panel_skip);
        }
        Footer::new(&self.state).render(frame, layout.footer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use sidetrack_core::PanelPhase;

    const FRAME: Duration = Duration::from_millis(16);

    fn test_app() -> App {
        let messages = vec![
            ChatMessage::user("First question"),
            ChatMessage::assistant("An answer long enough to wrap across lines. ".repeat(5)),
            ChatMessage::user("Second question"),
            ChatMessage::assistant("Second answer"),
        ];
        App::new(messages, &Config::default())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    fn settle(app: &mut App) {
        for _ in 0..600 {
            app.tick(FRAME);
            if !app.is_animating() {
                return;
            }
        }
        panic!("animation did not settle");
    }

    #[test]
    fn test_quit_key() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Char('q')));
        assert!(app.should_exit());
    }

    #[test]
    fn test_toggle_panel_snaps_open_and_closed() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Tab));
        assert!(app.is_animating());
        settle(&mut app);
        assert_eq!(app.state.motion.phase(), PanelPhase::PanelFocused);

        app.handle_event(key(KeyCode::Tab));
        settle(&mut app);
        assert_eq!(app.state.motion.phase(), PanelPhase::ChatFocused);
    }

    #[test]
    fn test_scroll_updates_active_section() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Char('G')));
        assert!(app.state.scroll > 0);
        assert!(app.state.active_id.is_some());
    }

    #[test]
    fn test_drag_right_past_threshold_opens_panel() {
        let mut app = test_app();

        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        for column in [20u16, 30, 40, 50] {
            app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), column, 5));
        }
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 50, 5));

        assert!(app.is_animating());
        settle(&mut app);
        assert_eq!(app.state.motion.phase(), PanelPhase::PanelFocused);
    }

    #[test]
    fn test_panel_click_jumps_to_section() {
        let mut app = test_app();
        app.state.motion.open();
        settle(&mut app);

        // Row 1 of the screen is the first nav row (row 0 is the header).
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 2, 1));

        assert_eq!(app.state.active_id.as_deref(), Some("message-0"));
        assert_eq!(app.state.motion.phase(), PanelPhase::PanelFocused);
    }

    #[test]
    fn test_wheel_scroll_clamps() {
        let mut app = test_app();
        app.handle_event(mouse(MouseEventKind::ScrollUp, 40, 5));
        assert_eq!(app.state.scroll, 0);

        for _ in 0..100 {
            app.handle_event(mouse(MouseEventKind::ScrollDown, 40, 5));
        }
        let height = app.chat_height();
        assert_eq!(app.state.scroll, app.view.max_scroll(height));
    }

    #[test]
    fn test_resize_rewraps_transcript() {
        let mut app = test_app();
        let before = app.view.line_count();
        app.handle_event(Event::Resize(40, 20));
        assert!(app.view.line_count() > before);
        assert_eq!(app.state.motion.viewport_width(), 40.0);
    }

    #[test]
    fn test_draw_smoke() {
        let mut app = test_app();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        app.draw(&mut terminal).unwrap();
        app.state.motion.open();
        for _ in 0..600 {
            app.tick(FRAME);
            app.draw(&mut terminal).unwrap();
            if !app.is_animating() {
                break;
            }
        }
        assert_eq!(app.state.motion.phase(), PanelPhase::PanelFocused);
    }
}
