use std::io::Result;
use std::panic;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::App;
use crate::event_handler::EventHandler;

/// Input poll timeout while idle.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Input poll timeout while a snap animation is in flight, roughly a frame.
const ANIMATING_POLL: Duration = Duration::from_millis(16);

pub async fn run(app: &mut App) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let backend = CrosstermBackend::new(std::io::stdout());
        if let Ok(mut terminal) = Terminal::new(backend) {
            let _ = terminal.show_cursor();
        }
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            DisableMouseCapture
        );
        original_hook(panic_info);
    }));

    terminal.clear()?;
    app.draw(&mut terminal)?;

    let mut last_tick = Instant::now();
    while !app.should_exit() {
        let timeout = if app.is_animating() { ANIMATING_POLL } else { IDLE_POLL };

        // Blocking poll off the runtime thread so the executor stays free.
        let maybe_event =
            tokio::task::spawn_blocking(move || EventHandler::read(timeout)).await.ok().flatten();

        let now = Instant::now();
        let mut dirty = false;

        if app.is_animating() {
            app.tick(now - last_tick);
            dirty = true;
        }
        last_tick = now;

        if let Some(event) = maybe_event {
            app.handle_event(event);
            dirty = true;
        }

        if dirty {
            app.draw(&mut terminal)?;
        }
    }

    terminal.show_cursor()?;
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen, DisableMouseCapture)?;

    Ok(())
}
