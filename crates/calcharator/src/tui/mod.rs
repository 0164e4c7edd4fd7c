//! Terminal frontend
//!
//! ratatui widgets drawn on a crossterm backend with mouse capture.

mod app;
mod cursor_text;
mod input;
mod keypad;
mod notepad;
mod router;
mod ui;

use std::io;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{info, warn};

pub use app::App;
pub use cursor_text::{CursorTextWidget, UnitWindow};
pub use input::{InputHandler, KeyAction};
pub use keypad::{ButtonKind, Keypad, KeypadButton, KeypadWidget};
pub use notepad::{Notepad, NotepadWidget, PARAGRAPHS};
pub use router::{Route, Router};
pub use ui::{render, AppUI};

use crate::config::AppConfig;
use crate::core::Evaluator;
use crate::error::{AppError, AppResult};

impl App {
    /// Creates the app described by `config`
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Evaluator::with_config(config.engine),
            config.start.into(),
            config.scientific,
        )
    }
}

/// Runs the interactive UI until the user quits
///
/// The terminal is restored on both the success and the error path.
///
/// # Errors
///
/// Returns terminal setup, draw and event read failures.
pub fn run(config: &AppConfig) -> AppResult<()> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("cannot enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(AppError::terminal(format!("cannot enter alternate screen: {e}")));
    }

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .map_err(AppError::from)
        .and_then(|mut terminal| {
            let result = run_app(&mut terminal, App::from_config(config));
            if let Err(e) = terminal.show_cursor() {
                warn!("cannot show cursor: {e}");
            }
            result
        });

    restore();
    result
}

fn restore() {
    if let Err(e) = disable_raw_mode() {
        warn!("cannot disable raw mode: {e}");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
        warn!("cannot leave alternate screen: {e}");
    }
}

fn frame_area<B: Backend>(terminal: &Terminal<B>) -> AppResult<Rect> {
    let size = terminal.size()?;
    Ok(Rect::new(0, 0, size.width, size.height))
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> AppResult<()> {
    info!(route = %app.route(), "ui started");

    loop {
        app.sync_viewport(frame_area(terminal)?);
        terminal.draw(|f| render(&app, f))?;

        // Wake up for the next caret blink even without input
        if event::poll(app.until_blink())? {
            let event = event::read()?;
            let area = frame_area(terminal)?;
            app.handle_event(&event, area);
        }

        if app.should_quit() {
            break;
        }
    }

    info!("ui stopped");
    Ok(())
}
