//! splitnav - Responsive Report Browser
//!
//! A terminal report browser demonstrating responsive stack navigation:
//! wide terminals get a guaranteed central content pane next to the report
//! list, small terminals a single pane, with a right-docked report overlay
//! and a debug console layered above.

use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::App;
use presentation::{render_ui, InputHandler};


/// Entry point for the splitnav report browser.
///
/// Sets up the terminal interface, initializes the application state with
/// the current terminal width, and runs the main event loop until the user
/// quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let width = terminal.size()?.width;
    let mut app = App::new(width);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Handles terminal rendering, keyboard input processing, and resize
/// events, which rehydrate the navigation tree when the layout mode
/// changes. Continues running until the user presses 'q' in normal mode.
///
/// # Arguments
///
/// * `terminal` - Terminal interface for rendering
/// * `app` - Mutable reference to application state
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') if matches!(app.mode, application::AppMode::Normal) => {
                    return Ok(())
                }
                _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
            },
            Event::Resize(width, _) => app.handle_resize(width),
            _ => {}
        }
    }
}
