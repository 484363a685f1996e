use crate::application::{App, AppMode};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Console => Self::handle_console_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous_report();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_next_report();
            }
            KeyCode::Enter => {
                app.open_selected_report();
            }
            KeyCode::Char('m') => {
                app.open_selected_modal();
            }
            KeyCode::Esc | KeyCode::Backspace => {
                app.go_back();
            }
            KeyCode::Char('`') => {
                app.start_console();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.start_help();
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_console_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                app.run_console_command();
            }
            KeyCode::Esc => {
                app.cancel_console();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.console_input.remove(app.cursor_position - 1);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.console_input.len() {
                    app.console_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.console_input.len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.console_input.len();
            }
            KeyCode::Up => {
                app.console_scroll += 1;
            }
            KeyCode::Down => {
                app.console_scroll = app.console_scroll.saturating_sub(1);
            }
            KeyCode::Char(c) => {
                app.console_input.insert(app.cursor_position, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
