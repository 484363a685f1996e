//! Application state management for the report browser.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface, including the debug console workflow
//! and the resize-driven rehydration of the navigation tree.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::domain::{
    report_params, should_attach_log, top_most_report_id, ConsoleCommand, LogEntry, LogLevel,
    NavAction, NavigationState, ResponsiveRouter, Route, Router, RouterConfig, ScreenName,
    StackRouter,
};
use crate::infrastructure::{LogExporter, Session, SessionRepository};

/// Terminal widths below this render as a single-pane layout.
pub const NARROW_WIDTH: u16 = 80;

const MAX_LOG_ENTRIES: usize = 500;
const CLIPBOARD_TAIL: usize = 50;

/// Represents the current mode of the application.
///
/// The application can be in different modes that determine how user input
/// is interpreted and what UI elements are displayed.
#[derive(Debug)]
pub enum AppMode {
    /// Normal navigation mode - arrow keys move the report selection
    Normal,
    /// Debug console overlay is open and capturing input
    Console,
    /// Help screen is displayed
    Help,
}

/// A report the sidebar offers for opening.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub report_id: String,
    pub title: String,
}

type LayoutPredicate = Box<dyn Fn() -> bool>;

/// Main application state containing the navigation tree and UI state.
///
/// # Examples
///
/// ```
/// use splitnav::application::App;
///
/// let app = App::default();
/// assert_eq!(app.selected_report, 0);
/// assert!(!app.is_small_screen());
/// ```
pub struct App {
    /// The current navigation tree
    pub nav_state: NavigationState,
    /// Current application mode
    pub mode: AppMode,
    /// Reports offered in the sidebar
    pub reports: Vec<ReportSummary>,
    /// Currently selected sidebar entry (zero-based)
    pub selected_report: usize,
    /// Captured console logs, oldest first
    pub logs: VecDeque<LogEntry>,
    /// Current console input buffer
    pub console_input: String,
    /// Cursor position within the console input buffer
    pub cursor_position: usize,
    /// How many lines the console view is scrolled up from the latest entry
    pub console_scroll: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    config: RouterConfig,
    router: ResponsiveRouter<StackRouter, LayoutPredicate>,
    terminal_width: Rc<Cell<u16>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(120)
    }
}

impl App {
    /// Creates the application state for a terminal of the given width.
    ///
    /// The router's layout predicate reads the width cell shared with the
    /// event loop, so later resizes are observed without rebuilding the
    /// router. The initial tree is rehydrated once, which on wide terminals
    /// already inserts the central pane.
    pub fn new(terminal_width: u16) -> Self {
        let width = Rc::new(Cell::new(terminal_width));
        let predicate_width = Rc::clone(&width);
        let router = ResponsiveRouter::new(
            StackRouter::new(),
            Box::new(move || predicate_width.get() < NARROW_WIDTH) as LayoutPredicate,
        );
        let config = RouterConfig::default();
        let nav_state = router.rehydrate(router.initial_state(&config), &config);

        Self {
            nav_state,
            mode: AppMode::Normal,
            reports: demo_reports(),
            selected_report: 0,
            logs: VecDeque::new(),
            console_input: String::new(),
            cursor_position: 0,
            console_scroll: 0,
            help_scroll: 0,
            status_message: None,
            config,
            router,
            terminal_width: width,
        }
    }

    pub fn is_small_screen(&self) -> bool {
        self.terminal_width.get() < NARROW_WIDTH
    }

    pub fn terminal_width(&self) -> u16 {
        self.terminal_width.get()
    }

    /// Records a terminal resize and rehydrates the navigation tree when
    /// the layout mode flipped between small and wide.
    pub fn handle_resize(&mut self, width: u16) {
        let was_small = self.is_small_screen();
        self.terminal_width.set(width);
        if was_small != self.is_small_screen() {
            self.rehydrate_now();
        }
    }

    /// Runs the navigation tree through the router's rehydration.
    pub fn rehydrate_now(&mut self) {
        self.nav_state = self.router.rehydrate(self.nav_state.clone(), &self.config);
    }

    /// The report id currently in view, or an empty string.
    pub fn current_report_id(&self) -> String {
        top_most_report_id(Some(&self.nav_state))
    }

    fn dispatch(&mut self, action: NavAction) -> bool {
        match self.router.apply_action(&self.nav_state, &action, &self.config) {
            Some(next) => {
                self.nav_state = next;
                true
            }
            None => false,
        }
    }

    /// Opens a report in the content pane.
    ///
    /// On small layouts the report is pushed onto the top-level stack; on
    /// wide layouts it replaces the central pane's nested stack.
    pub fn open_report(&mut self, report_id: &str) {
        if self.is_small_screen() {
            self.dispatch(NavAction::Push {
                name: ScreenName::Report,
                params: Some(report_params(report_id)),
            });
            return;
        }

        // Wide layouts are guaranteed a central pane after rehydration
        self.rehydrate_now();
        if let Some(position) = self
            .nav_state
            .routes
            .iter()
            .rposition(|route| route.name == ScreenName::CentralPane)
        {
            self.nav_state.routes[position].state = Some(Box::new(
                NavigationState::from_routes(vec![Route::report(report_id)]),
            ));
            self.nav_state.index = position;
        }
        self.rehydrate_now();
    }

    /// Opens a report in a right-docked overlay above the current layout.
    pub fn open_modal(&mut self, report_id: &str) {
        let overlay = Route::with_state(
            ScreenName::RightModal,
            NavigationState::from_routes(vec![Route::report(report_id)]),
        );
        self.nav_state.routes.push(overlay);
        self.nav_state.index = self.nav_state.routes.len() - 1;
        self.rehydrate_now();
    }

    /// Pops the topmost route. Returns false when the stack refuses.
    pub fn go_back(&mut self) -> bool {
        if self.dispatch(NavAction::Pop) {
            true
        } else {
            self.status_message = Some("Nothing to go back to".to_string());
            false
        }
    }

    pub fn goto_screen(&mut self, screen: ScreenName) {
        self.dispatch(NavAction::Navigate { name: screen, params: None });
    }

    pub fn select_next_report(&mut self) {
        if self.selected_report + 1 < self.reports.len() {
            self.selected_report += 1;
        }
    }

    pub fn select_previous_report(&mut self) {
        if self.selected_report > 0 {
            self.selected_report -= 1;
        }
    }

    pub fn open_selected_report(&mut self) {
        if let Some(report) = self.reports.get(self.selected_report) {
            let id = report.report_id.clone();
            self.open_report(&id);
        }
    }

    pub fn open_selected_modal(&mut self) {
        if let Some(report) = self.reports.get(self.selected_report) {
            let id = report.report_id.clone();
            self.open_modal(&id);
        }
    }

    /// Appends a log entry unless its message matches an ignore pattern.
    /// The store's own write notice for the logs key must not loop back in.
    pub fn add_log(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        if !should_attach_log(&message) {
            return;
        }
        self.logs.push_back(LogEntry::new(level, message));
        while self.logs.len() > MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
    }

    /// Switches to console mode with an empty input buffer.
    pub fn start_console(&mut self) {
        self.mode = AppMode::Console;
        self.console_input.clear();
        self.cursor_position = 0;
        self.console_scroll = 0;
        self.status_message = None;
    }

    /// Closes the console and returns to normal mode without running input.
    pub fn cancel_console(&mut self) {
        self.mode = AppMode::Normal;
        self.console_input.clear();
        self.cursor_position = 0;
    }

    pub fn start_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    /// Runs the console input buffer as a command.
    ///
    /// The input is echoed as an Info entry, then either executed or logged
    /// as an Error, matching the console's output shape.
    pub fn run_console_command(&mut self) {
        let input = std::mem::take(&mut self.console_input);
        self.cursor_position = 0;
        self.console_scroll = 0;

        let input = input.trim().to_string();
        if input.is_empty() {
            return;
        }
        self.add_log(LogLevel::Info, format!("> {}", input));
        match ConsoleCommand::parse(&input) {
            Ok(command) => self.execute_command(command),
            Err(err) => self.add_log(LogLevel::Error, format!("Error: {}", err)),
        }
    }

    fn execute_command(&mut self, command: ConsoleCommand) {
        match command {
            ConsoleCommand::Help => {
                self.start_help();
            }
            ConsoleCommand::Clear => {
                self.logs.clear();
            }
            ConsoleCommand::State => match serde_json::to_string_pretty(&self.nav_state) {
                Ok(json) => self.add_log(LogLevel::Result, json),
                Err(e) => self.add_log(LogLevel::Error, format!("Error: {}", e)),
            },
            ConsoleCommand::Report => {
                let id = self.current_report_id();
                if id.is_empty() {
                    self.add_log(LogLevel::Result, "no report in view");
                } else {
                    self.add_log(LogLevel::Result, id);
                }
            }
            ConsoleCommand::Open { report_id } => {
                self.open_report(&report_id);
                self.add_log(LogLevel::Result, format!("opened report {}", report_id));
            }
            ConsoleCommand::Modal { report_id } => {
                self.open_modal(&report_id);
                self.add_log(LogLevel::Result, format!("opened report {} in overlay", report_id));
            }
            ConsoleCommand::Goto { screen } => {
                if screen.is_navigator() {
                    self.add_log(
                        LogLevel::Error,
                        format!("Error: {} is a navigator, not a screen", screen),
                    );
                } else {
                    self.goto_screen(screen);
                    self.add_log(LogLevel::Result, format!("focused {}", screen));
                }
            }
            ConsoleCommand::Back => {
                if self.dispatch(NavAction::Pop) {
                    self.add_log(LogLevel::Result, "popped topmost route");
                } else {
                    self.add_log(LogLevel::Error, "Error: nothing to go back to");
                }
            }
            ConsoleCommand::Save { path } => {
                let entries = self.logs.len();
                match SessionRepository::save_session(&self.session(), &path) {
                    Ok(saved) => {
                        self.add_log(LogLevel::Result, format!("session written to {}", saved));
                        self.add_log(
                            LogLevel::Info,
                            format!("store write for key: logs ({} entries)", entries),
                        );
                    }
                    Err(e) => self.add_log(LogLevel::Error, format!("Error: {}", e)),
                }
            }
            ConsoleCommand::Load { path } => match SessionRepository::load_session(&path) {
                Ok((session, loaded)) => {
                    self.logs = session.logs.into();
                    self.nav_state = self.router.rehydrate(session.nav_state, &self.config);
                    self.add_log(LogLevel::Result, format!("session restored from {}", loaded));
                }
                Err(e) => self.add_log(LogLevel::Error, format!("Error: {}", e)),
            },
            ConsoleCommand::Export { path } => {
                let logs: Vec<LogEntry> = self.logs.iter().cloned().collect();
                match LogExporter::export_csv(&logs, &path) {
                    Ok(written) => {
                        self.add_log(LogLevel::Result, format!("logs exported to {}", written))
                    }
                    Err(e) => self.add_log(LogLevel::Error, format!("Error: {}", e)),
                }
            }
            ConsoleCommand::Copy => self.copy_logs(),
        }
    }

    fn copy_logs(&mut self) {
        let start = self.logs.len().saturating_sub(CLIPBOARD_TAIL);
        let text = self
            .logs
            .iter()
            .skip(start)
            .map(LogEntry::to_line)
            .collect::<Vec<_>>()
            .join("\n");
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(_) => self.add_log(LogLevel::Result, "log tail copied to clipboard"),
            Err(e) => self.add_log(LogLevel::Error, format!("Error: {}", e)),
        }
    }

    fn session(&self) -> Session {
        Session {
            nav_state: self.nav_state.clone(),
            logs: self.logs.iter().cloned().collect(),
        }
    }
}

fn demo_reports() -> Vec<ReportSummary> {
    [
        ("1001", "Team lunch - Berlin offsite"),
        ("1002", "Q3 flight bookings"),
        ("1003", "Conference travel"),
        ("1004", "Office supplies restock"),
        ("1005", "Client dinner"),
    ]
    .into_iter()
    .map(|(report_id, title)| ReportSummary {
        report_id: report_id.to_string(),
        title: title.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::has_central_pane;
    use tempfile::tempdir;

    #[test]
    fn test_cold_start_on_wide_terminal_has_central_pane() {
        let app = App::default();
        assert!(has_central_pane(&app.nav_state));
    }

    #[test]
    fn test_cold_start_on_small_terminal_stays_single_pane() {
        let app = App::new(60);
        assert!(app.is_small_screen());
        assert!(!has_central_pane(&app.nav_state));
    }

    #[test]
    fn test_resize_to_wide_inserts_central_pane() {
        let mut app = App::new(60);
        assert!(!has_central_pane(&app.nav_state));

        app.handle_resize(120);

        assert!(!app.is_small_screen());
        assert!(has_central_pane(&app.nav_state));
        assert!(app.nav_state.routes.iter().all(|route| route.key.is_some()));
    }

    #[test]
    fn test_open_report_on_small_layout_pushes() {
        let mut app = App::new(60);
        app.open_report("9");

        let top = app.nav_state.top_route().unwrap();
        assert_eq!(top.name, ScreenName::Report);
        assert_eq!(app.current_report_id(), "9");
    }

    #[test]
    fn test_open_report_on_wide_layout_fills_central_pane() {
        let mut app = App::default();
        app.open_report("7");

        let pane = app
            .nav_state
            .routes
            .iter()
            .find(|route| route.name == ScreenName::CentralPane)
            .unwrap();
        let nested = pane.state.as_ref().unwrap();
        assert_eq!(nested.routes[0].report_id(), Some("7"));
        assert_eq!(app.current_report_id(), "7");
    }

    #[test]
    fn test_modal_report_seeds_central_pane_after_resize() {
        let mut app = App::new(60);
        app.open_modal("55");

        // Growing the terminal inserts a central pane seeded from the overlay
        app.handle_resize(120);

        let pane = app
            .nav_state
            .routes
            .iter()
            .find(|route| route.name == ScreenName::CentralPane)
            .unwrap();
        let nested = pane.state.as_ref().unwrap();
        assert_eq!(nested.routes[0].report_id(), Some("55"));
    }

    #[test]
    fn test_go_back_pops_modal() {
        let mut app = App::default();
        app.open_modal("5");
        assert_eq!(
            app.nav_state.top_route().unwrap().name,
            ScreenName::RightModal
        );

        assert!(app.go_back());
        assert!(app
            .nav_state
            .routes
            .iter()
            .all(|route| route.name != ScreenName::RightModal));
    }

    #[test]
    fn test_go_back_on_root_sets_status() {
        let mut app = App::new(60);
        assert!(!app.go_back());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_console_echoes_input_and_reports_errors() {
        let mut app = App::default();
        app.start_console();
        app.console_input = "frobnicate".to_string();
        app.run_console_command();

        let lines: Vec<&LogEntry> = app.logs.iter().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].level, LogLevel::Info);
        assert_eq!(lines[0].message, "> frobnicate");
        assert_eq!(lines[1].level, LogLevel::Error);
        assert!(lines[1].message.contains("Unknown command"));
    }

    #[test]
    fn test_console_open_command_navigates() {
        let mut app = App::default();
        app.console_input = "open 42".to_string();
        app.run_console_command();

        assert_eq!(app.current_report_id(), "42");
        assert_eq!(app.logs.back().unwrap().level, LogLevel::Result);
    }

    #[test]
    fn test_console_goto_command_changes_focus() {
        let mut app = App::default();
        app.console_input = "goto settings".to_string();
        app.run_console_command();

        assert_eq!(
            app.nav_state.active_route().unwrap().name,
            ScreenName::Settings
        );
    }

    #[test]
    fn test_console_goto_rejects_navigators() {
        let mut app = App::default();
        let routes_before = app.nav_state.routes.len();

        app.console_input = "goto RightModalNavigator".to_string();
        app.run_console_command();

        assert_eq!(app.nav_state.routes.len(), routes_before);
        assert_eq!(app.logs.back().unwrap().level, LogLevel::Error);
    }

    #[test]
    fn test_clear_command_drops_logs() {
        let mut app = App::default();
        app.add_log(LogLevel::Info, "one");
        app.add_log(LogLevel::Info, "two");

        app.console_input = "clear".to_string();
        app.run_console_command();

        assert!(app.logs.is_empty());
    }

    #[test]
    fn test_store_write_notice_is_filtered() {
        let mut app = App::default();
        app.add_log(LogLevel::Info, "store write for key: logs (2 entries)");
        assert!(app.logs.is_empty());
    }

    #[test]
    fn test_log_capacity_is_bounded() {
        let mut app = App::default();
        for n in 0..(MAX_LOG_ENTRIES + 10) {
            app.add_log(LogLevel::Info, format!("entry {}", n));
        }
        assert_eq!(app.logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(app.logs.front().unwrap().message, "entry 10");
    }

    #[test]
    fn test_save_command_writes_session_without_loop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut app = App::default();
        app.console_input = format!("save {}", path.display());
        app.run_console_command();

        assert!(path.exists());
        assert!(app
            .logs
            .iter()
            .any(|entry| entry.message.contains("session written")));
        // The store-write notice never reaches the captured logs
        assert!(app
            .logs
            .iter()
            .all(|entry| !entry.message.contains("store write for key: logs")));
    }

    #[test]
    fn test_load_command_restores_and_rehydrates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut source = App::new(60);
        source.open_report("31");
        source.console_input = format!("save {}", path.display());
        source.run_console_command();

        // A wide app loading the small session gains a central pane
        let mut target = App::default();
        target.console_input = format!("load {}", path.display());
        target.run_console_command();

        assert!(has_central_pane(&target.nav_state));
        assert_eq!(
            target
                .logs
                .iter()
                .filter(|entry| entry.message.contains("session restored"))
                .count(),
            1
        );
    }
}
