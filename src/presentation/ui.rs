use crate::application::{App, AppMode};
use crate::domain::{top_most_report_id, ScreenName};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if topmost_is_modal(app) {
        render_modal_overlay(f, app);
    }
    if matches!(app.mode, AppMode::Console) {
        render_console_overlay(f, app);
    }
    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn topmost_is_modal(app: &App) -> bool {
    app.nav_state.top_route().map(|route| route.name) == Some(ScreenName::RightModal)
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let report = app.current_report_id();
    let viewing = if report.is_empty() { "-".to_string() } else { report };
    let layout = if app.is_small_screen() { "small" } else { "wide" };
    let header = Paragraph::new(format!(
        "splitnav - Report Browser | viewing: {} | layout: {} ({} cols)",
        viewing,
        layout,
        app.terminal_width()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Enter: open | m: overlay | Esc: back | `: console | F1/?: help | q: quit"
                    .to_string()
            }
        }
        AppMode::Console => "Enter: run command | Up/Down: scroll logs | Esc: close console".to_string(),
        AppMode::Help => "j/k: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Console => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    if app.is_small_screen() {
        if app.current_report_id().is_empty() {
            render_report_list(f, app, area);
        } else {
            render_report_pane(f, app, area);
        }
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(area);

    render_report_list(f, app, columns[0]);
    render_report_pane(f, app, columns[1]);
}

fn render_report_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .reports
        .iter()
        .enumerate()
        .map(|(i, report)| {
            let style = if i == app.selected_report {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}  {}", report.report_id, report.title)).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Reports"));
    f.render_widget(list, area);
}

fn render_report_pane(f: &mut Frame, app: &App, area: Rect) {
    let report_id = app.current_report_id();
    let body = if report_id.is_empty() {
        "No report selected.\n\nThis pane shows the most recently accessed report.".to_string()
    } else {
        let title = app
            .reports
            .iter()
            .find(|report| report.report_id == report_id)
            .map(|report| report.title.as_str())
            .unwrap_or("(unknown report)");
        format!("Report {}\n\n{}", report_id, title)
    };

    let pane = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Report"));
    f.render_widget(pane, area);
}

fn render_modal_overlay(f: &mut Frame, app: &App) {
    let area = f.area();
    let width = (area.width / 3).max(30).min(area.width);
    let popup_area = Rect {
        x: area.width.saturating_sub(width),
        y: 1,
        width,
        height: area.height.saturating_sub(4),
    };

    f.render_widget(Clear, popup_area);

    let nested = app
        .nav_state
        .top_route()
        .and_then(|route| route.state.as_deref());
    let report_id = top_most_report_id(nested);
    let body = if report_id.is_empty() {
        "Report overlay\n\nEsc closes this panel".to_string()
    } else {
        format!("Report {}\n\nEsc closes this panel", report_id)
    };

    let overlay = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Overlay")
                .style(Style::default().fg(Color::Magenta)),
        );
    f.render_widget(overlay, popup_area);
}

fn render_console_overlay(f: &mut Frame, app: &App) {
    let area = f.area();
    let height = (area.height / 2).max(8).min(area.height);
    let popup_area = Rect {
        x: 0,
        y: area.height.saturating_sub(height),
        width: area.width,
        height,
    };

    f.render_widget(Clear, popup_area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(popup_area);

    let lines: Vec<String> = app
        .logs
        .iter()
        .flat_map(|entry| {
            let line = entry.to_line();
            line.lines().map(str::to_string).collect::<Vec<_>>()
        })
        .collect();
    let visible_height = sections[0].height.saturating_sub(2) as usize;
    let bottom = lines.len().saturating_sub(app.console_scroll.min(lines.len()));
    let start = bottom.saturating_sub(visible_height);
    let visible_text = lines[start..bottom].join("\n");

    let log_widget = Paragraph::new(visible_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Console ({} entries)", app.logs.len())),
    );
    f.render_widget(log_widget, sections[0]);

    let input = Paragraph::new(format!("> {}", app.console_input))
        .block(Block::default().borders(Borders::ALL).title("Command"))
        .style(Style::default().fg(Color::Green));
    f.render_widget(input, sections[1]);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("splitnav Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"SPLITNAV REPORT BROWSER REFERENCE

=== LAYOUT ===
Terminals 80 columns and wider use the split layout: the report list on
the left and a central report pane on the right. The central pane is
guaranteed to exist on wide layouts; shrinking the terminal below 80
columns switches to a single pane showing only the topmost screen.

Overlays are layered above the panes:
- The report overlay (right-docked) shows a report above the layout
- The debug console (bottom) captures logs and runs commands
- This help screen

=== NAVIGATION KEYS ===
Up/Down or k/j   Move the report selection
Enter            Open the selected report in the content pane
m                Open the selected report in a right-docked overlay
Esc/Backspace    Go back (pops the topmost route)
`                Open the debug console
F1 or ?          Show this help
q                Quit application

=== CONSOLE COMMANDS ===
help             Show this help screen
clear            Drop all captured log entries
state            Dump the navigation tree as JSON into the log
report           Print the report id currently in view
open <reportID>  Open a report in the content pane
modal <reportID> Open a report in a right-docked overlay
goto <screen>    Focus or push a top-level screen by name
back             Pop the topmost route
save <path>      Write the session (tree + logs) as JSON
load <path>      Restore a previously saved session
export <path>    Write captured logs as CSV
copy             Place the recent log tail on the clipboard

Command words are case-insensitive. Paths may contain spaces.
Typographic quotes pasted from chat clients are converted to ASCII.

=== CONSOLE KEYS ===
Enter            Run the typed command
Up/Down          Scroll the captured logs
Esc              Close the console

=== HELP NAVIGATION ===
Up/Down or j/k   Scroll help text up/down one line
Page Up/Down     Scroll help text up/down 5 lines
Home             Jump to top of help text
Esc/F1/?/q       Close this help window"#
        .to_string()
}
