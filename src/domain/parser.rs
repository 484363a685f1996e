//! Console input parsing for the debug overlay.
//!
//! Input typed into the console is sanitized (mobile keyboards and chat
//! clients substitute typographic quotes that no command accepts) and then
//! parsed into a closed command language:
//!
//! ```text
//! help                 show the help overlay
//! clear                drop all captured log entries
//! state                dump the navigation tree as JSON
//! report               print the report id currently in view
//! open <reportID>      open a report in the content pane
//! modal <reportID>     open a report in a right-docked overlay
//! goto <screen>        focus or push a top-level screen by name
//! back                 pop the topmost route
//! save <path>          write the session (tree + logs) as JSON
//! load <path>          restore a previously saved session
//! export <path>        write captured logs as CSV
//! copy                 place the recent log tail on the clipboard
//! ```
//!
//! Command words are case-insensitive; paths may contain spaces.

use super::errors::{DomainError, DomainResult};
use super::models::ScreenName;

/// Messages that must never enter the log store. The store-write notice for
/// the logs key would otherwise be captured and re-trigger itself.
const LOG_PATTERNS_TO_IGNORE: [&str; 1] = ["store write for key: logs"];

/// Checks whether a message may be attached to the captured logs.
///
/// # Examples
///
/// ```
/// use splitnav::domain::should_attach_log;
///
/// assert!(should_attach_log("opened report 42"));
/// assert!(!should_attach_log("store write for key: logs (12 entries)"));
/// ```
pub fn should_attach_log(message: &str) -> bool {
    !LOG_PATTERNS_TO_IGNORE
        .iter()
        .any(|pattern| message.contains(pattern))
}

/// Replaces typographic quotes and the horizontal ellipsis with their ASCII
/// equivalents so pasted commands parse.
///
/// # Examples
///
/// ```
/// use splitnav::domain::sanitize_console_input;
///
/// assert_eq!(sanitize_console_input("open \u{201C}42\u{201D}"), "open \"42\"");
/// assert_eq!(sanitize_console_input("wait\u{2026}"), "wait...");
/// ```
pub fn sanitize_console_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' => sanitized.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' => sanitized.push('"'),
            '\u{2026}' => sanitized.push_str("..."),
            _ => sanitized.push(ch),
        }
    }
    sanitized
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Help,
    Clear,
    State,
    Report,
    Back,
    Copy,
    Open { report_id: String },
    Modal { report_id: String },
    Goto { screen: ScreenName },
    Save { path: String },
    Load { path: String },
    Export { path: String },
}

impl ConsoleCommand {
    /// Parses a line of console input.
    ///
    /// # Examples
    ///
    /// ```
    /// use splitnav::domain::ConsoleCommand;
    ///
    /// let command = ConsoleCommand::parse("open 42").unwrap();
    /// assert_eq!(command, ConsoleCommand::Open { report_id: "42".to_string() });
    ///
    /// assert!(ConsoleCommand::parse("frobnicate").is_err());
    /// ```
    pub fn parse(input: &str) -> DomainResult<Self> {
        let sanitized = sanitize_console_input(input);
        let mut words = sanitized.split_whitespace();
        let Some(command) = words.next() else {
            return Err(DomainError::EmptyCommand);
        };

        match command.to_ascii_lowercase().as_str() {
            "help" => Ok(ConsoleCommand::Help),
            "clear" => Ok(ConsoleCommand::Clear),
            "state" => Ok(ConsoleCommand::State),
            "report" => Ok(ConsoleCommand::Report),
            "back" => Ok(ConsoleCommand::Back),
            "copy" => Ok(ConsoleCommand::Copy),
            "open" => {
                let id = words.next().ok_or(DomainError::MissingArgument("reportID"))?;
                Ok(ConsoleCommand::Open { report_id: id.to_string() })
            }
            "modal" => {
                let id = words.next().ok_or(DomainError::MissingArgument("reportID"))?;
                Ok(ConsoleCommand::Modal { report_id: id.to_string() })
            }
            "goto" => {
                let name = words.next().ok_or(DomainError::MissingArgument("screen"))?;
                Ok(ConsoleCommand::Goto { screen: name.parse()? })
            }
            "save" => rest_as_path(words, "path").map(|path| ConsoleCommand::Save { path }),
            "load" => rest_as_path(words, "path").map(|path| ConsoleCommand::Load { path }),
            "export" => rest_as_path(words, "path").map(|path| ConsoleCommand::Export { path }),
            other => Err(DomainError::UnknownCommand(other.to_string())),
        }
    }
}

fn rest_as_path<'a>(
    words: impl Iterator<Item = &'a str>,
    argument: &'static str,
) -> DomainResult<String> {
    let path = words.collect::<Vec<_>>().join(" ");
    if path.is_empty() {
        Err(DomainError::MissingArgument(argument))
    } else {
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_character_map() {
        assert_eq!(
            sanitize_console_input("\u{2018}a\u{2019} \u{201C}b\u{201D} \u{201E}c"),
            "'a' \"b\" \"c"
        );
        assert_eq!(sanitize_console_input("tail\u{2026}"), "tail...");
        assert_eq!(sanitize_console_input("plain input"), "plain input");
    }

    #[test]
    fn test_bare_commands() {
        assert_eq!(ConsoleCommand::parse("help").unwrap(), ConsoleCommand::Help);
        assert_eq!(ConsoleCommand::parse("clear").unwrap(), ConsoleCommand::Clear);
        assert_eq!(ConsoleCommand::parse("state").unwrap(), ConsoleCommand::State);
        assert_eq!(ConsoleCommand::parse("report").unwrap(), ConsoleCommand::Report);
        assert_eq!(ConsoleCommand::parse("back").unwrap(), ConsoleCommand::Back);
        assert_eq!(ConsoleCommand::parse("copy").unwrap(), ConsoleCommand::Copy);
    }

    #[test]
    fn test_command_word_is_case_insensitive() {
        assert_eq!(ConsoleCommand::parse("HELP").unwrap(), ConsoleCommand::Help);
        assert_eq!(
            ConsoleCommand::parse("Open 9").unwrap(),
            ConsoleCommand::Open { report_id: "9".to_string() }
        );
    }

    #[test]
    fn test_open_and_modal_take_a_report_id() {
        assert_eq!(
            ConsoleCommand::parse("open 42").unwrap(),
            ConsoleCommand::Open { report_id: "42".to_string() }
        );
        assert_eq!(
            ConsoleCommand::parse("modal 7").unwrap(),
            ConsoleCommand::Modal { report_id: "7".to_string() }
        );
        assert_eq!(
            ConsoleCommand::parse("open"),
            Err(DomainError::MissingArgument("reportID"))
        );
    }

    #[test]
    fn test_goto_parses_screen_names() {
        assert_eq!(
            ConsoleCommand::parse("goto settings").unwrap(),
            ConsoleCommand::Goto { screen: ScreenName::Settings }
        );
        assert_eq!(
            ConsoleCommand::parse("goto nowhere"),
            Err(DomainError::UnknownScreen("nowhere".to_string()))
        );
    }

    #[test]
    fn test_paths_may_contain_spaces() {
        assert_eq!(
            ConsoleCommand::parse("save my session.json").unwrap(),
            ConsoleCommand::Save { path: "my session.json".to_string() }
        );
        assert_eq!(
            ConsoleCommand::parse("export logs.csv").unwrap(),
            ConsoleCommand::Export { path: "logs.csv".to_string() }
        );
        assert_eq!(
            ConsoleCommand::parse("load"),
            Err(DomainError::MissingArgument("path"))
        );
    }

    #[test]
    fn test_sanitized_quotes_reach_the_parser() {
        // Smart quotes around an id are stripped to ASCII before splitting
        assert_eq!(
            ConsoleCommand::parse("open \u{2018}42\u{2019}").unwrap(),
            ConsoleCommand::Open { report_id: "'42'".to_string() }
        );
    }

    #[test]
    fn test_unknown_and_empty_input() {
        assert_eq!(
            ConsoleCommand::parse("frobnicate"),
            Err(DomainError::UnknownCommand("frobnicate".to_string()))
        );
        assert_eq!(ConsoleCommand::parse("   "), Err(DomainError::EmptyCommand));
    }

    #[test]
    fn test_log_ignore_patterns() {
        assert!(should_attach_log("session written to out.json"));
        assert!(!should_attach_log("store write for key: logs (3 entries)"));
    }
}
