use crate::domain::{LogEntry, NavigationState};
use serde::{Deserialize, Serialize};
use std::fs;

/// Everything worth restoring between runs: the navigation tree and the
/// captured console logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub nav_state: NavigationState,
    pub logs: Vec<LogEntry>,
}

pub struct SessionRepository;

impl SessionRepository {
    pub fn save_session(session: &Session, filename: &str) -> Result<String, String> {
        match serde_json::to_string_pretty(session) {
            Ok(json) => {
                match fs::write(filename, &json) {
                    Ok(_) => Ok(filename.to_string()),
                    Err(e) => Err(e.to_string()),
                }
            }
            Err(e) => Err(format!("Serialization failed: {}", e)),
        }
    }

    pub fn load_session(filename: &str) -> Result<(Session, String), String> {
        match fs::read_to_string(filename) {
            Ok(content) => {
                match serde_json::from_str::<Session>(&content) {
                    Ok(session) => Ok((session, filename.to_string())),
                    Err(e) => Err(format!("Invalid file format - {}", e)),
                }
            }
            Err(e) => Err(e.to_string()),
        }
    }
}

pub struct LogExporter;

impl LogExporter {
    pub fn export_csv(logs: &[LogEntry], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;
        writer
            .write_record(["time", "level", "message"])
            .map_err(|e| e.to_string())?;
        for entry in logs {
            writer
                .write_record([
                    entry.time.to_rfc3339(),
                    entry.level.to_string(),
                    entry.message.clone(),
                ])
                .map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogLevel, Route, ScreenName};
    use tempfile::tempdir;

    #[test]
    fn test_session_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let path = path.to_str().unwrap();

        let session = Session {
            nav_state: NavigationState::from_routes(vec![
                Route::screen(ScreenName::Home),
                Route::report("42"),
            ]),
            logs: vec![LogEntry::new(LogLevel::Info, "hello")],
        };

        let saved = SessionRepository::save_session(&session, path).unwrap();
        assert_eq!(saved, path);

        let (loaded, _) = SessionRepository::load_session(path).unwrap();
        assert_eq!(loaded.nav_state, session.nav_state);
        assert_eq!(loaded.logs.len(), 1);
        assert_eq!(loaded.logs[0].message, "hello");
    }

    #[test]
    fn test_load_rejects_malformed_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();

        let result = SessionRepository::load_session(path.to_str().unwrap());
        assert!(result.is_err());
    }

    #[test]
    fn test_export_writes_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs.csv");
        let path = path.to_str().unwrap();

        let logs = vec![
            LogEntry::new(LogLevel::Info, "> open 42"),
            LogEntry::new(LogLevel::Result, "opened report 42"),
        ];

        LogExporter::export_csv(&logs, path).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("time,level,message"));
        assert!(content.contains("opened report 42"));
        assert!(content.contains("RESULT"));
    }
}
