use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Parameter bag passed to a destination route.
pub type RouteParams = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenName {
    BottomTab,
    #[serde(rename = "CentralPaneNavigator")]
    CentralPane,
    #[serde(rename = "RightModalNavigator")]
    RightModal,
    Home,
    Report,
    Settings,
}

impl ScreenName {
    pub const ALL: [ScreenName; 6] = [
        ScreenName::BottomTab,
        ScreenName::CentralPane,
        ScreenName::RightModal,
        ScreenName::Home,
        ScreenName::Report,
        ScreenName::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenName::BottomTab => "BottomTab",
            ScreenName::CentralPane => "CentralPaneNavigator",
            ScreenName::RightModal => "RightModalNavigator",
            ScreenName::Home => "Home",
            ScreenName::Report => "Report",
            ScreenName::Settings => "Settings",
        }
    }

    pub fn is_navigator(&self) -> bool {
        matches!(
            self,
            ScreenName::BottomTab | ScreenName::CentralPane | ScreenName::RightModal
        )
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScreenName::ALL
            .iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| DomainError::UnknownScreen(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: ScreenName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<RouteParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Box<NavigationState>>,
}

impl Route {
    pub fn screen(name: ScreenName) -> Self {
        Self {
            name,
            key: None,
            params: None,
            state: None,
        }
    }

    pub fn with_params(name: ScreenName, params: RouteParams) -> Self {
        Self {
            params: Some(params),
            ..Self::screen(name)
        }
    }

    pub fn with_state(name: ScreenName, state: NavigationState) -> Self {
        Self {
            state: Some(Box::new(state)),
            ..Self::screen(name)
        }
    }

    pub fn report(report_id: &str) -> Self {
        Self::with_params(ScreenName::Report, report_params(report_id))
    }

    /// The route's `reportID` parameter, when present and non-empty.
    pub fn report_id(&self) -> Option<&str> {
        self.params
            .as_ref()
            .and_then(|params| params.get("reportID"))
            .and_then(|value| value.as_str())
            .filter(|id| !id.is_empty())
    }
}

pub fn report_params(report_id: &str) -> RouteParams {
    let mut params = RouteParams::new();
    params.insert(
        "reportID".to_string(),
        serde_json::Value::String(report_id.to_string()),
    );
    params
}

/// A tree of routes. Order is stack order: the last route is topmost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub stale: bool,
    pub routes: Vec<Route>,
}

impl NavigationState {
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self {
            index: 0,
            stale: false,
            routes,
        }
    }

    pub fn active_route(&self) -> Option<&Route> {
        self.routes.get(self.index)
    }

    pub fn top_route(&self) -> Option<&Route> {
        self.routes.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Result,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => f.write_str("INFO"),
            LogLevel::Result => f.write_str("RESULT"),
            LogLevel::Error => f.write_str("ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            level,
            message: message.into(),
        }
    }

    pub fn to_line(&self) -> String {
        format!("{} [{}] {}", self.time.format("%H:%M:%S"), self.level, self.message)
    }
}
