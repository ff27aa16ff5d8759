//! Board Configuration

use std::time::Duration;

use log::LevelFilter;

/// How long a notification stays visible.
pub const NOTICE_TIMEOUT: Duration = Duration::from_millis(5000);

const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Origin the activities API is served from, without a trailing slash
    pub api_base: String,
    pub notice_timeout: Duration,
    pub log_level: LevelFilter,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            notice_timeout: NOTICE_TIMEOUT,
            log_level: LevelFilter::Info,
        }
    }
}

impl BoardConfig {
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Config for the page the app is mounted in: the API shares the page origin.
    pub fn from_window() -> Self {
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        match origin {
            Some(origin) => Self::default().with_api_base(origin),
            None => Self::default(),
        }
    }
}
