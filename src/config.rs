//! App Configuration
//!
//! Read once at startup from compile-time environment variables
//! (`KANBAN_API_URL`, `KANBAN_STORE`, `KANBAN_LOG_LEVEL`).

use log::LevelFilter;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TOAST_MS: u32 = 3000;

/// Where todos are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreMode {
    /// REST API at `api_url`
    #[default]
    Remote,
    /// Process memory, lost on reload
    Memory,
}

impl StoreMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "remote" => Some(StoreMode::Remote),
            "memory" => Some(StoreMode::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub store: StoreMode,
    pub log_level: LevelFilter,
    /// How long a toast stays visible
    pub toast_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            store: StoreMode::default(),
            log_level: LevelFilter::Info,
            toast_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("KANBAN_API_URL"),
            option_env!("KANBAN_STORE"),
            option_env!("KANBAN_LOG_LEVEL"),
        )
    }

    /// Unset, blank or unrecognised values fall back to defaults
    pub fn from_values(api_url: Option<&str>, store: Option<&str>, log_level: Option<&str>) -> Self {
        let defaults = Self::default();
        let api_url = api_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .unwrap_or(defaults.api_url);
        let store = store.and_then(StoreMode::parse).unwrap_or(defaults.store);
        let log_level = log_level
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(defaults.log_level);
        Self {
            api_url,
            store,
            log_level,
            toast_ms: defaults.toast_ms,
        }
    }
}
