//! Service configuration loaded from environment variables.

use std::time::Duration;

use crate::api::sheets::DEFAULT_BASE_URL;
use crate::services::cache_service::DEFAULT_TTL;

pub const DEFAULT_RANGE: &str = "Sheet1!A1:E4";
pub const DEFAULT_PORT: u16 = 8000;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Service account key file contents (JSON).
    pub service_account_json: String,
    /// Spreadsheet to read. Empty means every fetch fails.
    pub sheet_id: String,
    /// A1-notation range to read.
    pub sheet_range: String,
    /// How long a fetched snapshot is served before refetching.
    pub cache_ttl: Duration,
    /// Sheets API base URL.
    pub sheets_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            service_account_json: lookup("GOOGLE_SERVICE_ACCOUNT")
                .unwrap_or(defaults.service_account_json),
            sheet_id: lookup("GOOGLE_SHEET_ID").unwrap_or(defaults.sheet_id),
            sheet_range: lookup("SHEET_RANGE")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.sheet_range),
            cache_ttl: lookup("CACHE_TTL_MS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.cache_ttl),
            sheets_base_url: lookup("SHEETS_API_BASE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.sheets_base_url),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            service_account_json: "{}".to_string(),
            sheet_id: String::new(),
            sheet_range: DEFAULT_RANGE.to_string(),
            cache_ttl: DEFAULT_TTL,
            sheets_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
