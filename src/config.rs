//! Configuration handling for the funnel

use crate::lead::{DEFAULT_PIXEL_ENDPOINT, DEFAULT_TIMEOUT};
use crate::state::{AgeRangeSet, FormOptions};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default lead capture endpoint
const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/submit-lead";

/// Default landing page URL reported with each lead
const DEFAULT_PAGE_URL: &str = "http://127.0.0.1:3000/";

/// Environment variable overriding the endpoint
const ENDPOINT_ENV: &str = "LEAD_FUNNEL_ENDPOINT";

/// Environment variable enabling the conversion pixel
const PIXEL_ID_ENV: &str = "LEAD_FUNNEL_PIXEL_ID";

/// Operator configuration for the funnel
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FunnelConfig {
    /// Lead capture endpoint (`POST`, JSON)
    pub endpoint_url: Option<String>,
    /// Landing page URL sent as `pageUrl`
    pub page_url: Option<String>,
    /// Value sent as `userAgent`
    pub user_agent: Option<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Age bucket set offered on the second step
    pub age_ranges: Option<AgeRangeSet>,
    /// Advance automatically after a complete ZIP
    pub auto_advance_zip: Option<bool>,
    /// Advance automatically after an age selection
    pub auto_advance_age: Option<bool>,
    /// Delay before an automatic advance, in milliseconds
    pub auto_advance_delay_ms: Option<u64>,
    /// Conversion pixel id; tracking is off when unset
    pub pixel_id: Option<String>,
    /// Conversion pixel collection endpoint
    pub pixel_endpoint: Option<String>,
}

impl FunnelConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "leadfunnel", "lead-funnel-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "leadfunnel", "lead-funnel-tui")
            .map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        config.apply_overrides(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(PIXEL_ID_ENV).ok(),
        );
        Ok(config)
    }

    fn apply_overrides(&mut self, endpoint: Option<String>, pixel_id: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|v| !v.is_empty()) {
            self.endpoint_url = Some(endpoint);
        }
        if let Some(pixel_id) = pixel_id.filter(|v| !v.is_empty()) {
            self.pixel_id = Some(pixel_id);
        }
    }

    pub fn endpoint_url_or_default(&self) -> &str {
        self.endpoint_url.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }

    pub fn pixel_endpoint_or_default(&self) -> &str {
        self.pixel_endpoint.as_deref().unwrap_or(DEFAULT_PIXEL_ENDPOINT)
    }

    /// Form behaviour derived from this configuration
    pub fn form_options(&self) -> FormOptions {
        let defaults = FormOptions::default();
        FormOptions {
            age_ranges: self.age_ranges.unwrap_or(defaults.age_ranges),
            auto_advance_zip: self.auto_advance_zip.unwrap_or(defaults.auto_advance_zip),
            auto_advance_age: self.auto_advance_age.unwrap_or(defaults.auto_advance_age),
            auto_advance_delay: self
                .auto_advance_delay_ms
                .map_or(defaults.auto_advance_delay, Duration::from_millis),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            page_url: self
                .page_url
                .clone()
                .unwrap_or_else(|| DEFAULT_PAGE_URL.to_string()),
        }
    }
}
