//! Service configuration: optional JSON file, then environment overrides.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "JIRA_PEOPLE_CONFIG";
pub const BIND_ADDRESS_ENV: &str = "JIRA_PEOPLE_BIND";
pub const BASE_URL_ENV: &str = "ZOHO_PEOPLE_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "ZOHO_PEOPLE_API_TIMEOUT_SECS";

/// Default listen address for the webhook endpoint.
fn default_bind_address() -> String {
    "127.0.0.1:7071".to_string()
}

/// Default People API host.
fn default_people_base_url() -> String {
    people_api::config::DEFAULT_API_BASE.to_string()
}

/// Default upper bound for one call to the People API.
fn default_request_timeout_secs() -> u64 {
    30
}

/// Represents the service configuration: where to listen, which People host to call and how long to wait for it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_people_base_url")]
    pub people_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            people_base_url: default_people_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Reads `JIRA_PEOPLE_CONFIG` if set, then applies the environment overrides.
    pub fn from_env() -> Self {
        let path = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let config = path.as_deref().map(Self::load).unwrap_or_default();
        config.with_overrides(|key| env::var(key).ok())
    }

    /// Loads config from disk, falling back to defaults on read/parse errors.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                log::warn!("Ignoring unreadable config {}: {}", path.display(), err);
                Config::default()
            }),
            Err(err) => {
                log::warn!("Config file {} not loaded: {}", path.display(), err);
                Config::default()
            }
        }
    }

    /// Applies non-blank values from `lookup`; an unparsable timeout keeps the current value.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(bind_address) = value(BIND_ADDRESS_ENV) {
            self.bind_address = bind_address;
        }
        if let Some(base_url) = value(BASE_URL_ENV) {
            self.people_base_url = base_url;
        }
        if let Some(raw) = value(TIMEOUT_ENV) {
            match raw.parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => log::warn!("Ignoring invalid {}={}", TIMEOUT_ENV, raw),
            }
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
