//! Configuration management
//!
//! Settings live in `settings.json` inside the wardrobe directory:
//! ```json
//! {
//!   "api": {
//!     "baseUrl": "http://localhost:8080",
//!     "staticPath": "/uploads/",
//!     "timeoutSecs": null,
//!     "clearSessionOnUnauthorized": false
//!   },
//!   "defaultCity": "Paris"
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_STATIC_PATH: &str = "/uploads/";
pub const DEFAULT_CITY: &str = "Paris";

/// Environment variable overriding `api.baseUrl`
pub const API_URL_ENV: &str = "WARDROBE_API_URL";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: RawApiSettings,
    #[serde(default)]
    default_city: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawApiSettings {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    static_path: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    clear_session_on_unauthorized: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// What the HTTP client does when the backend answers 401
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnauthorizedPolicy {
    /// Log the failure and hand it to the caller
    #[default]
    Report,
    /// Also remove the stored session
    ClearSession,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub static_path: String,
    /// `None` keeps the transport default
    pub timeout: Option<Duration>,
    pub unauthorized_policy: UnauthorizedPolicy,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            static_path: DEFAULT_STATIC_PATH.to_string(),
            timeout: None,
            unauthorized_policy: UnauthorizedPolicy::Report,
        }
    }
}

impl ApiSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Wardrobe configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiSettings,
    pub default_city: String,
    /// Base URL came from the environment and must not be written back
    base_url_from_env: bool,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_raw(SettingsFile::default(), None)
    }
}

impl Config {
    /// Load config from the wardrobe directory
    ///
    /// The base URL can be overridden with `WARDROBE_API_URL`.
    pub fn load(wardrobe_dir: &Path) -> Result<Self> {
        let settings_path = wardrobe_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).map_err(|e| {
                Error::Config(format!("{}: {}", settings_path.display(), e))
            })?
        } else {
            SettingsFile::default()
        };

        let env_url = std::env::var(API_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        Ok(Self::from_raw(raw, env_url))
    }

    fn from_raw(raw: SettingsFile, env_url: Option<String>) -> Self {
        let base_url_from_env = env_url.is_some();
        let base_url = env_url
            .or_else(|| raw.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let api = ApiSettings {
            base_url,
            static_path: raw
                .api
                .static_path
                .clone()
                .unwrap_or_else(|| DEFAULT_STATIC_PATH.to_string()),
            timeout: raw.api.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
            unauthorized_policy: if raw.api.clear_session_on_unauthorized {
                UnauthorizedPolicy::ClearSession
            } else {
                UnauthorizedPolicy::Report
            },
        };

        Self {
            api,
            default_city: raw
                .default_city
                .clone()
                .unwrap_or_else(|| DEFAULT_CITY.to_string()),
            base_url_from_env,
            _raw_settings: raw,
        }
    }

    /// Save config to the wardrobe directory
    /// Preserves other settings that the CLI doesn't manage
    pub fn save(&self, wardrobe_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(wardrobe_dir)?;
        let settings_path = wardrobe_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            self._raw_settings.clone()
        };

        if !self.base_url_from_env {
            settings.api.base_url = Some(self.api.base_url.clone());
        }
        settings.api.static_path = Some(self.api.static_path.clone());
        settings.api.timeout_secs = self.api.timeout.map(|t| t.as_secs());
        settings.api.clear_session_on_unauthorized =
            self.api.unauthorized_policy == UnauthorizedPolicy::ClearSession;
        settings.default_city = Some(self.default_city.clone());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Update a setting by its settings.json key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.baseUrl" => {
                url::Url::parse(value)
                    .map_err(|e| Error::Config(format!("Invalid URL '{}': {}", value, e)))?;
                self.api.base_url = value.to_string();
                self.base_url_from_env = false;
            }
            "api.staticPath" => self.api.static_path = value.to_string(),
            "api.timeoutSecs" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout '{}'", value)))?;
                self.api.timeout = (secs > 0).then(|| Duration::from_secs(secs));
            }
            "api.clearSessionOnUnauthorized" => {
                let enabled = match value {
                    "true" | "1" | "yes" | "on" => true,
                    "false" | "0" | "no" | "off" => false,
                    _ => return Err(Error::Config(format!("Expected true/false, got '{}'", value))),
                };
                self.api.unauthorized_policy = if enabled {
                    UnauthorizedPolicy::ClearSession
                } else {
                    UnauthorizedPolicy::Report
                };
            }
            "defaultCity" => self.default_city = value.to_string(),
            _ => {
                return Err(Error::Config(format!(
                    "Unknown setting '{}'. Available: api.baseUrl, api.staticPath, api.timeoutSecs, api.clearSessionOnUnauthorized, defaultCity",
                    key
                )))
            }
        }
        Ok(())
    }

    /// Key/value view for display
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("api.baseUrl", self.api.base_url.clone()),
            ("api.staticPath", self.api.static_path.clone()),
            (
                "api.timeoutSecs",
                self.api
                    .timeout
                    .map(|t| t.as_secs().to_string())
                    .unwrap_or_else(|| "default".to_string()),
            ),
            (
                "api.clearSessionOnUnauthorized",
                (self.api.unauthorized_policy == UnauthorizedPolicy::ClearSession).to_string(),
            ),
            ("defaultCity", self.default_city.clone()),
        ]
    }
}
