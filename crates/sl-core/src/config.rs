//! Configuration management
//!
//! Settings are resolved in the following order:
//! 1. Environment variables
//! 2. safelink.toml configuration file
//! 3. Default values
//!
//! Inside the configuration file, `${VAR_NAME}` expands to the value of the
//! named environment variable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// Contact API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base resource URL of the contact API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Contacts per page requested from the server
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// User interface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// How long a notification stays on screen, in milliseconds
    #[serde(default = "default_notify_duration_ms")]
    pub notify_duration_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            notify_duration_ms: default_notify_duration_ms(),
        }
    }
}

/// Main configuration for SafeLink
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Contact API settings
    #[serde(default)]
    pub api: ApiSettings,

    /// User interface settings
    #[serde(default)]
    pub ui: UiSettings,
}

fn default_base_url() -> String {
    "http://localhost:8080/contacts".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_notify_duration_ms() -> u64 {
    1500
}

impl Config {
    /// Expand `${VAR_NAME}` references to environment variable values.
    ///
    /// Unknown variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // consume '{'

                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file.
    ///
    /// `${VAR_NAME}` references in the file are expanded before parsing, and
    /// environment variables override whatever the file sets.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        tracing::debug!("Loading configuration from {}", path.display());

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded_content = Self::expand_env_vars(&toml_content);

        let config: TomlConfig = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        let mut cfg = Self::from_toml_config(config);
        cfg.apply_env_overrides();

        Ok(cfg)
    }

    /// Load configuration from the default locations.
    ///
    /// Tries `./safelink.toml` first, then falls back to environment
    /// variables only.
    pub fn load() -> crate::Result<Self> {
        if Path::new("safelink.toml").exists() {
            return Self::from_toml_file("safelink.toml");
        }

        Ok(Self::from_env())
    }

    /// Build a Config from the parsed TOML structure
    fn from_toml_config(toml: TomlConfig) -> Self {
        let api = toml.api.unwrap_or_default();
        let api_settings = ApiSettings {
            base_url: api.base_url.unwrap_or_else(default_base_url),
            page_size: api.page_size.unwrap_or_else(default_page_size),
            timeout_secs: api.timeout_secs.unwrap_or_else(default_timeout_secs),
        };

        let ui = toml.ui.unwrap_or_default();
        let ui_settings = UiSettings {
            notify_duration_ms: ui
                .notify_duration_ms
                .unwrap_or_else(default_notify_duration_ms),
        };

        Config {
            api: api_settings,
            ui: ui_settings,
        }
    }

    /// Override settings from environment variables
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SAFELINK_API_URL") {
            if !url.is_empty() {
                self.api.base_url = url;
            }
        }
        if let Ok(size) = std::env::var("SAFELINK_PAGE_SIZE") {
            if let Ok(s) = size.parse() {
                self.api.page_size = s;
            }
        }
        if let Ok(secs) = std::env::var("SAFELINK_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.api.timeout_secs = s;
            }
        }
        if let Ok(ms) = std::env::var("SAFELINK_NOTIFY_DURATION_MS") {
            if let Ok(m) = ms.parse() {
                self.ui.notify_duration_ms = m;
            }
        }
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut cfg = Config::default();
        cfg.apply_env_overrides();
        cfg
    }
}

// ============================================================================
// TOML structure definitions (file parsing)
// ============================================================================

/// Top-level structure of safelink.toml
#[derive(Debug, Deserialize)]
struct TomlConfig {
    /// Contact API settings
    api: Option<TomlApiSettings>,
    /// User interface settings
    ui: Option<TomlUiSettings>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlApiSettings {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    page_size: Option<u32>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlUiSettings {
    #[serde(default)]
    notify_duration_ms: Option<u64>,
}
