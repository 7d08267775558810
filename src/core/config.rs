use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

/// Display delays, all in milliseconds
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_login_redirect_ms")]
    pub login_redirect_ms: u64,
    #[serde(default = "default_register_redirect_ms")]
    pub register_redirect_ms: u64,
    #[serde(default = "default_guest_redirect_ms")]
    pub guest_redirect_ms: u64,
    #[serde(default = "default_already_logged_in_redirect_ms")]
    pub already_logged_in_redirect_ms: u64,
    #[serde(default = "default_terms_redirect_ms")]
    pub terms_redirect_ms: u64,
    #[serde(default = "default_terms_missing_redirect_ms")]
    pub terms_missing_redirect_ms: u64,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_reserved_usernames")]
    pub reserved_usernames: Vec<String>,
    #[serde(default = "default_availability_latency_ms")]
    pub availability_latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("pixel-gate.store")
}

fn default_login_redirect_ms() -> u64 {
    2000
}

fn default_register_redirect_ms() -> u64 {
    2500
}

fn default_guest_redirect_ms() -> u64 {
    1500
}

fn default_already_logged_in_redirect_ms() -> u64 {
    1500
}

fn default_terms_redirect_ms() -> u64 {
    500
}

fn default_terms_missing_redirect_ms() -> u64 {
    2000
}

fn default_toast_duration_ms() -> u64 {
    3000
}

fn default_reserved_usernames() -> Vec<String> {
    ["admin", "player", "test", "user"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_availability_latency_ms() -> u64 {
    800
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

fn default_console() -> bool {
    false
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            login_redirect_ms: default_login_redirect_ms(),
            register_redirect_ms: default_register_redirect_ms(),
            guest_redirect_ms: default_guest_redirect_ms(),
            already_logged_in_redirect_ms: default_already_logged_in_redirect_ms(),
            terms_redirect_ms: default_terms_redirect_ms(),
            terms_missing_redirect_ms: default_terms_missing_redirect_ms(),
            toast_duration_ms: default_toast_duration_ms(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reserved_usernames: default_reserved_usernames(),
            availability_latency_ms: default_availability_latency_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ValidationConfig {
    pub fn availability_latency(&self) -> Duration {
        Duration::from_millis(self.availability_latency_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api.base_url)
            .context(format!("Invalid api.base_url '{}'", self.api.base_url))?;

        if !matches!(base.scheme(), "http" | "https") {
            bail!(
                "api.base_url must use http or https, got '{}'",
                base.scheme()
            );
        }

        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be greater than 0");
        }

        if self.storage.path.as_os_str().is_empty() {
            bail!("storage.path must not be empty");
        }

        if self.ui.toast_duration_ms == 0 {
            bail!("ui.toast_duration_ms must be greater than 0");
        }

        if self
            .validation
            .reserved_usernames
            .iter()
            .any(|name| name.trim().is_empty())
        {
            bail!("validation.reserved_usernames must not contain empty names");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
