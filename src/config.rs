use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::booking::BookingPaths;
use crate::catalog::source::ContentSourceKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Booking flow path scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Entry path of the wizard; steps live at `{base_path}/{step}`
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Where "back" on the first step leads
    #[serde(default = "default_exit_path")]
    pub exit_path: String,
}

fn default_base_path() -> String {
    "/booking".to_string()
}

fn default_exit_path() -> String {
    "/".to_string()
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            exit_path: default_exit_path(),
        }
    }
}

/// Where doctor, department and service content comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: ContentSourceKind,
    /// Catalog document path (source = "file")
    #[serde(default)]
    pub path: Option<String>,
    /// Content API base URL (source = "http")
    #[serde(default)]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries after a failed content request (default: 3)
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> usize {
    3
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: ContentSourceKind::Embedded,
            path: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

/// REST API server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
}

fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    7010
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    pub enabled: bool,
    /// Seconds a toast stays on screen
    pub toast_ttl_secs: u64,
    /// Most toasts shown at once
    pub max_visible: usize,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            toast_ttl_secs: 4,
            max_visible: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub state: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: ".careflow".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            booking: BookingConfig::default(),
            catalog: CatalogConfig::default(),
            api: ApiConfig::default(),
            notifications: NotificationsConfig::default(),
            ui: UiConfig::default(),
            paths: PathsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Path to the project-local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".careflow/config.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so careflow works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // User config in ~/.config/careflow/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("careflow").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables, e.g. CAREFLOW__API__PORT=8080
        builder = builder.add_source(
            config::Environment::with_prefix("CAREFLOW")
                .separator("__")
                .try_parsing(true),
        );

        let config: Config = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        BookingPaths::from_config(&config.booking)
            .validate()
            .context("Invalid [booking] configuration")?;

        Ok(config)
    }

    /// Save config to .careflow/config.toml
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::local_config_path())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(config_path, toml_str).context("Failed to write config file")?;

        Ok(())
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.booking.base_path, "/booking");
        assert_eq!(config.booking.exit_path, "/");
        assert_eq!(config.catalog.source, ContentSourceKind::Embedded);
        assert_eq!(config.api.port, 7010);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_and_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("careflow.toml");

        let mut config = Config::default();
        config.api.port = 9090;
        config.booking.exit_path = "/home".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.api.port, 9090);
        assert_eq!(loaded.booking.exit_path, "/home");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("partial.toml");
        std::fs::write(&path, "[catalog]\nsource = \"file\"\npath = \"catalog.json\"\n").unwrap();

        let loaded = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.catalog.source, ContentSourceKind::File);
        assert_eq!(loaded.catalog.path.as_deref(), Some("catalog.json"));
        assert_eq!(loaded.catalog.max_retries, 3);
        assert_eq!(loaded.booking.base_path, "/booking");
    }

    #[test]
    fn test_rejects_exit_path_inside_flow() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("root.toml");
        std::fs::write(&path, "[booking]\nbase_path = \"/\"\nexit_path = \"/\"\n").unwrap();

        let err = Config::load(Some(path.to_str().unwrap())).unwrap_err();
        assert!(format!("{err:#}").contains("inside the booking flow"));
    }

    #[test]
    fn test_logs_path_under_state() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();
        assert!(config.logs_path().ends_with("logs"));
        assert!(config.logs_path().starts_with(temp_dir.path()));
    }
}
