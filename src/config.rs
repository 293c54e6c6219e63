//! Configuration for the call flows process
//!
//! Defaults, then an optional YAML file, then environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Names the optional YAML configuration file
pub const CONFIG_FILE_ENV: &str = "CALLFLOWS_CONFIG_FILE";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the settings document
    #[serde(default = "default_settings_dir")]
    pub settings_dir: PathBuf,

    /// File name (storage key) of the settings document
    #[serde(default = "default_settings_file_name")]
    pub settings_file_name: String,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON logs instead of pretty ones
    #[serde(default)]
    pub json_logs: bool,

    /// Write call flow events to the log; when off they are discarded
    #[serde(default = "default_log_events")]
    pub log_events: bool,
}

fn default_settings_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_settings_file_name() -> String {
    "callflows-settings.json".to_string()
}

fn default_log_events() -> bool {
    true
}

fn default_log_filter() -> String {
    "info,callflows=debug".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings_dir: default_settings_dir(),
            settings_file_name: default_settings_file_name(),
            log_filter: default_log_filter(),
            json_logs: false,
            log_events: default_log_events(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> AppResult<Self> {
        Self::load_with(|name| env::var(name).ok())
    }

    /// Load configuration using `lookup` to read variables
    pub fn load_with<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_FILE_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(dir) = lookup("CALLFLOWS_SETTINGS_DIR") {
            config.settings_dir = PathBuf::from(dir);
        }

        if let Some(file_name) = lookup("CALLFLOWS_SETTINGS_FILE") {
            config.settings_file_name = file_name;
        }

        if let Some(filter) = lookup("CALLFLOWS_LOG_FILTER") {
            config.log_filter = filter;
        }

        if let Some(json_logs) = lookup("CALLFLOWS_JSON_LOGS") {
            match parse_flag(&json_logs) {
                Some(value) => config.json_logs = value,
                None => warn!("Invalid CALLFLOWS_JSON_LOGS value: {}", json_logs),
            }
        }

        if let Some(log_events) = lookup("CALLFLOWS_LOG_EVENTS") {
            match parse_flag(&log_events) {
                Some(value) => config.log_events = value,
                None => warn!("Invalid CALLFLOWS_LOG_EVENTS value: {}", log_events),
            }
        }

        // Validate required fields
        if config.settings_file_name.trim().is_empty() {
            return Err(AppError::ConfigError(
                "Settings file name is required".to_string(),
            ));
        }

        info!("Loaded callflows configuration");
        Ok(config)
    }

    /// Read a YAML configuration file; missing keys take their defaults
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Full path of the settings document
    pub fn settings_path(&self) -> PathBuf {
        self.settings_dir.join(&self.settings_file_name)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_with(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.settings_path(),
            PathBuf::from("./data/callflows-settings.json")
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::load_with(lookup(&[
            ("CALLFLOWS_SETTINGS_DIR", "/var/lib/callflows"),
            ("CALLFLOWS_SETTINGS_FILE", "settings.json"),
            ("CALLFLOWS_LOG_FILTER", "warn"),
            ("CALLFLOWS_JSON_LOGS", "TRUE"),
            ("CALLFLOWS_LOG_EVENTS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.settings_dir, PathBuf::from("/var/lib/callflows"));
        assert_eq!(config.settings_file_name, "settings.json");
        assert_eq!(config.log_filter, "warn");
        assert!(config.json_logs);
        assert!(!config.log_events);
    }

    #[test]
    fn test_invalid_flags_are_ignored() {
        let config = AppConfig::load_with(lookup(&[
            ("CALLFLOWS_JSON_LOGS", "maybe"),
            ("CALLFLOWS_LOG_EVENTS", "sometimes"),
        ]))
        .unwrap();
        assert!(!config.json_logs);
        assert!(config.log_events);
    }

    #[test]
    fn test_blank_file_name_is_rejected() {
        let result = AppConfig::load_with(lookup(&[("CALLFLOWS_SETTINGS_FILE", "  ")]));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_yaml_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("callflows.yaml");
        std::fs::write(&path, "settings_dir: /srv/callflows\njson_logs: true\n").unwrap();

        let config = AppConfig::load_with(lookup(&[
            (CONFIG_FILE_ENV, path.to_str().unwrap()),
            ("CALLFLOWS_JSON_LOGS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.settings_dir, PathBuf::from("/srv/callflows"));
        assert_eq!(config.settings_file_name, "callflows-settings.json");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_unreadable_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "settings_dir: [unterminated").unwrap();

        let result = AppConfig::load_with(lookup(&[(CONFIG_FILE_ENV, path.to_str().unwrap())]));
        assert!(matches!(result, Err(AppError::ConfigFileError(_))));

        let missing = AppConfig::load_with(lookup(&[(CONFIG_FILE_ENV, "/nonexistent/callflows.yaml")]));
        assert!(matches!(missing, Err(AppError::Io(_))));
    }
}
