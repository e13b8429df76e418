//! Client configuration
//!
//! One TOML-backed configuration struct covering the API collaborator, the
//! credential storage location and logging. Environment variables override
//! the file so scripted usage never needs to edit it.

use crate::error::{ErrorContext, JobportError, JobportResult};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Auth/portal API collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the REST API is reachable at, including the `/api` prefix
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string sent with every request
    pub user_agent: String,
}

/// Persisted client storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the two credential slots (token + user record)
    pub credentials_dir: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8080/api".to_string(),
                timeout_seconds: 30,
                user_agent: format!("jobport/{}", env!("CARGO_PKG_VERSION")),
            },
            storage: StorageConfig {
                credentials_dir: "~/.jobport/credentials".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> JobportResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| JobportError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: ClientConfig = toml::from_str(&content).map_err(|e| JobportError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> JobportResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| JobportError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| JobportError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Apply `JOBPORT_*` environment overrides on top of the loaded values
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("JOBPORT_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(dir) = std::env::var("JOBPORT_CREDENTIALS_DIR") {
            self.storage.credentials_dir = dir;
        }
        if let Ok(level) = std::env::var("JOBPORT_LOG") {
            self.logging.level = level;
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> JobportResult<()> {
        if self.api.base_url.is_empty() {
            return Err(JobportError::Config {
                message: "api.base_url must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set api.base_url to the portal API root"),
            });
        }

        if self.api.timeout_seconds == 0 {
            return Err(JobportError::Config {
                message: "api.timeout_seconds must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set api.timeout_seconds to a positive value"),
            });
        }

        if self.storage.credentials_dir.is_empty() {
            return Err(JobportError::Config {
                message: "storage.credentials_dir must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set storage.credentials_dir to a writable directory"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = ClientConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        config.save_to_file(&path).unwrap();
        let loaded = ClientConfig::from_file(&path).unwrap();
        assert_eq!(loaded.api.base_url, config.api.base_url);
        assert_eq!(loaded.storage.credentials_dir, config.storage.credentials_dir);
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = ClientConfig::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_base_url() {
        let mut config = ClientConfig::default();
        config.api.base_url.clear();
        assert!(config.validate().is_err());
    }
}
