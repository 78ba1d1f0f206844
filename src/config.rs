//! Configuration management for Trialboard
//!
//! Parses TOML configuration files and provides typed access to settings.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Upper bound for manager request timeouts, in seconds
pub const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 300;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub manager: ManagerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Experiment manager REST endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManagerConfig {
    /// REST API root, e.g. `http://localhost:8080/api/v1/nni`
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_request_timeout")]
    request_timeout_seconds: u64,
}

impl ManagerConfig {
    /// Create a manager configuration
    ///
    /// Not validated; call [`Config::validate`] on the enclosing config.
    pub fn new(base_url: impl Into<String>, request_timeout_seconds: u64) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_seconds,
        }
    }

    /// Get the REST API root, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Get the per-request timeout in seconds
    pub fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1/nni".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        let config: Self =
            toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            })?;

        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist
    ///
    /// A file that exists but cannot be parsed or validated is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                path = %path.as_ref().display(),
                "Config file not found, using defaults"
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration after parsing
    ///
    /// This is called automatically by `from_file()`, but can also be called
    /// explicitly when constructing Config via other means (e.g., in tests).
    pub fn validate(&self) -> AppResult<()> {
        let base_url = &self.manager.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "manager.base_url '{}' must start with 'http://' or 'https://'",
                base_url
            )));
        }

        let timeout = self.manager.request_timeout_seconds;
        if timeout == 0 {
            return Err(AppError::Config(
                "manager.request_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if timeout > MAX_REQUEST_TIMEOUT_SECONDS {
            return Err(AppError::Config(format!(
                "manager.request_timeout_seconds cannot exceed {} seconds, got {}",
                MAX_REQUEST_TIMEOUT_SECONDS, timeout
            )));
        }

        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(AppError::Config(format!(
                "observability.log_level '{}' is not one of: {}",
                self.observability.log_level,
                LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CONFIG: &str = r#"
[manager]
base_url = "http://10.0.0.5:8080/api/v1/nni/"
request_timeout_seconds = 10

[observability]
log_level = "debug"
"#;

    #[test]
    fn test_config_from_str_parses_successfully() {
        let config = Config::from_str(TEST_CONFIG).expect("should parse config");
        assert_eq!(config.manager.base_url(), "http://10.0.0.5:8080/api/v1/nni");
        assert_eq!(config.manager.request_timeout_seconds(), 10);
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_config_empty_uses_defaults() {
        let config = Config::from_str("").expect("empty config should be valid");
        assert_eq!(config.manager.base_url(), "http://localhost:8080/api/v1/nni");
        assert_eq!(config.manager.request_timeout_seconds(), 30);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_config_default_is_valid() {
        Config::default().validate().expect("defaults should validate");
    }

    #[test]
    fn test_config_validation_missing_protocol_fails() {
        let result = Config::from_str("[manager]\nbase_url = \"localhost:8080\"\n");
        let err = result.expect_err("should reject base_url without protocol");
        assert!(err.to_string().contains("must start with"));
    }

    #[test]
    fn test_config_validation_zero_timeout_fails() {
        let result = Config::from_str("[manager]\nrequest_timeout_seconds = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation_excessive_timeout_fails() {
        let result = Config::from_str("[manager]\nrequest_timeout_seconds = 301\n");
        let err = result.expect_err("should reject timeout over limit");
        assert!(err.to_string().contains("cannot exceed 300"));
    }

    #[test]
    fn test_config_validation_boundary_timeout_succeeds() {
        assert!(Config::from_str("[manager]\nrequest_timeout_seconds = 300\n").is_ok());
        assert!(Config::from_str("[manager]\nrequest_timeout_seconds = 1\n").is_ok());
    }

    #[test]
    fn test_config_validation_unknown_log_level_fails() {
        let result = Config::from_str("[observability]\nlog_level = \"verbose\"\n");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_config_parse_error_is_reported() {
        let result = Config::from_str("[manager\n");
        assert!(matches!(result, Err(AppError::ConfigParseFailed { .. })));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/trialboard.toml")
            .expect("missing file should fall back to defaults");
        assert_eq!(config.manager.request_timeout_seconds(), 30);
    }
}
