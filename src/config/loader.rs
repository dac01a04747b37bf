use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::theme::{palette_named, PALETTES};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// `~/.config/counterdeck/config.toml` on Unix/macOS, or the platform
    /// equivalent from `dirs::config_dir()`. Falls back to the current
    /// directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("counterdeck").join("config.toml")
    }

    /// Load from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`. A missing file yields `Config::default()`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks:
    /// - base_url is an http(s) URL
    /// - timeouts and tick period are non-zero
    /// - the configured theme exists
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.gateway.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(validation(format!(
                "gateway.base_url must start with http:// or https://, got '{}'",
                self.gateway.base_url
            )));
        }

        if self.gateway.timeout_seconds == 0 || self.gateway.connect_timeout_seconds == 0 {
            return Err(validation("gateway timeouts must be greater than zero"));
        }

        if self.effects.tick_ms == 0 {
            return Err(validation("effects.tick_ms must be greater than zero"));
        }

        if self.ui.frame_ms == 0 {
            return Err(validation("ui.frame_ms must be greater than zero"));
        }

        if let Some(theme) = &self.ui.theme {
            if palette_named(theme).is_none() {
                let known: Vec<_> = PALETTES.iter().map(|p| p.name).collect();
                return Err(validation(format!(
                    "Unknown theme '{}'. Available themes: {}",
                    theme,
                    known.join(", ")
                )));
            }
        }

        Ok(())
    }
}

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}
