//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `ventlink.toml` unless another path is given. Every section
//! except `[registers]` has defaults; the register map describes the unit's
//! firmware and must be supplied for commands that talk to the unit.
//! Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use ventlink_adapter_lan::{ConnectionConfig, DiscoveryConfig, RegisterMap, RegisterMapError};
use ventlink_domain::address::DEFAULT_PORT;

/// Default configuration file name.
pub const DEFAULT_PATH: &str = "ventlink.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unit address settings.
    pub device: DeviceConfig,
    /// TCP timeouts.
    pub connection: ConnectionConfig,
    /// Broadcast discovery settings.
    pub discovery: DiscoveryConfig,
    /// Where each property lives on the unit.
    pub registers: Option<RegisterMap>,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Preference file settings.
    pub preferences: PreferencesConfig,
}

/// Unit address configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Fixed host; when set, discovery and the stored preference are skipped.
    pub host: Option<String>,
    /// TCP port of the register protocol.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Preference store configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// JSON file holding the user's chosen unit address.
    pub path: PathBuf,
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or the result
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("VENTLINK_HOST") {
            let val = val.trim();
            self.device.host = (!val.is_empty()).then(|| val.to_string());
        }
        if let Some(val) = var("VENTLINK_PORT") {
            if let Ok(port) = val.parse() {
                self.device.port = port;
            }
        }
        if let Some(val) = var("VENTLINK_PREFERENCES") {
            self.preferences.path = PathBuf::from(val);
        }
        if let Some(val) = var("VENTLINK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.device.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.connection.connect_timeout_ms == 0 || self.connection.read_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "connection timeouts must be non-zero".to_string(),
            ));
        }
        if self.discovery.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "discovery timeout must be non-zero".to_string(),
            ));
        }
        if let Some(registers) = &self.registers {
            registers.validate()?;
        }
        Ok(())
    }

    /// The configured register map.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRegisters`] when no `[registers]`
    /// section was given. Only device commands need one.
    pub fn register_map(&self) -> Result<&RegisterMap, ConfigError> {
        self.registers.as_ref().ok_or(ConfigError::MissingRegisters)
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "ventlink=info,ventlink_app=info,ventlink_adapter_lan=warn".to_string(),
        }
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ventlink-preferences.json"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// No register map was configured.
    #[error("missing [registers] section")]
    MissingRegisters,
    /// The register map does not fit the response frame.
    #[error("invalid register map")]
    Registers(#[from] RegisterMapError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
