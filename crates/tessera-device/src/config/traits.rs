//! Configuration traits and the runtime device configuration

use crate::errors::ConfigError;
use crate::types::Device;
use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::path::Path;

/// Environment variable holding the default device string
pub const ENV_DEVICE: &str = "TESSERA_DEVICE";
/// Environment variable toggling CUDA placement
pub const ENV_ALLOW_CUDA: &str = "TESSERA_ALLOW_CUDA";

/// Core trait for Tessera configuration types
pub trait TesseraConfig: Clone + Default + Send + Sync + 'static {
    /// Error type for configuration operations
    type Error: From<ConfigError>;

    /// Get default configuration values
    fn defaults() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> Result<Self, Self::Error>;

    /// Merge with environment variables
    fn merge_with_env(&mut self) -> Result<(), Self::Error>;

    /// Merge with another configuration
    fn merge_with(&mut self, other: &Self) -> Result<(), Self::Error>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), Self::Error>;

    /// Set a configuration value from a string (for CLI parsing)
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Where tensors land when the caller does not name a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Device used when none is given explicitly
    pub default_device: Device,
    /// Whether CUDA devices may be selected at all
    pub allow_cuda: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            default_device: Device::cpu(),
            allow_cuda: true,
        }
    }
}

impl DeviceConfig {
    /// Defaults, then the optional file, then the environment, then validation
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::defaults(),
        };
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TESSERA_*` overrides from an explicit key/value source
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            let field = match key {
                ENV_DEVICE => "device",
                ENV_ALLOW_CUDA => "allow_cuda",
                _ => continue,
            };
            if let Err(err) = self.set_from_string(field, value) {
                tracing::warn!(
                    variable = key,
                    value,
                    error = %err,
                    "invalid environment override"
                );
                return Err(err);
            }
            tracing::debug!(variable = key, value, "applied environment override");
        }
        Ok(())
    }
}

/// Map one environment lookup to an optional override
fn env_override(
    key: &str,
    lookup: std::result::Result<String, VarError>,
) -> Result<Option<String>, ConfigError> {
    match lookup {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => {
            tracing::warn!(variable = key, "environment override is not valid UTF-8");
            Err(ConfigError::invalid(format!("{key} is not valid UTF-8")))
        }
    }
}

impl TesseraConfig for DeviceConfig {
    type Error = ConfigError;

    fn load_from_file(path: &Path) -> Result<Self, Self::Error> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| ConfigError::invalid(format!("Invalid TOML: {e}")))?,
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ConfigError::invalid(format!("Invalid JSON: {e}")))?,
            other => return Err(ConfigError::Format(other.unwrap_or("<none>").to_string())),
        };

        tracing::debug!(
            path = %path.display(),
            device = %config.default_device,
            "loaded device config"
        );
        Ok(config)
    }

    fn merge_with_env(&mut self) -> Result<(), Self::Error> {
        let mut overrides = Vec::new();
        for key in [ENV_DEVICE, ENV_ALLOW_CUDA] {
            if let Some(value) = env_override(key, std::env::var(key))? {
                overrides.push((key, value));
            }
        }
        self.merge_with_vars(overrides)
    }

    fn merge_with(&mut self, other: &Self) -> Result<(), Self::Error> {
        // Merge non-default values from other config
        let defaults = Self::default();
        if other.default_device != defaults.default_device {
            self.default_device = other.default_device;
        }
        if other.allow_cuda != defaults.allow_cuda {
            self.allow_cuda = other.allow_cuda;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), Self::Error> {
        if self.default_device.is_cuda() && !self.allow_cuda {
            return Err(ConfigError::invalid(format!(
                "default device {} requires CUDA, but allow_cuda is false",
                self.default_device
            )));
        }
        Ok(())
    }

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        match key {
            "device" | "default-device" | "default_device" => {
                self.default_device = Device::parse(value)?;
            }
            "allow-cuda" | "allow_cuda" => {
                self.allow_cuda = value.parse().map_err(|_| {
                    ConfigError::invalid(format!("Invalid boolean for {key}: {value}"))
                })?;
            }
            _ => {
                return Err(ConfigError::invalid(format!(
                    "Unknown configuration key: {key}"
                )))
            }
        }
        Ok(())
    }
}
