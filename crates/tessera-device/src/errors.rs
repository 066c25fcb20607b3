//! Error taxonomy for device descriptors
//!
//! Every failure is raised at the point of construction, parsing or mutation.
//! No partially built `Device` is ever observable. Configuration loading has
//! its own `ConfigError`, which wraps `DeviceError` for rejected device strings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Errors produced while constructing, parsing or mutating a device descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DeviceError {
    /// Index below the `-1` sentinel
    #[error("Device index must be -1 or non-negative, got {index}")]
    InvalidIndex {
        /// The rejected index
        index: i32,
    },

    /// CPU device given an ordinal other than `-1` or `0`
    #[error("CPU device index must be -1 or zero, got {index}")]
    InvalidCpuIndex {
        /// The rejected index
        index: i32,
    },

    /// Backend with no corresponding device kind
    #[error("Invalid backend {backend} for Device construction")]
    UnsupportedBackend {
        /// Display name of the rejected backend
        backend: String,
    },

    /// Device string does not match `(cpu|cuda)(:<index>)?`
    #[error("Invalid device string '{input}': {reason}")]
    Parse {
        /// The offending input, verbatim
        input: String,
        /// What went wrong
        reason: String,
    },
}

impl DeviceError {
    /// Create an invalid index error
    pub fn invalid_index(index: i32) -> Self {
        Self::InvalidIndex { index }
    }

    /// Create an invalid CPU index error
    pub fn invalid_cpu_index(index: i32) -> Self {
        Self::InvalidCpuIndex { index }
    }

    /// Create an unsupported backend error
    pub fn unsupported_backend(backend: impl Into<String>) -> Self {
        Self::UnsupportedBackend {
            backend: backend.into(),
        }
    }

    /// Create a parse error carrying the offending input
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// True for grammar violations, as opposed to invariant violations
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Standard Result type for device operations
pub type Result<T> = std::result::Result<T, DeviceError>;

/// Errors produced while loading or validating runtime device configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {}: {}", .path.display(), .source)]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Config file extension is not `.toml` or `.json`
    #[error("Unsupported config format: {0}")]
    Format(String),

    /// Config content or a config value is invalid
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// A device string in the configuration was rejected
    #[error(transparent)]
    Device(#[from] DeviceError),
}

impl ConfigError {
    /// Create an invalid configuration error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}
