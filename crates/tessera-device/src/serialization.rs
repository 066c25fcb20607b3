//! JSON helpers for device metadata
//!
//! Devices serialize as their canonical string, so anything embedding a
//! [`Device`](crate::Device) round-trips through these helpers with all
//! invariants re-checked on the way in.

use serde::{Deserialize, Serialize};

/// Unified error type for serialization operations
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(String),
}

/// Standard Result type for serialization operations
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serialize any serde-compatible type to a JSON string
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| SerializationError::Json(e.to_string()))
}

/// Serialize to indented JSON, for metadata files meant to be read by people
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| SerializationError::Json(e.to_string()))
}

/// Deserialize a JSON string to any serde-compatible type
pub fn from_json<T: for<'de> Deserialize<'de>>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| SerializationError::Json(e.to_string()))
}
