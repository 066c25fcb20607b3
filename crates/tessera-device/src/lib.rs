//! Tessera Device - compute-device identity
//!
//! This crate provides the value type the Tessera runtime uses to name where a
//! tensor lives and where an operation runs. A [`Device`] is a hardware
//! [`DeviceKind`] plus an optional ordinal; it is validated at construction,
//! compared structurally, and rendered in a canonical string form that parses
//! back to the same value.
//!
//! # String format
//! ```text
//! ("cpu" | "cuda") (":" <decimal digits>)?
//! ```
//! `cpu`, `cpu:0`, `cuda` and `cuda:3` are valid. Case, whitespace, signs and
//! other kind names are rejected.
//!
//! # Invariants
//! - the index is `-1` (unspecified) or non-negative
//! - a CPU device has index `-1` or `0`
//!
//! Both are enforced by every constructor, by [`Device::parse`], by
//! [`Device::set_index`] and by deserialization.
//!
//! ```
//! use tessera_device::{Backend, Device, DeviceKind};
//!
//! let gpu: Device = "cuda:1".parse()?;
//! assert_eq!(gpu, Device::from_backend(Backend::SparseCuda, 1)?);
//! assert_eq!(gpu.to_string(), "cuda:1");
//! assert_ne!(Device::cpu(), Device::new(DeviceKind::Cpu, 0)?);
//! # Ok::<(), tessera_device::DeviceError>(())
//! ```

#![allow(missing_docs)]
#![forbid(unsafe_code)]

/// Device kinds, backends and device descriptors
pub mod types;

/// Error taxonomy
pub mod errors;

/// Layered runtime device configuration
pub mod config;

/// JSON helpers for device metadata
pub mod serialization;

// === Public API Re-exports ===

pub use config::{DeviceConfig, TesseraConfig};
pub use errors::{ConfigError, DeviceError, Result};
pub use types::{Backend, Device, DeviceKind};
