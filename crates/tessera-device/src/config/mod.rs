//! Runtime device configuration
//!
//! Layered loading: defaults, then a TOML or JSON file, then `TESSERA_*`
//! environment overrides, then validation.

pub mod traits;

pub use traits::{DeviceConfig, TesseraConfig, ENV_ALLOW_CUDA, ENV_DEVICE};
