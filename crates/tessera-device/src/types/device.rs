//! Device descriptors
//!
//! A [`Device`] names a compute target: a [`DeviceKind`] plus an optional
//! ordinal. The ordinal `-1` means "unspecified, use the current device"; any
//! non-negative value picks a concrete device of that kind. Two invariants hold
//! for every live value:
//!
//! 1. `index == -1 || index >= 0`
//! 2. a CPU device has index `-1` or `0`
//!
//! Equality is structural on `(kind, index)`. `cpu` and `cpu:0` are different
//! values even though both denote the host.

use super::backend::Backend;
use super::kind::DeviceKind;
use crate::errors::{DeviceError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Compute device a tensor lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Device {
    kind: DeviceKind,
    index: i32,
}

impl Device {
    /// Sentinel index for "the current device"
    pub const UNSPECIFIED_INDEX: i32 = -1;

    /// Create a device, validating the index against the kind
    pub fn new(kind: DeviceKind, index: i32) -> Result<Self> {
        validate(kind, index)?;
        Ok(Self { kind, index })
    }

    /// Create a device of the given kind with an unspecified index
    pub const fn with_kind(kind: DeviceKind) -> Self {
        Self {
            kind,
            index: Self::UNSPECIFIED_INDEX,
        }
    }

    /// Create a device from a backend, resolving it to its device kind first
    pub fn from_backend(backend: Backend, index: i32) -> Result<Self> {
        Self::new(backend.try_device_kind()?, index)
    }

    /// The host CPU with an unspecified index
    pub const fn cpu() -> Self {
        Self::with_kind(DeviceKind::Cpu)
    }

    /// A CUDA device with the given ordinal (`-1` for the current one)
    pub fn cuda(index: i32) -> Result<Self> {
        Self::new(DeviceKind::Cuda, index)
    }

    /// Parse `(cpu|cuda)(:<digits>)?`
    ///
    /// The grammar is exact: no surrounding whitespace, no sign, no alternate
    /// kind spellings. A well-formed string still goes through [`Device::new`],
    /// so `"cpu:1"` fails with `InvalidCpuIndex` rather than a parse error.
    pub fn parse(text: &str) -> Result<Self> {
        let (kind_name, index_text) = match text.split_once(':') {
            Some((kind_name, index_text)) => (kind_name, Some(index_text)),
            None => (text, None),
        };

        let kind = DeviceKind::from_name(kind_name).ok_or_else(|| {
            tracing::debug!(input = text, "rejected device string: unknown kind");
            DeviceError::parse(text, format!("unknown device kind '{kind_name}'"))
        })?;

        let index = match index_text {
            None => Self::UNSPECIFIED_INDEX,
            Some(digits) => parse_index(text, digits)?,
        };

        Self::new(kind, index)
    }

    /// Rebind the ordinal of this device
    ///
    /// Both invariants are re-checked against the existing kind, so a CPU
    /// device cannot be moved to ordinal 1 this way. On error the device is
    /// left untouched.
    pub fn set_index(&mut self, index: i32) -> Result<()> {
        validate(self.kind, index)?;
        self.index = index;
        Ok(())
    }

    /// The hardware kind
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// The ordinal, or `-1` when unspecified
    pub fn index(&self) -> i32 {
        self.index
    }

    /// True when a concrete ordinal was given
    pub fn has_index(&self) -> bool {
        self.index != Self::UNSPECIFIED_INDEX
    }

    /// True for the host CPU
    pub fn is_cpu(&self) -> bool {
        self.kind.is_cpu()
    }

    /// True for a CUDA accelerator
    pub fn is_cuda(&self) -> bool {
        self.kind.is_cuda()
    }
}

fn validate(kind: DeviceKind, index: i32) -> Result<()> {
    if index < Device::UNSPECIFIED_INDEX {
        tracing::debug!(%kind, index, "rejected device index below -1");
        return Err(DeviceError::invalid_index(index));
    }
    if kind.is_cpu() && index > 0 {
        tracing::debug!(index, "rejected positive CPU device index");
        return Err(DeviceError::invalid_cpu_index(index));
    }
    Ok(())
}

fn parse_index(input: &str, digits: &str) -> Result<i32> {
    if digits.is_empty() {
        tracing::debug!(input, "rejected device string: empty index");
        return Err(DeviceError::parse(input, "missing device index after ':'"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        tracing::debug!(input, "rejected device string: non-digit index");
        return Err(DeviceError::parse(
            input,
            format!("device index '{digits}' is not a decimal number"),
        ));
    }
    digits.parse::<i32>().map_err(|_| {
        tracing::debug!(input, "rejected device string: index overflow");
        DeviceError::parse(input, format!("device index '{digits}' is out of range"))
    })
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_index() {
            write!(f, "{}:{}", self.kind, self.index)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl FromStr for Device {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Device {
    type Error = DeviceError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

// Serialized as the canonical string so deserialization re-runs validation.
impl Serialize for Device {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Device {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Device::parse(&text).map_err(serde::de::Error::custom)
    }
}
