//! Backends: device kinds refined by storage layout
//!
//! A backend names the hardware kind plus the tensor layout (dense or sparse)
//! a kernel is written for. Only dense and sparse CPU/CUDA backends resolve to a
//! [`DeviceKind`]; everything else is rejected when building a `Device`.

use super::kind::DeviceKind;
use crate::errors::{DeviceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dispatch backend, as seen by the operator registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    /// Dense CPU tensors
    Cpu,
    /// Dense CUDA tensors
    Cuda,
    /// Sparse CPU tensors
    SparseCpu,
    /// Sparse CUDA tensors
    SparseCuda,
    /// No backend selected
    Undefined,
}

impl Backend {
    /// Every backend, in declaration order
    pub const ALL: [Backend; 5] = [
        Backend::Cpu,
        Backend::Cuda,
        Backend::SparseCpu,
        Backend::SparseCuda,
        Backend::Undefined,
    ];

    /// Hardware kind this backend runs on, if any
    pub const fn device_kind(self) -> Option<DeviceKind> {
        match self {
            Backend::Cpu | Backend::SparseCpu => Some(DeviceKind::Cpu),
            Backend::Cuda | Backend::SparseCuda => Some(DeviceKind::Cuda),
            Backend::Undefined => None,
        }
    }

    /// Resolve the device kind or fail with `UnsupportedBackend`
    pub fn try_device_kind(self) -> Result<DeviceKind> {
        self.device_kind().ok_or_else(|| {
            tracing::debug!(backend = %self, "backend has no device kind");
            DeviceError::unsupported_backend(self.name())
        })
    }

    /// True for the sparse layouts
    pub const fn is_sparse(self) -> bool {
        matches!(self, Backend::SparseCpu | Backend::SparseCuda)
    }

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Cpu => "CPU",
            Backend::Cuda => "CUDA",
            Backend::SparseCpu => "SparseCPU",
            Backend::SparseCuda => "SparseCUDA",
            Backend::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
