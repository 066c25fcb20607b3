//! Device kinds: the class of hardware a computation runs on

use crate::errors::DeviceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class of hardware a device belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Host processor; a single-ordinal address space
    Cpu,
    /// CUDA-capable accelerator
    Cuda,
}

impl DeviceKind {
    /// Every kind, in declaration order
    pub const ALL: [DeviceKind; 2] = [DeviceKind::Cpu, DeviceKind::Cuda];

    /// Canonical lowercase name used in device strings
    pub const fn name(self) -> &'static str {
        match self {
            DeviceKind::Cpu => "cpu",
            DeviceKind::Cuda => "cuda",
        }
    }

    /// Look up a kind by its exact, case-sensitive name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// True for [`DeviceKind::Cpu`]
    pub const fn is_cpu(self) -> bool {
        matches!(self, DeviceKind::Cpu)
    }

    /// True for [`DeviceKind::Cuda`]
    pub const fn is_cuda(self) -> bool {
        matches!(self, DeviceKind::Cuda)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeviceKind {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
            .ok_or_else(|| DeviceError::parse(s, format!("unknown device kind '{s}'")))
    }
}
