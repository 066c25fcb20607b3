//! Device value types
//!
//! - [`DeviceKind`]: hardware class
//! - [`Backend`]: hardware class plus tensor layout
//! - [`Device`]: kind plus ordinal, the dispatch key

pub mod backend;
pub mod device;
pub mod kind;

pub use backend::Backend;
pub use device::Device;
pub use kind::DeviceKind;
