//! ZenFan Core Library
//!
//! Shared types, the platform identity gate, and the cooling-device contract
//! for the ZenFan driver. This crate performs no I/O; the firmware bridge
//! lives in `zenfan-acpi` and the lifecycle glue in `zenfand`.

pub mod cooling;
pub mod error;
pub mod platform;
pub mod types;

// Re-export commonly used types
pub use cooling::CoolingDevice;
pub use error::*;
pub use platform::{check_support, Capabilities, DeviceIdentity, SYSTEM_VENDOR};
pub use types::*;
