//! zenfan-acpi
//!
//! Firmware-facing crate: the low-level `acpi_call` bridge and the
//! `ZenbookFan` cooling state machine built on it. Used by the daemon to
//! expose the fan as a cooling device.
//
//! Public API:
//! - `fan::ZenbookFan` — the fan as a `CoolingDevice`
//! - `acpi_call::AcpiBridge` — firmware method-call abstraction
//! - `acpi_call::AcpiCallBridge` — concrete bridge over `/proc/acpi/call`

pub mod acpi_call;
pub mod fan;

pub use acpi_call::{AcpiBridge, AcpiCallBridge};
pub use fan::ZenbookFan;
