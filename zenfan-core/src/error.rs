//! Error types for the ZenFan driver

use thiserror::Error;

/// Core error type for ZenFan operations
#[derive(Error, Debug)]
pub enum ZenFanError {
    /// Platform identity gate failure (wrong vendor or unlisted model)
    #[error("Unsupported platform: {0}")]
    Unsupported(String),

    /// Firmware call returned a non-success status
    #[error("Firmware call {method} failed: {status}")]
    Firmware { method: String, status: String },

    /// Host thermal framework refused registration
    #[error("Registration error: {0}")]
    Registration(String),

    /// Cooling device not found in the registry
    #[error("Cooling device not found: {0}")]
    DeviceNotFound(String),

    /// Parsing errors (firmware reply, sysfs content)
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ZenFan operations
pub type Result<T> = std::result::Result<T, ZenFanError>;

impl ZenFanError {
    /// Build a `Firmware` error for a failed call to `method`
    pub fn firmware(method: &str, status: impl Into<String>) -> Self {
        ZenFanError::Firmware {
            method: method.to_string(),
            status: status.into(),
        }
    }
}
