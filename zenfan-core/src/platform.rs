//! Platform identity gate
//!
//! Decides, once at startup, whether the driver applies to the running
//! machine. The vendor string must match exactly and the product name must
//! appear in the compiled-in allow-list; anything else fails the gate and
//! the driver never registers a cooling device.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ZenFanError};

/// Vendor string this driver is willing to touch
pub const SYSTEM_VENDOR: &str = "ASUSTeK COMPUTER INC.";

/// Zenbook models with a single (CPU) fan
const SINGLE_FAN_MODELS: &[&str] = &[
    "UX21", "UX21A", "UX31A", "UX31E", "UX32A", "UX42VS", "UX301LA",
];

/// Zenbook models with a secondary graphics fan
const DUAL_FAN_MODELS: &[&str] = &["UX32VD", "UX52VS", "UX500VZ", "NX500"];

/// System identity as reported by the platform's DMI tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// DMI system vendor string
    pub vendor: String,
    /// DMI product name string
    pub model: String,
}

impl DeviceIdentity {
    pub fn new(vendor: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            model: model.into(),
        }
    }
}

/// Hardware capabilities of a supported model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Whether the model carries a secondary graphics fan
    pub has_gfx_fan: bool,
}

/// Check whether the running machine is supported.
///
/// The vendor comparison is case-sensitive and exact. The model must match
/// the allow-list exactly; an unlisted model is rejected with a diagnostic
/// naming it, rather than being silently assumed to be a single-fan machine.
pub fn check_support(identity: &DeviceIdentity) -> Result<Capabilities> {
    if identity.vendor != SYSTEM_VENDOR {
        return Err(ZenFanError::Unsupported(format!(
            "vendor '{}' is not '{}'",
            identity.vendor, SYSTEM_VENDOR
        )));
    }

    let model = identity.model.as_str();
    if SINGLE_FAN_MODELS.contains(&model) {
        Ok(Capabilities { has_gfx_fan: false })
    } else if DUAL_FAN_MODELS.contains(&model) {
        Ok(Capabilities { has_gfx_fan: true })
    } else {
        warn!("product name '{}' unknown, aborting", model);
        Err(ZenFanError::Unsupported(format!(
            "unknown product name '{}'",
            model
        )))
    }
}
