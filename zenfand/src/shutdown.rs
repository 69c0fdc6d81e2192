//! Shutdown handling for graceful daemon termination
//!
//! The fan must never be left under a stale manual override when the daemon
//! goes away: firmware only resumes thermal management once it is handed
//! control back explicitly.

use std::sync::Arc;

use tracing::{info, warn};
use zenfan_core::{CoolingDevice, FAN_STATE_AUTO};

use crate::thermal::{CoolingHandle, CoolingRegistry};

/// Return the fan to automatic control and release its registration
///
/// The auto write is issued regardless of the current mode; a firmware
/// failure at this point is logged but does not block the release, since
/// there is nothing left to retry with.
pub async fn release_cooling_device(registry: &CoolingRegistry, handle: CoolingHandle) {
    if let Some(device) = registry.get(&handle).await {
        restore_auto(&device).await;
    } else {
        warn!("cooling device '{}' already gone", handle.name());
    }

    match registry.unregister(handle).await {
        Ok(_) => info!("cooling device unregistered"),
        Err(e) => warn!("unregister failed: {}", e),
    }
}

/// Issue the final return-to-auto write
pub async fn restore_auto(device: &Arc<dyn CoolingDevice>) {
    info!("returning fan to automatic control");
    if let Err(e) = device.set_cur_state(FAN_STATE_AUTO).await {
        warn!("failed to restore automatic fan control: {}", e);
    }
}
