//! Zenbook cooling state machine
//!
//! Maps the generic cooling-device contract onto the two firmware entry
//! points the Zenbook EC exposes: a fan-state read and a per-channel fan
//! level write.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use zenfan_core::{
    Capabilities, CoolingDevice, FanState, Result, AUTO_FAN_CHANNEL, CPU_FAN_CHANNEL,
    FAN_STATE_AUTO, MAX_FAN_STATE,
};

use crate::acpi_call::AcpiBridge;

/// Firmware method reporting the current fan state. Fixed entry point on the
/// target hardware; must not change.
pub const READ_FAN_METHOD: &str = "\\_TZ.RFAN";

/// Firmware method setting a fan channel to a level. Fixed entry point on
/// the target hardware; must not change.
pub const WRITE_FAN_METHOD: &str = "\\_SB.PCI0.LPCB.EC0.SFNV";

/// Zenbook fan as a cooling device
///
/// Holds the manual-override cache behind a mutex: the host framework gives
/// no serialization guarantee in userspace, and the cache update and the
/// firmware call must not interleave across concurrent `set_cur_state`
/// calls.
pub struct ZenbookFan {
    bridge: Arc<dyn AcpiBridge>,
    state: Mutex<FanState>,
    has_gfx_fan: bool,
}

impl ZenbookFan {
    /// Create a fan for a gated platform, initially under automatic control
    pub fn new(bridge: Arc<dyn AcpiBridge>, capabilities: Capabilities) -> Self {
        Self {
            bridge,
            state: Mutex::new(FanState::default()),
            has_gfx_fan: capabilities.has_gfx_fan,
        }
    }

    /// Whether the gated model carries a secondary graphics fan
    pub fn has_gfx_fan(&self) -> bool {
        self.has_gfx_fan
    }

    /// Snapshot of the in-memory control state
    pub async fn cached_state(&self) -> FanState {
        *self.state.lock().await
    }

    /// Read the fan state reported by firmware
    pub async fn read_fan_state(&self) -> Result<u64> {
        self.bridge.evaluate(READ_FAN_METHOD, &[0]).await
    }

    /// Write a fan level to a firmware channel. The level is passed through
    /// verbatim; range checking is the caller's responsibility.
    pub async fn write_fan_state(&self, channel: u32, level: u32) -> Result<()> {
        self.bridge
            .evaluate(WRITE_FAN_METHOD, &[channel as u64, level as u64])
            .await
            .map(|_| ())
    }

    /// Hand the fan back to automatic firmware control
    pub async fn set_auto(&self) -> Result<()> {
        self.write_fan_state(AUTO_FAN_CHANNEL, 0).await
    }
}

#[async_trait]
impl CoolingDevice for ZenbookFan {
    fn max_state(&self) -> u64 {
        MAX_FAN_STATE
    }

    async fn cur_state(&self) -> Result<u64> {
        let state = self.state.lock().await;
        // fan does not report during a manual override - serve the cache
        if state.manual {
            return Ok(state.requested);
        }
        drop(state);

        self.read_fan_state().await
    }

    async fn set_cur_state(&self, requested: u64) -> Result<()> {
        let mut state = self.state.lock().await;

        // Cache caller intent before the firmware call so `cur_state` stays
        // consistent even when the write fails.
        state.requested = requested;

        if requested == FAN_STATE_AUTO {
            debug!("returning fan to automatic control");
            state.manual = false;
            self.set_auto().await
        } else {
            debug!("manual fan level requested: {}", requested);
            state.manual = true;
            self.write_fan_state(CPU_FAN_CHANNEL, requested as u32).await
        }
    }
}
