//! Core types and constants for the ZenFan driver

/// Maximum manual fan level advertised to the host framework
pub const MAX_FAN_STATE: u64 = 0xFF;

/// Sentinel written by host-side tooling to return the fan to automatic
/// firmware control. Sits one past the advertised maximum (0x100 == 256);
/// this encoding is relied upon by existing integrations and must not change.
pub const FAN_STATE_AUTO: u64 = 0x100;

/// Firmware fan channel written for a manual CPU-fan level
pub const CPU_FAN_CHANNEL: u32 = 1;

/// Firmware fan channel (with level 0) that hands control back to firmware
pub const AUTO_FAN_CHANNEL: u32 = 0;

/// In-memory fan control state.
///
/// `requested` always reflects the most recent caller-supplied value, even
/// when the matching firmware write failed; `cur_state` serves it back while
/// `manual` is set, because the hardware cannot report its level during a
/// manual override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanState {
    /// Last level requested through `set_cur_state`
    pub requested: u64,
    /// True iff the last request carried a non-AUTO level
    pub manual: bool,
}

impl Default for FanState {
    fn default() -> Self {
        Self {
            requested: FAN_STATE_AUTO,
            manual: false,
        }
    }
}
