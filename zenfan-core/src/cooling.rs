//! Cooling-device contract
//!
//! The three-operation ops table the host thermal framework drives. The
//! framework owns call scheduling; implementations must provide their own
//! mutual exclusion since no serialization guarantee exists in userspace.

use async_trait::async_trait;

use crate::error::Result;

/// Generic cooling-device operations, as exposed to the host framework.
///
/// State encoding: `[0, MAX_FAN_STATE]` is a manual fan level passed to
/// firmware unvalidated; `FAN_STATE_AUTO` (256) returns the device to
/// automatic firmware control.
#[async_trait]
pub trait CoolingDevice: Send + Sync {
    /// Maximum representable manual level (constant per device)
    fn max_state(&self) -> u64;

    /// Current cooling state.
    ///
    /// Under a manual override this is the last requested level, served from
    /// cache; the hardware cannot report while overridden.
    async fn cur_state(&self) -> Result<u64>;

    /// Request a cooling state. Firmware failures surface to the caller
    /// unchanged; no retry is attempted.
    async fn set_cur_state(&self, state: u64) -> Result<()>;
}
