//! ACPI method-call bridge
//!
//! Low-level access to platform firmware through the `acpi_call` kernel
//! interface: a command of the form `\PATH.METHOD 0xA 0xB` is written to
//! `/proc/acpi/call` and the NUL-terminated reply is read back from the
//! same file.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, error};
use zenfan_core::{Result, ZenFanError};

/// Default path of the `acpi_call` interface file
pub const DEFAULT_ACPI_CALL_PATH: &str = "/proc/acpi/call";

/// Trait for firmware method evaluation
///
/// Mirrors the ACPI calling convention: evaluate a fully-qualified namespace
/// method with an ordered list of integer arguments, get back one integer.
/// Enables testing of `ZenbookFan` without real firmware.
#[async_trait]
pub trait AcpiBridge: Send + Sync {
    /// Evaluate `method` with `args`, returning the reported integer value
    async fn evaluate(&self, method: &str, args: &[u64]) -> Result<u64>;
}

/// Bridge implementation over the `acpi_call` interface file
pub struct AcpiCallBridge {
    path: PathBuf,
}

impl AcpiCallBridge {
    /// Create a bridge using the default `/proc/acpi/call` path
    pub fn new() -> Self {
        Self::with_path(DEFAULT_ACPI_CALL_PATH)
    }

    /// Create a bridge using a custom interface path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the interface file this bridge writes to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for AcpiCallBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AcpiBridge for AcpiCallBridge {
    async fn evaluate(&self, method: &str, args: &[u64]) -> Result<u64> {
        let command = format_command(method, args);
        debug!("TX: {:?}", command);

        tokio::fs::write(&self.path, command.as_bytes())
            .await
            .map_err(|e| {
                error!("Failed to write {}: {}", self.path.display(), e);
                ZenFanError::Io(e)
            })?;

        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            error!("Failed to read {}: {}", self.path.display(), e);
            ZenFanError::Io(e)
        })?;
        debug!("RX: {:?}", raw);

        parse_reply(method, &raw)
    }
}

/// Build an `acpi_call` command line: the method path followed by each
/// argument in hex.
pub fn format_command(method: &str, args: &[u64]) -> String {
    let mut command = method.to_string();
    for arg in args {
        // write! to String is infallible
        let _ = write!(command, " 0x{:x}", arg);
    }
    command
}

/// Parse an `acpi_call` reply.
///
/// Integer results come back as `0x…`; a failed evaluation comes back as
/// `Error: AE_…`, which is surfaced verbatim as a firmware error. Buffer and
/// package results are not produced by the methods this driver evaluates.
pub fn parse_reply(method: &str, raw: &str) -> Result<u64> {
    let reply = raw.trim_end_matches('\0').trim();

    if let Some(status) = reply.strip_prefix("Error:") {
        return Err(ZenFanError::firmware(method, status.trim()));
    }
    if reply == "not called" {
        return Err(ZenFanError::firmware(method, "not called"));
    }
    if let Some(hex) = reply.strip_prefix("0x") {
        return u64::from_str_radix(hex, 16).map_err(|e| {
            ZenFanError::Parse(format!("Invalid integer reply '{}': {}", reply, e))
        });
    }

    Err(ZenFanError::Parse(format!(
        "Unexpected reply from {}: '{}'",
        method, reply
    )))
}
