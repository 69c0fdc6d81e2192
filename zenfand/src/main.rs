//! ZenFan Daemon
//!
//! Exposes an ASUS Zenbook's cooling fan as a generic cooling device.
//!
//! On startup the daemon reads the machine identity from DMI and runs the
//! platform gate; on anything but a listed Zenbook it exits without ever
//! registering a device. On a supported machine it builds the ACPI firmware
//! bridge, registers the fan, and serves until SIGINT/SIGTERM, at which
//! point the fan is returned to automatic firmware control before the
//! registration is released.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use zenfan_acpi::acpi_call::DEFAULT_ACPI_CALL_PATH;
use zenfan_acpi::{AcpiCallBridge, ZenbookFan};
use zenfan_core::check_support;
use zenfand::thermal::CoolingRegistry;
use zenfand::{dmi, shutdown};

/// Name the fan is registered under, as host-side tooling expects it
const FAN_DEVICE_NAME: &str = "Fan";

/// ZenFan cooling-device daemon
#[derive(Parser, Debug)]
#[command(name = "zenfand")]
#[command(version, about = "ASUS Zenbook fan cooling-device daemon", long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the acpi_call interface file
    #[arg(long, default_value = DEFAULT_ACPI_CALL_PATH)]
    acpi_path: PathBuf,

    /// Path to the DMI id directory
    #[arg(long, default_value = dmi::DMI_ID_PATH)]
    dmi_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.verbose);

    info!("zenfand starting...");

    // Step 1: platform identity gate, run once before anything registers
    let identity = dmi::read_identity_from(&args.dmi_path)?;
    info!("platform: {} / {}", identity.vendor, identity.model);

    let capabilities = match check_support(&identity) {
        Ok(caps) => caps,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!(
        "model supported (secondary graphics fan: {})",
        capabilities.has_gfx_fan
    );

    // Step 2: firmware bridge and cooling state machine
    let bridge = Arc::new(AcpiCallBridge::with_path(&args.acpi_path));
    info!("firmware bridge: {}", bridge.path().display());
    let fan = Arc::new(ZenbookFan::new(bridge, capabilities));

    // Step 3: register with the cooling-device registry
    let registry = CoolingRegistry::new();
    let handle = registry.register(FAN_DEVICE_NAME, fan.clone()).await?;
    info!("cooling device '{}' registered", handle.name());

    // Land in a known state; a failure here is logged, not fatal
    if let Err(e) = fan.set_auto().await {
        warn!("initial return-to-auto failed: {}", e);
    }

    info!("zenfand ready");

    // Step 4: serve until told to stop, then hand control back to firmware
    shutdown_signal().await;
    shutdown::release_cooling_device(&registry, handle).await;

    info!("zenfand shutdown complete");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
