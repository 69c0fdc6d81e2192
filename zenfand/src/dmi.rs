//! Platform identity source
//!
//! Reads the system vendor and product name from the kernel's DMI sysfs
//! tree. Both fields are static for the lifetime of the machine; they are
//! read once, before any registration happens.

use std::path::Path;

use zenfan_core::{DeviceIdentity, Result, ZenFanError};

/// Default DMI id directory exposed by the kernel
pub const DMI_ID_PATH: &str = "/sys/class/dmi/id";

/// Read the machine identity from a DMI id directory
pub fn read_identity_from(root: &Path) -> Result<DeviceIdentity> {
    let vendor = read_field(root, "sys_vendor")?;
    let model = read_field(root, "product_name")?;
    Ok(DeviceIdentity::new(vendor, model))
}

fn read_field(root: &Path, name: &str) -> Result<String> {
    let path = root.join(name);
    let raw = std::fs::read_to_string(&path)?;
    let value = raw.trim();
    if value.is_empty() {
        return Err(ZenFanError::Parse(format!(
            "DMI field {} is empty",
            path.display()
        )));
    }
    Ok(value.to_string())
}
