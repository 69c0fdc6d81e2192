//! Cooling-device registry
//!
//! The host-framework side of the cooling-device contract: devices are
//! registered under a name and handed back an opaque handle, which is the
//! only way to reach or release them afterwards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use zenfan_core::{CoolingDevice, Result, ZenFanError};

/// Opaque registration token for a cooling device
///
/// A correlation token, not a data dependency: holders pass it back to the
/// registry but never look inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoolingHandle {
    id: u64,
    name: String,
}

impl CoolingHandle {
    /// Name the device was registered under
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Registry managing registered cooling devices
///
/// Thread-safe container with lookup by handle. Registration fails on a
/// duplicate device name.
pub struct CoolingRegistry {
    devices: RwLock<HashMap<u64, (String, Arc<dyn CoolingDevice>)>>,
    next_id: AtomicU64,
}

impl CoolingRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a cooling device under `name`
    ///
    /// Returns an opaque handle; registering a second device under an
    /// already-used name is refused.
    pub async fn register(
        &self,
        name: &str,
        device: Arc<dyn CoolingDevice>,
    ) -> Result<CoolingHandle> {
        let mut devices = self.devices.write().await;

        if devices.values().any(|(n, _)| n == name) {
            return Err(ZenFanError::Registration(format!(
                "duplicate device name: {}",
                name
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        devices.insert(id, (name.to_string(), device));
        Ok(CoolingHandle {
            id,
            name: name.to_string(),
        })
    }

    /// Release a registration, returning the device that was registered
    pub async fn unregister(&self, handle: CoolingHandle) -> Result<Arc<dyn CoolingDevice>> {
        let mut devices = self.devices.write().await;
        devices
            .remove(&handle.id)
            .map(|(_, device)| device)
            .ok_or(ZenFanError::DeviceNotFound(handle.name))
    }

    /// Look up a registered device by handle
    pub async fn get(&self, handle: &CoolingHandle) -> Option<Arc<dyn CoolingDevice>> {
        let devices = self.devices.read().await;
        devices.get(&handle.id).map(|(_, device)| device.clone())
    }

    /// Names of all registered devices
    pub async fn list(&self) -> Vec<String> {
        let devices = self.devices.read().await;
        devices.values().map(|(name, _)| name.clone()).collect()
    }
}

impl Default for CoolingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Minimal cooling device for registry tests
    struct StubDevice;

    #[async_trait]
    impl CoolingDevice for StubDevice {
        fn max_state(&self) -> u64 {
            0xFF
        }

        async fn cur_state(&self) -> Result<u64> {
            Ok(0)
        }

        async fn set_cur_state(&self, _state: u64) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_registry_new_is_empty() {
        let registry = CoolingRegistry::new();
        assert!(registry.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_register_and_get() {
        let registry = CoolingRegistry::new();
        let handle = registry.register("Fan", Arc::new(StubDevice)).await.unwrap();

        assert_eq!(handle.name(), "Fan");
        assert!(registry.get(&handle).await.is_some());
        assert_eq!(registry.list().await, vec!["Fan".to_string()]);
    }

    #[tokio::test]
    async fn test_register_duplicate_name_fails() {
        let registry = CoolingRegistry::new();
        registry.register("Fan", Arc::new(StubDevice)).await.unwrap();

        let result = registry.register("Fan", Arc::new(StubDevice)).await;
        assert!(matches!(result, Err(ZenFanError::Registration(_))));
    }

    #[tokio::test]
    async fn test_unregister_releases_the_name() {
        let registry = CoolingRegistry::new();
        let handle = registry.register("Fan", Arc::new(StubDevice)).await.unwrap();

        registry.unregister(handle.clone()).await.unwrap();
        assert!(registry.get(&handle).await.is_none());

        // name can be reused after release
        registry.register("Fan", Arc::new(StubDevice)).await.unwrap();
    }

    #[tokio::test]
    async fn test_unregister_twice_fails() {
        let registry = CoolingRegistry::new();
        let handle = registry.register("Fan", Arc::new(StubDevice)).await.unwrap();

        registry.unregister(handle.clone()).await.unwrap();
        let result = registry.unregister(handle).await;
        assert!(matches!(result, Err(ZenFanError::DeviceNotFound(_))));
    }

    #[tokio::test]
    async fn test_handles_are_distinct() {
        let registry = CoolingRegistry::new();
        let a = registry.register("Fan", Arc::new(StubDevice)).await.unwrap();
        let b = registry.register("Fan2", Arc::new(StubDevice)).await.unwrap();
        assert_ne!(a, b);
    }
}
