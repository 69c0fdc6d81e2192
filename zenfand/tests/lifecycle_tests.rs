//! Lifecycle integration tests
//!
//! Drive the whole load → operate → unload flow the way the daemon does,
//! with a mock firmware bridge standing in for `/proc/acpi/call`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use zenfan_acpi::fan::{READ_FAN_METHOD, WRITE_FAN_METHOD};
use zenfan_acpi::{AcpiBridge, ZenbookFan};
use zenfan_core::{
    check_support, CoolingDevice, DeviceIdentity, Result, ZenFanError, FAN_STATE_AUTO,
};
use zenfand::dmi;
use zenfand::shutdown::release_cooling_device;
use zenfand::thermal::CoolingRegistry;

/// Mock firmware bridge recording calls and serving queued results
struct MockBridge {
    calls: Mutex<Vec<(String, Vec<u64>)>>,
    results: Mutex<VecDeque<Result<u64>>>,
}

impl MockBridge {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            results: Mutex::new(VecDeque::new()),
        }
    }

    fn queue_ok(&self, value: u64) {
        self.results.lock().unwrap().push_back(Ok(value));
    }

    fn calls(&self) -> Vec<(String, Vec<u64>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AcpiBridge for MockBridge {
    async fn evaluate(&self, method: &str, args: &[u64]) -> Result<u64> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), args.to_vec()));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ZenFanError::firmware(method, "no result queued")))
    }
}

fn gated_fan(bridge: Arc<MockBridge>, model: &str) -> ZenbookFan {
    let identity = DeviceIdentity::new("ASUSTeK COMPUTER INC.", model);
    let capabilities = check_support(&identity).unwrap();
    ZenbookFan::new(bridge, capabilities)
}

#[tokio::test]
async fn full_lifecycle_on_supported_machine() {
    let bridge = Arc::new(MockBridge::new());
    let fan = Arc::new(gated_fan(bridge.clone(), "UX32VD"));
    assert!(fan.has_gfx_fan());

    let registry = CoolingRegistry::new();
    let handle = registry.register("Fan", fan.clone()).await.unwrap();

    // initial return-to-auto, as the daemon issues after registration
    bridge.queue_ok(0);
    fan.set_auto().await.unwrap();

    // the host framework drives the registered device through its handle
    let device = registry.get(&handle).await.unwrap();
    assert_eq!(device.max_state(), 0xFF);

    bridge.queue_ok(0);
    device.set_cur_state(120).await.unwrap();
    assert_eq!(device.cur_state().await.unwrap(), 120);

    // unload: one final auto write before the handle is released,
    // regardless of the manual override in effect
    bridge.queue_ok(0);
    release_cooling_device(&registry, handle.clone()).await;
    assert!(registry.get(&handle).await.is_none());

    let calls = bridge.calls();
    assert_eq!(
        calls,
        vec![
            (WRITE_FAN_METHOD.to_string(), vec![0, 0]),
            (WRITE_FAN_METHOD.to_string(), vec![1, 120]),
            (WRITE_FAN_METHOD.to_string(), vec![0, 0]),
        ]
    );
}

#[tokio::test]
async fn auto_mode_round_trip_through_registry() {
    let bridge = Arc::new(MockBridge::new());
    let fan = Arc::new(gated_fan(bridge.clone(), "UX31A"));

    let registry = CoolingRegistry::new();
    let handle = registry.register("Fan", fan).await.unwrap();
    let device = registry.get(&handle).await.unwrap();

    bridge.queue_ok(0);
    device.set_cur_state(FAN_STATE_AUTO).await.unwrap();

    bridge.queue_ok(42);
    assert_eq!(device.cur_state().await.unwrap(), 42);

    let calls = bridge.calls();
    assert_eq!(calls.last().unwrap().0, READ_FAN_METHOD);
}

#[tokio::test]
async fn firmware_failures_surface_through_the_registry() {
    let bridge = Arc::new(MockBridge::new());
    let fan = Arc::new(gated_fan(bridge.clone(), "UX31A"));

    let registry = CoolingRegistry::new();
    let handle = registry.register("Fan", fan.clone()).await.unwrap();
    let device = registry.get(&handle).await.unwrap();

    // nothing queued: bridge fails, error surfaces unchanged
    let result = device.set_cur_state(90).await;
    assert!(matches!(result, Err(ZenFanError::Firmware { .. })));

    // but the cache still reflects caller intent
    assert_eq!(fan.cached_state().await.requested, 90);
    assert!(fan.cached_state().await.manual);
}

#[tokio::test]
async fn unsupported_machine_never_registers() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sys_vendor"), "ASUSTeK COMPUTER INC.\n").unwrap();
    std::fs::write(dir.path().join("product_name"), "X550C\n").unwrap();

    let identity = dmi::read_identity_from(dir.path()).unwrap();
    let result = check_support(&identity);
    assert!(matches!(result, Err(ZenFanError::Unsupported(_))));
}

#[tokio::test]
async fn supported_machine_passes_gate_from_dmi() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sys_vendor"), "ASUSTeK COMPUTER INC.\n").unwrap();
    std::fs::write(dir.path().join("product_name"), "UX21A\n").unwrap();

    let identity = dmi::read_identity_from(dir.path()).unwrap();
    let capabilities = check_support(&identity).unwrap();
    assert!(!capabilities.has_gfx_fan);
}
