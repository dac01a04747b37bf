//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_counter;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use counterdeck::controller::{Controller, ControllerOptions, StateChange};
use counterdeck::gateway::{CounterGateway, GatewayError, MemoryGateway};
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::sync::Semaphore;

/// Observed notifications, in delivery order.
pub type Recorded = Arc<Mutex<Vec<StateChange>>>;

/// An observer closure plus the log it appends to.
pub fn recorder() -> (Recorded, impl Fn(&StateChange) + Send + Sync + 'static) {
    let log: Recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    (log, move |change: &StateChange| sink.lock().push(change.clone()))
}

/// Options with a fixed seed so particle layouts are reproducible.
pub fn seeded_options() -> ControllerOptions {
    ControllerOptions {
        seed: Some(42),
        ..ControllerOptions::default()
    }
}

pub fn memory_controller(value: i64) -> Controller<MemoryGateway> {
    Controller::new(MemoryGateway::with_value(value), seeded_options())
}

/// Write `content` to a config file inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Poll `check` until it holds or `timeout` passes.
pub async fn wait_until(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    check()
}

/// Memory gateway whose calls block until the test releases them.
pub struct GatedGateway {
    inner: MemoryGateway,
    gate: Arc<Semaphore>,
}

impl GatedGateway {
    pub fn new(inner: MemoryGateway) -> Self {
        Self {
            inner,
            gate: Arc::new(Semaphore::new(0)),
        }
    }

    /// Let `calls` pending or future calls through.
    pub fn release(&self, calls: usize) {
        self.gate.add_permits(calls);
    }

    pub fn inner(&self) -> &MemoryGateway {
        &self.inner
    }

    async fn pass(&self) {
        self.gate
            .acquire()
            .await
            .expect("gate semaphore closed")
            .forget();
    }
}

impl CounterGateway for GatedGateway {
    async fn get(&self) -> Result<i64, GatewayError> {
        self.pass().await;
        self.inner.get().await
    }

    async fn increment(&self) -> Result<i64, GatewayError> {
        self.pass().await;
        self.inner.increment().await
    }

    async fn reset(&self) -> Result<i64, GatewayError> {
        self.pass().await;
        self.inner.reset().await
    }
}
