use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::gateway::{CounterGateway, GatewayError};

/// In-process counter with natural-number semantics.
///
/// Backs the offline mode and tests. Latency and failures can be injected.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    value: Mutex<i64>,
    latency: Duration,
    pending_failures: AtomicUsize,
    calls: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: i64) -> Self {
        Self {
            value: Mutex::new(value.max(0)),
            ..Self::default()
        }
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the next `count` calls fail without touching the value.
    pub fn fail_next(&self, count: usize) {
        self.pending_failures.store(count, Ordering::SeqCst);
    }

    pub fn value(&self) -> i64 {
        *self.value.lock()
    }

    /// Number of calls received, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn apply(&self, op: impl FnOnce(&mut i64) + Send) -> Result<i64, GatewayError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.calls.fetch_add(1, Ordering::SeqCst);

        let failed = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(GatewayError::Unavailable("injected failure".to_string()));
        }

        let mut value = self.value.lock();
        op(&mut value);
        Ok(*value)
    }
}

impl CounterGateway for MemoryGateway {
    async fn get(&self) -> Result<i64, GatewayError> {
        self.apply(|_| {}).await
    }

    async fn increment(&self) -> Result<i64, GatewayError> {
        self.apply(|value| *value = value.saturating_add(1)).await
    }

    async fn reset(&self) -> Result<i64, GatewayError> {
        self.apply(|value| *value = 0).await
    }
}
