//! Repeating decay timer for the particle field.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::controller::{ObserverSet, StateChange};
use crate::effects::SharedParticleField;
use crate::lifecycle::StopSignal;

/// Default period between decay ticks.
pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

/// Owns the background task that ages particles once per period.
///
/// The task is the only writer of particle life. It stops on [`disarm`],
/// or when the scheduler is dropped.
///
/// [`disarm`]: EffectScheduler::disarm
pub struct EffectScheduler {
    field: SharedParticleField,
    stop: StopSignal,
    task: Option<JoinHandle<()>>,
}

impl EffectScheduler {
    /// Spawn the decay task on the current Tokio runtime.
    pub fn arm(field: SharedParticleField, period: Duration, observers: ObserverSet) -> Self {
        let stop = StopSignal::new();
        let task = tokio::spawn(run_decay(field.clone(), period, stop.clone(), observers));
        tracing::debug!(period_ms = period.as_millis() as u64, "Effect scheduler armed");
        Self {
            field,
            stop,
            task: Some(task),
        }
    }

    /// Cancel the decay task. Returns false if it was already disarmed.
    ///
    /// When this returns, no further tick touches the field.
    pub fn disarm(&mut self) -> bool {
        let first = self.stop.stop();
        if let Some(task) = self.task.take() {
            task.abort();
        }
        // A tick already holding the lock finishes before we return; later
        // ticks observe the stop flag under the same lock.
        drop(self.field.lock());
        if first {
            tracing::debug!("Effect scheduler disarmed");
        }
        first
    }

    pub fn is_armed(&self) -> bool {
        !self.stop.is_stopped()
    }
}

impl Drop for EffectScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}

async fn run_decay(
    field: SharedParticleField,
    period: Duration,
    stop: StopSignal,
    observers: ObserverSet,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; decay starts one period later.
    interval.tick().await;

    loop {
        tokio::select! {
            biased;
            _ = stop.wait() => break,
            _ = interval.tick() => {
                let remaining = {
                    let mut field = field.lock();
                    if stop.is_stopped() {
                        break;
                    }
                    if field.is_empty() {
                        continue;
                    }
                    field.tick();
                    field.len()
                };
                observers.notify(StateChange::Particles { remaining });
            }
        }
    }
}
