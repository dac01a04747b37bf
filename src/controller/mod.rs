//! Interaction controller: sequences remote counter calls and owns the
//! state derived from them.
//!
//! Every action follows the same shape: dispatch `Started`, await the
//! gateway, dispatch `Succeeded` or `Failed`, spawn a particle burst on
//! success. Observers hear about each step.
//!
//! Callers are expected to serialise `refresh`/`increment`/`reset` by not
//! triggering a new one while [`CounterState::busy`] is set. The controller
//! does not queue or reject overlapping calls.

mod observer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::Config;
use crate::effects::{BurstKind, EffectScheduler, Particle, ParticleField, SharedParticleField};
use crate::gateway::CounterGateway;
use crate::theme::{palette_named, Palette, ThemeCycle, PALETTES};
use crate::ui::counter::{Action, CounterIntent, CounterReducer, CounterState};
use crate::ui::mvi::Reducer;

pub use observer::{ObserverSet, StateChange, StateObserver};

/// Run a reducer over the value behind a lock guard.
macro_rules! dispatch_mvi {
    ($state:expr, $reducer:ty, $intent:expr) => {
        *$state = <$reducer>::reduce(std::mem::take(&mut *$state), $intent);
    };
}

/// Tunables for a [`Controller`].
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    /// Period of the particle decay timer.
    pub tick: Duration,
    pub increment_burst: usize,
    pub reset_burst: usize,
    /// Seed for particle randomness. `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub theme_index: usize,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            tick: crate::effects::DEFAULT_TICK,
            increment_burst: 10,
            reset_burst: 15,
            seed: None,
            theme_index: 0,
        }
    }
}

impl ControllerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            tick: config.effects.tick(),
            increment_burst: config.effects.increment_burst,
            reset_burst: config.effects.reset_burst,
            seed: config.effects.seed,
            theme_index: config
                .ui
                .theme
                .as_deref()
                .and_then(palette_named)
                .unwrap_or(0),
        }
    }
}

pub struct Controller<G> {
    gateway: G,
    options: ControllerOptions,
    state: Mutex<CounterState>,
    theme: Mutex<ThemeCycle>,
    particles: SharedParticleField,
    observers: ObserverSet,
    scheduler: Mutex<Option<EffectScheduler>>,
    started: AtomicBool,
    /// Set by `stop()` while holding the `scheduler` lock.
    stopped: AtomicBool,
}

impl<G: CounterGateway> Controller<G> {
    pub fn new(gateway: G, options: ControllerOptions) -> Self {
        let field = match options.seed {
            Some(seed) => ParticleField::seeded(seed),
            None => ParticleField::default(),
        };
        let theme = ThemeCycle::starting_at(PALETTES, options.theme_index);
        Self {
            gateway,
            options,
            state: Mutex::new(CounterState::default()),
            theme: Mutex::new(theme),
            particles: Arc::new(Mutex::new(field)),
            observers: ObserverSet::default(),
            scheduler: Mutex::new(None),
            started: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self, observer: impl StateObserver + 'static) {
        self.observers.subscribe(Arc::new(observer));
    }

    /// Arm the particle decay timer and load the initial value.
    ///
    /// Only the first call has any effect. Must run inside a Tokio runtime.
    pub async fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::debug!("Controller already started");
            return;
        }
        {
            let mut slot = self.scheduler.lock();
            if self.stopped.load(Ordering::SeqCst) {
                tracing::debug!("Controller stopped before it started");
                return;
            }
            *slot = Some(EffectScheduler::arm(
                Arc::clone(&self.particles),
                self.options.tick,
                self.observers.clone(),
            ));
        }
        tracing::info!("Controller started");
        self.refresh().await;
    }

    /// Release the decay timer. Safe to call repeatedly.
    ///
    /// A stopped controller cannot be started again.
    pub fn stop(&self) {
        self.started.store(true, Ordering::SeqCst);
        let scheduler = {
            let mut slot = self.scheduler.lock();
            self.stopped.store(true, Ordering::SeqCst);
            slot.take()
        };
        if let Some(mut scheduler) = scheduler {
            scheduler.disarm();
            tracing::info!("Controller stopped");
        }
    }

    /// True between `start()` and `stop()`.
    pub fn is_running(&self) -> bool {
        self.scheduler
            .lock()
            .as_ref()
            .is_some_and(EffectScheduler::is_armed)
    }

    pub async fn refresh(&self) -> bool {
        self.perform(Action::Refresh).await
    }

    pub async fn increment(&self) -> bool {
        self.perform(Action::Increment).await
    }

    pub async fn reset(&self) -> bool {
        self.perform(Action::Reset).await
    }

    /// Run one remote action to completion. Returns whether it succeeded.
    pub async fn perform(&self, action: Action) -> bool {
        let already_busy = self.state.lock().busy;
        if already_busy {
            tracing::warn!(action = action.label(), "Action started while another is in flight");
        }
        self.dispatch(CounterIntent::Started(action));

        let result = match action {
            Action::Refresh => self.gateway.get().await,
            Action::Increment => self.gateway.increment().await,
            Action::Reset => self.gateway.reset().await,
        };

        match result {
            Ok(value) => {
                tracing::info!(action = action.label(), value, "Counter operation succeeded");
                self.dispatch(CounterIntent::Succeeded { action, value });
                if let Some(kind) = action.burst() {
                    self.spawn_burst(kind);
                }
                true
            }
            Err(err) => {
                tracing::warn!(action = action.label(), error = %err, "Counter operation failed");
                self.dispatch(CounterIntent::Failed { action });
                false
            }
        }
    }

    /// Advance to the next palette. Returns its name.
    pub fn change_theme(&self) -> &'static str {
        let (index, name) = {
            let mut theme = self.theme.lock();
            let name = theme.advance().name;
            (theme.index(), name)
        };
        tracing::debug!(theme = name, "Theme changed");
        self.observers.notify(StateChange::Theme { index, name });
        name
    }

    /// Copy of the current counter state.
    pub fn snapshot(&self) -> CounterState {
        self.state.lock().clone()
    }

    /// The active palette.
    pub fn palette(&self) -> Palette {
        *self.theme.lock().current()
    }

    pub fn theme_index(&self) -> usize {
        self.theme.lock().index()
    }

    /// Live particles, copied out of the shared field.
    pub fn particles(&self) -> Vec<Particle> {
        self.particles.lock().particles().to_vec()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.lock().len()
    }

    /// The gateway this controller calls. Lets tests inspect a memory gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn dispatch(&self, intent: CounterIntent) {
        let snapshot = {
            let mut state = self.state.lock();
            dispatch_mvi!(state, CounterReducer, intent);
            state.clone()
        };
        tracing::debug!(?intent, busy = snapshot.busy, "Counter intent dispatched");
        self.observers.notify(StateChange::Counter(snapshot));
    }

    fn spawn_burst(&self, kind: BurstKind) {
        let count = match kind {
            BurstKind::Increment => self.options.increment_burst,
            BurstKind::Reset => self.options.reset_burst,
        };
        let remaining = {
            let mut field = self.particles.lock();
            field.spawn(count, kind);
            field.len()
        };
        self.observers.notify(StateChange::Particles { remaining });
    }
}
