//! Ephemeral visual feedback: particles and the timer that decays them.

mod particle;
mod scheduler;

use std::sync::Arc;

use parking_lot::Mutex;

pub use particle::{BurstKind, Particle, ParticleField, NEUTRAL_GRAY, PARTICLE_LIFE};
pub use scheduler::{EffectScheduler, DEFAULT_TICK};

/// Particle field shared by the controller (spawn) and the scheduler (decay).
pub type SharedParticleField = Arc<Mutex<ParticleField>>;
