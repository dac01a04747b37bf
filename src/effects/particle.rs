//! Transient feedback particles spawned on increment and reset.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use uuid::Uuid;

use crate::theme::Rgb;

/// Starting life of every particle. One tick removes one unit.
pub const PARTICLE_LIFE: u32 = 100;

/// Fixed colour for reset bursts.
pub const NEUTRAL_GRAY: Rgb = Rgb::new(0x9c, 0xa3, 0xaf);

/// Which action produced a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    Increment,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: Uuid,
    /// Horizontal position in `[0, 100)`.
    pub x: f32,
    /// Vertical position in `[0, 100)`.
    pub y: f32,
    pub size: f32,
    pub color: Rgb,
    pub life: u32,
    pub speed: f32,
}

impl Particle {
    /// Ticks elapsed since spawn.
    pub fn age(&self) -> u32 {
        PARTICLE_LIFE.saturating_sub(self.life)
    }

    /// Upward drift in field units. Grows as life runs out.
    pub fn vertical_offset(&self) -> f32 {
        self.age() as f32 * self.speed * 0.5
    }

    /// Remaining opacity in `[0, 1]`. Shrinks as life runs out.
    pub fn opacity(&self) -> f32 {
        self.life as f32 / PARTICLE_LIFE as f32
    }

    /// Colour dimmed by the remaining opacity.
    pub fn faded_color(&self) -> Rgb {
        self.color.scaled(self.opacity())
    }
}

/// Live particles plus the random source used to spawn them.
pub struct ParticleField {
    particles: Vec<Particle>,
    rng: Box<dyn RngCore + Send>,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl std::fmt::Debug for ParticleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleField")
            .field("particles", &self.particles.len())
            .finish_non_exhaustive()
    }
}

impl ParticleField {
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            particles: Vec::new(),
            rng: Box::new(rng),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Append `count` freshly randomised particles.
    pub fn spawn(&mut self, count: usize, kind: BurstKind) {
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = self.random_particle(kind);
            self.particles.push(particle);
        }
    }

    fn random_particle(&mut self, kind: BurstKind) -> Particle {
        let rng = &mut self.rng;
        let color = match kind {
            BurstKind::Increment => Rgb::from_hsl(rng.gen_range(200.0..320.0), 0.85, 0.65),
            BurstKind::Reset => NEUTRAL_GRAY,
        };
        Particle {
            id: uuid::Builder::from_random_bytes(rng.gen()).into_uuid(),
            x: rng.gen_range(0.0..100.0),
            y: rng.gen_range(0.0..100.0),
            size: rng.gen_range(4.0..12.0),
            color,
            life: PARTICLE_LIFE,
            speed: rng.gen_range(0.5..2.0),
        }
    }

    /// Age every particle by one and drop the ones that ran out.
    ///
    /// Returns how many particles were removed.
    pub fn tick(&mut self) -> usize {
        let before = self.particles.len();
        self.particles.retain_mut(|particle| {
            particle.life = particle.life.saturating_sub(1);
            particle.life > 0
        });
        before - self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn spawn_creates_full_life_particles_in_range() {
        let mut field = ParticleField::seeded(7);
        field.spawn(10, BurstKind::Increment);
        assert_eq!(field.len(), 10);
        for p in field.particles() {
            assert_eq!(p.life, PARTICLE_LIFE);
            assert!((0.0..100.0).contains(&p.x));
            assert!((0.0..100.0).contains(&p.y));
            assert!(p.speed > 0.0);
        }
    }

    #[test]
    fn ids_are_unique() {
        let mut field = ParticleField::seeded(1);
        field.spawn(50, BurstKind::Increment);
        field.spawn(50, BurstKind::Reset);
        let ids: HashSet<_> = field.particles().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn reset_burst_is_neutral_gray() {
        let mut field = ParticleField::seeded(3);
        field.spawn(15, BurstKind::Reset);
        assert!(field.particles().iter().all(|p| p.color == NEUTRAL_GRAY));
    }

    #[test]
    fn increment_burst_is_not_gray() {
        let mut field = ParticleField::seeded(3);
        field.spawn(10, BurstKind::Increment);
        assert!(field.particles().iter().all(|p| p.color != NEUTRAL_GRAY));
    }

    #[test]
    fn same_seed_same_particles() {
        let mut a = ParticleField::seeded(42);
        let mut b = ParticleField::seeded(42);
        a.spawn(5, BurstKind::Increment);
        b.spawn(5, BurstKind::Increment);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn tick_strictly_decreases_life() {
        let mut field = ParticleField::seeded(9);
        field.spawn(3, BurstKind::Increment);
        let mut previous: Vec<u32> = field.particles().iter().map(|p| p.life).collect();
        for _ in 0..10 {
            field.tick();
            let current: Vec<u32> = field.particles().iter().map(|p| p.life).collect();
            for (before, after) in previous.iter().zip(&current) {
                assert!(after < before);
            }
            previous = current;
        }
    }

    #[test]
    fn particles_removed_exactly_when_life_hits_zero() {
        let mut field = ParticleField::seeded(11);
        field.spawn(15, BurstKind::Reset);
        for _ in 0..(PARTICLE_LIFE - 1) {
            assert_eq!(field.tick(), 0);
            assert!(field.particles().iter().all(|p| p.life > 0));
        }
        assert_eq!(field.len(), 15);
        assert_eq!(field.tick(), 15);
        assert!(field.is_empty());
    }

    #[test]
    fn offset_and_opacity_are_monotonic_in_life() {
        let mut field = ParticleField::seeded(5);
        field.spawn(1, BurstKind::Increment);
        let mut last_offset = field.particles()[0].vertical_offset();
        let mut last_opacity = field.particles()[0].opacity();
        assert_eq!(last_offset, 0.0);
        assert_eq!(last_opacity, 1.0);
        for _ in 0..50 {
            field.tick();
            let p = &field.particles()[0];
            assert!(p.vertical_offset() > last_offset);
            assert!(p.opacity() < last_opacity);
            last_offset = p.vertical_offset();
            last_opacity = p.opacity();
        }
    }
}
