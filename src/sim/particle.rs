//! Decorative particle bursts (never affect gameplay)

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

/// Maximum particles alive at once
pub const MAX_PARTICLES: usize = 256;

/// Particle tint, resolved to a color by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Head caught
    Pickup,
    /// Player hit
    Impact,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    /// Seconds left
    pub life: f32,
    /// Initial life, for fading
    pub max_life: f32,
}

impl Particle {
    /// Advance by `dt` seconds. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.life -= dt;
        self.life > 0.0
    }

    /// Remaining life in `[0, 1]`
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Parameters of a radial burst
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    pub life: f32,
    pub kind: ParticleKind,
}

impl Burst {
    pub const PICKUP: Burst = Burst {
        count: 18,
        min_speed: 40.0,
        max_speed: 140.0,
        life: 0.5,
        kind: ParticleKind::Pickup,
    };

    pub const IMPACT: Burst = Burst {
        count: 40,
        min_speed: 80.0,
        max_speed: 240.0,
        life: 0.6,
        kind: ParticleKind::Impact,
    };

    /// Spray particles in random directions from `at`
    pub fn emit<R: Rng>(&self, rng: &mut R, at: Vec2, out: &mut Vec<Particle>) {
        let room = MAX_PARTICLES.saturating_sub(out.len());
        for _ in 0..self.count.min(room) {
            let angle = rng.random::<f32>() * TAU;
            let speed = rng.random_range(self.min_speed..=self.max_speed);
            out.push(Particle {
                pos: at,
                vel: Vec2::from_angle(angle) * speed,
                kind: self.kind,
                life: self.life,
                max_life: self.life,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_count_and_speed() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        Burst::PICKUP.emit(&mut rng, Vec2::new(10.0, 10.0), &mut particles);
        assert_eq!(particles.len(), 18);
        for p in &particles {
            let speed = p.vel.length();
            assert!(speed >= 40.0 - 1e-3 && speed <= 140.0 + 1e-3);
            assert_eq!(p.pos, Vec2::new(10.0, 10.0));
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = Vec::new();
        Burst::IMPACT.emit(&mut rng, Vec2::ZERO, &mut particles);
        for _ in 0..35 {
            particles.retain_mut(|p| p.tick(1.0 / 60.0));
        }
        assert!(!particles.is_empty());
        for _ in 0..5 {
            particles.retain_mut(|p| p.tick(1.0 / 60.0));
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particles = Vec::new();
        for _ in 0..20 {
            Burst::IMPACT.emit(&mut rng, Vec2::ZERO, &mut particles);
        }
        assert_eq!(particles.len(), MAX_PARTICLES);
    }
}
