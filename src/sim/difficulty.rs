//! Time-based difficulty ramp
//!
//! Pure function of elapsed run time: speed and spawn rate grow
//! exponentially, with a hard speed cap and a floor on the spawn interval.

use serde::{Deserialize, Serialize};

use crate::config::{Bounds, ConfigError, check_non_negative, check_positive};

/// Multipliers for the current moment of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyScalars {
    /// Applied to a snake's base speed
    pub speed: f32,
    /// Divides the base spawn interval
    pub spawn: f32,
}

/// Exponential difficulty growth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyModel {
    /// Speed growth rate per second (`e^(k t)`)
    pub speed_growth: f32,
    /// Spawn-rate growth rate per second
    pub spawn_growth: f32,
    /// No snake ever flies faster than this
    pub speed_cap: f32,
    /// Spawn interval bounds never drop below this (seconds)
    pub spawn_floor: f32,
}

impl Default for DifficultyModel {
    fn default() -> Self {
        Self {
            speed_growth: 0.028,
            spawn_growth: 0.035,
            speed_cap: 20.0,
            spawn_floor: 0.10,
        }
    }
}

impl DifficultyModel {
    /// Flat difficulty: multipliers stay at 1 and nothing is capped
    pub fn constant() -> Self {
        Self {
            speed_growth: 0.0,
            spawn_growth: 0.0,
            speed_cap: f32::INFINITY,
            spawn_floor: 0.0,
        }
    }

    pub fn scalars(&self, elapsed: f32) -> DifficultyScalars {
        let t = elapsed.max(0.0);
        DifficultyScalars {
            speed: (self.speed_growth * t).exp(),
            spawn: (self.spawn_growth * t).exp(),
        }
    }

    /// Base speed scaled by the multiplier, never above the cap
    #[inline]
    pub fn capped_speed(&self, base: f32, speed_multiplier: f32) -> f32 {
        (base * speed_multiplier).clamp(0.0, self.speed_cap)
    }

    /// Current spawn interval bounds for a base interval range
    pub fn spawn_bounds(&self, base: Bounds<f32>, spawn_multiplier: f32) -> Bounds<f32> {
        Bounds::new(
            (base.min / spawn_multiplier).max(self.spawn_floor),
            (base.max / spawn_multiplier).max(self.spawn_floor),
        )
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("difficulty.speed_growth", self.speed_growth)?;
        check_non_negative("difficulty.spawn_growth", self.spawn_growth)?;
        check_non_negative("difficulty.spawn_floor", self.spawn_floor)?;
        // An infinite cap means "uncapped"
        if self.speed_cap == f32::INFINITY {
            return Ok(());
        }
        check_positive("difficulty.speed_cap", self.speed_cap)
    }
}
