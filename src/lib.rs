//! S.H.R.I.M.P - snake-dodging / snake-catching arcade
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snakes, player, difficulty, game state)
//! - `renderer`: Draw lists and the software rasterizer
//! - `app`: Menu/session lifecycle driven by the host
//! - `config`: Data-driven game balance and validation

pub mod app;
pub mod assets;
pub mod config;
pub mod menu;
pub mod records;
pub mod renderer;
pub mod sim;

pub use app::{App, AppControl, FrameInput};
pub use config::{ConfigError, GameConfig, ModeConfig, ScreenConfig};
pub use records::Records;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (snake motion is tuned per 60 Hz tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame the host will feed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Clamp `x` into `[lo, hi]` (`lo` wins if the range is inverted)
#[inline]
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Unit vector pointing from `a` to `b`
///
/// Coincident points divide by 1 instead of 0, giving the zero vector.
#[inline]
pub fn unit_between(a: Vec2, b: Vec2) -> Vec2 {
    let delta = b - a;
    let len = delta.length();
    let len = if len == 0.0 { 1.0 } else { len };
    delta / len
}
