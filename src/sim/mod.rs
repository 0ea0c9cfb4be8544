//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod particle;
pub mod player;
pub mod snake;
pub mod state;
pub mod tick;
pub mod trail;

pub use difficulty::{DifficultyModel, DifficultyScalars};
pub use particle::{Burst, MAX_PARTICLES, Particle, ParticleKind};
pub use player::{Intents, Player};
pub use snake::{Edge, MIN_SEGMENT_RADIUS, Segment, Snake, Tier, Wobble};
pub use state::{GamePhase, GameState, Mode, Outcome};
pub use tick::{TickInput, tick};
pub use trail::Trail;
