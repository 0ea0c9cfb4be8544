//! The shrimp

use glam::Vec2;

use crate::clamp;
use crate::config::{ModeConfig, ScreenConfig};

/// Directional intents for one tick (screen y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Intents {
    /// Combined direction, normalized; zero when idle or cancelled out
    pub fn direction(&self) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.left {
            d.x -= 1.0;
        }
        if self.right {
            d.x += 1.0;
        }
        if self.up {
            d.y -= 1.0;
        }
        if self.down {
            d.y += 1.0;
        }
        d.normalize_or_zero()
    }
}

/// Player with a circular hitbox
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per tick
    pub speed: f32,
}

impl Player {
    /// Player centered on the screen
    pub fn new(cfg: &ModeConfig, screen: &ScreenConfig) -> Self {
        Self {
            pos: Vec2::new((screen.width / 2) as f32, (screen.height / 2) as f32),
            radius: cfg.player_radius,
            speed: cfg.player_speed,
        }
    }

    /// Move one tick and keep the hitbox fully on screen
    pub fn update(&mut self, intents: &Intents, screen: &ScreenConfig) {
        self.pos += intents.direction() * self.speed;
        self.pos.x = clamp(self.pos.x, self.radius, screen.w() - self.radius);
        self.pos.y = clamp(self.pos.y, self.radius, screen.h() - self.radius);
    }
}
