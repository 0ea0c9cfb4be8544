//! Snakes: multi-segment movers that fly across the screen
//!
//! A snake keeps the velocity it was spawned with; the wobble is a lateral
//! offset added every tick. Body segments are sampled from the trail, so
//! what is drawn is exactly what collides.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::difficulty::DifficultyModel;
use super::trail::Trail;
use crate::config::{Bounds, ModeConfig, Rewards, ScreenConfig, SpawnPath, SpeedModel};
use crate::unit_between;

/// Smallest body segment radius
pub const MIN_SEGMENT_RADIUS: f32 = 2.0;

/// Rarity class, derived from length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    /// Top two lengths of the range are High, upper half is Mid
    pub fn for_length(length: u32, range: Bounds<u32>) -> Self {
        if length >= range.max.saturating_sub(2) {
            Tier::High
        } else if length >= (range.min + range.max) / 2 {
            Tier::Mid
        } else {
            Tier::Low
        }
    }

    pub fn reward(self, rewards: &Rewards) -> u64 {
        match self {
            Tier::Low => rewards.low,
            Tier::Mid => rewards.mid,
            Tier::High => rewards.high,
        }
    }
}

/// Per-snake lateral oscillation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wobble {
    /// Current phase (radians)
    pub phase: f32,
    /// Peak lateral offset per tick (pixels)
    pub amplitude: f32,
    /// Phase advance per tick (radians)
    pub frequency: f32,
}

impl Wobble {
    pub const NONE: Wobble = Wobble {
        phase: 0.0,
        amplitude: 0.0,
        frequency: 0.0,
    };
}

/// One body circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub pos: Vec2,
    pub radius: f32,
}

/// Screen edge a snake enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    pub fn opposite(self) -> Self {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
        }
    }

    /// Random point along this edge, `margin` pixels outside the screen
    pub fn random_point<R: Rng>(self, rng: &mut R, screen: &ScreenConfig, margin: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(rng.random_range(0..=screen.width) as f32, -margin),
            Edge::Bottom => Vec2::new(
                rng.random_range(0..=screen.width) as f32,
                screen.h() + margin,
            ),
            Edge::Left => Vec2::new(-margin, rng.random_range(0..=screen.height) as f32),
            Edge::Right => Vec2::new(
                screen.w() + margin,
                rng.random_range(0..=screen.height) as f32,
            ),
        }
    }
}

/// A snake entity
#[derive(Debug, Clone)]
pub struct Snake {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub length: u32,
    pub tier: Tier,
    /// Points awarded for catching the head
    pub value: u64,
    pub wobble: Wobble,
    pub alive: bool,
    trail: Trail,
    spacing: u32,
    head_radius: f32,
    despawn_margin: f32,
}

impl Snake {
    /// Build a snake flying from `start` toward `target`
    pub fn new(
        id: u32,
        start: Vec2,
        target: Vec2,
        speed: f32,
        length: u32,
        wobble: Wobble,
        cfg: &ModeConfig,
    ) -> Self {
        let tier = Tier::for_length(length, cfg.length);
        let capacity = length as usize * cfg.spacing as usize;
        Self {
            id,
            pos: start,
            vel: unit_between(start, target) * speed,
            speed,
            length,
            tier,
            value: tier.reward(&cfg.rewards),
            wobble,
            alive: true,
            trail: Trail::new(capacity, start),
            spacing: cfg.spacing,
            head_radius: cfg.head_radius,
            despawn_margin: cfg.despawn_margin,
        }
    }

    /// Spawn a random snake at a screen edge
    ///
    /// `speed_multiplier` only matters for [`SpeedModel::Random`]; the tier
    /// speed model ignores difficulty.
    pub fn spawn<R: Rng>(
        id: u32,
        rng: &mut R,
        cfg: &ModeConfig,
        screen: &ScreenConfig,
        difficulty: &DifficultyModel,
        speed_multiplier: f32,
    ) -> Self {
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let start = edge.random_point(rng, screen, cfg.spawn_margin);
        let target = match cfg.path {
            SpawnPath::OppositeEdge => edge.opposite().random_point(rng, screen, cfg.spawn_margin),
            SpawnPath::Interior => Vec2::new(
                rng.random_range(screen.width / 6..=screen.width * 5 / 6) as f32,
                rng.random_range(screen.height / 6..=screen.height * 5 / 6) as f32,
            ),
        };

        let length = rng.random_range(cfg.length.min..=cfg.length.max);
        let speed = match cfg.speed_model {
            SpeedModel::Random => {
                let base = rng.random_range(cfg.snake_speed.min..=cfg.snake_speed.max);
                difficulty.capped_speed(base, speed_multiplier)
            }
            SpeedModel::ByTier => {
                let rewards = &cfg.rewards;
                let value = Tier::for_length(length, cfg.length).reward(rewards);
                let t = (value - rewards.low) as f32 / (rewards.high - rewards.low) as f32;
                cfg.snake_speed.min + t * (cfg.snake_speed.max - cfg.snake_speed.min)
            }
        };

        let wobble = Wobble {
            phase: rng.random::<f32>() * TAU,
            amplitude: rng.random_range(cfg.wobble_amplitude.min..=cfg.wobble_amplitude.max),
            frequency: rng.random_range(cfg.wobble_frequency.min..=cfg.wobble_frequency.max),
        };

        Self::new(id, start, target, speed, length, wobble, cfg)
    }

    /// Advance one fixed tick
    ///
    /// Motion and wobble are per tick, not scaled by frame time.
    pub fn update(&mut self, screen: &ScreenConfig) {
        self.wobble.phase += self.wobble.frequency;

        let speed = self.vel.length();
        let divisor = if speed == 0.0 { 1.0 } else { speed };
        let perp = Vec2::new(-self.vel.y, self.vel.x) / divisor;
        let offset = self.wobble.phase.sin() * self.wobble.amplitude;
        self.pos += self.vel + perp * offset;

        self.trail.extend_to(self.pos);

        if self.is_beyond(screen) {
            self.alive = false;
        }
    }

    /// True once the snake is further than the despawn margin off-screen
    pub fn is_beyond(&self, screen: &ScreenConfig) -> bool {
        let m = self.despawn_margin;
        self.pos.x < -m || self.pos.x > screen.w() + m || self.pos.y < -m || self.pos.y > screen.h() + m
    }

    /// Newest trail point
    pub fn head(&self) -> Vec2 {
        self.trail.newest().unwrap_or(self.pos)
    }

    pub fn head_radius(&self) -> f32 {
        self.head_radius
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Body circles from head to tail
    ///
    /// Empty until the snake has moved at least once.
    pub fn segments(&self) -> Vec<Segment> {
        if self.trail.len() < 2 {
            return Vec::new();
        }
        let oldest = self.trail.len() - 1;
        let spacing = self.spacing as usize;
        (0..self.length)
            .map(|n| {
                let back = (n as usize * spacing).min(oldest);
                let pos = self.trail.back(back).unwrap_or(self.pos);
                let shrink = 1.0 - n as f32 / (self.length + 2) as f32;
                Segment {
                    pos,
                    radius: (self.head_radius * shrink).max(MIN_SEGMENT_RADIUS),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn screen() -> ScreenConfig {
        ScreenConfig::new(1280, 720)
    }

    #[test]
    fn test_tier_thresholds_catcher_range() {
        let range = Bounds::new(12, 28);
        assert_eq!(Tier::for_length(12, range), Tier::Low);
        assert_eq!(Tier::for_length(19, range), Tier::Low);
        assert_eq!(Tier::for_length(20, range), Tier::Mid);
        assert_eq!(Tier::for_length(25, range), Tier::Mid);
        assert_eq!(Tier::for_length(26, range), Tier::High);
        assert_eq!(Tier::for_length(28, range), Tier::High);
    }

    #[test]
    fn test_length_26_is_gold() {
        let cfg = ModeConfig::catcher();
        let snake = Snake::new(1, Vec2::ZERO, Vec2::X, 8.0, 26, Wobble::NONE, &cfg);
        assert_eq!(snake.tier, Tier::High);
        assert_eq!(snake.value, 200);
    }

    #[test]
    fn test_velocity_points_at_target() {
        let cfg = ModeConfig::survivor();
        let snake = Snake::new(
            1,
            Vec2::new(0.0, 0.0),
            Vec2::new(300.0, 400.0),
            10.0,
            12,
            Wobble::NONE,
            &cfg,
        );
        assert!((snake.vel - Vec2::new(6.0, 8.0)).length() < 1e-5);
    }

    #[test]
    fn test_update_moves_straight_without_wobble() {
        let cfg = ModeConfig::survivor();
        let mut snake = Snake::new(
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(500.0, 100.0),
            5.0,
            12,
            Wobble::NONE,
            &cfg,
        );
        snake.update(&screen());
        assert_eq!(snake.pos, Vec2::new(105.0, 100.0));
        assert_eq!(snake.head(), snake.pos);
        assert_eq!(snake.trail().len(), 6);
    }

    #[test]
    fn test_wobble_is_perpendicular() {
        let cfg = ModeConfig::survivor();
        let wobble = Wobble {
            phase: 0.0,
            amplitude: 2.0,
            frequency: std::f32::consts::FRAC_PI_2,
        };
        let mut snake = Snake::new(
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(500.0, 100.0),
            5.0,
            12,
            wobble,
            &cfg,
        );
        snake.update(&screen());
        // sin(pi/2) * 2 along (-vy, vx)/speed = (0, 1)
        assert!((snake.pos - Vec2::new(105.0, 102.0)).length() < 1e-4);
    }

    #[test]
    fn test_no_segments_before_first_move() {
        let cfg = ModeConfig::survivor();
        let snake = Snake::new(1, Vec2::ZERO, Vec2::X, 5.0, 12, Wobble::NONE, &cfg);
        assert!(snake.segments().is_empty());
    }

    #[test]
    fn test_segments_follow_trail() {
        let cfg = ModeConfig::survivor();
        let mut snake = Snake::new(
            1,
            Vec2::new(0.0, 100.0),
            Vec2::new(1000.0, 100.0),
            4.0,
            10,
            Wobble::NONE,
            &cfg,
        );
        for _ in 0..50 {
            snake.update(&screen());
        }
        let segs = snake.segments();
        assert_eq!(segs.len(), 10);
        assert_eq!(segs[0].pos, snake.head());
        assert_eq!(segs[0].radius, cfg.head_radius);
        // spacing 10 samples at one sample per pixel
        assert!((segs[0].pos.x - segs[1].pos.x - 10.0).abs() < 1e-3);
        assert!(snake.trail().len() <= 10 * cfg.spacing as usize);
    }

    #[test]
    fn test_short_trail_clamps_to_oldest() {
        let cfg = ModeConfig::survivor();
        let mut snake = Snake::new(
            1,
            Vec2::new(0.0, 100.0),
            Vec2::new(1000.0, 100.0),
            3.0,
            10,
            Wobble::NONE,
            &cfg,
        );
        snake.update(&screen());
        let segs = snake.segments();
        assert_eq!(segs.len(), 10);
        assert_eq!(segs[9].pos, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_retires_past_margin() {
        let cfg = ModeConfig::catcher();
        let mut snake = Snake::new(
            1,
            Vec2::new(1280.0 + 195.0, 300.0),
            Vec2::new(5000.0, 300.0),
            10.0,
            12,
            Wobble::NONE,
            &cfg,
        );
        snake.update(&screen());
        assert!(!snake.alive);
    }

    #[test]
    fn test_spawn_respects_config() {
        let mut rng = Pcg32::seed_from_u64(7);
        let cfg = ModeConfig::survivor();
        let model = DifficultyModel::default();
        for id in 0..200 {
            let snake = Snake::spawn(id, &mut rng, &cfg, &screen(), &model, 1.0);
            assert!((cfg.length.min..=cfg.length.max).contains(&snake.length));
            assert!(snake.speed >= cfg.snake_speed.min && snake.speed <= cfg.snake_speed.max);
            assert!(snake.wobble.phase >= 0.0 && snake.wobble.phase < TAU);
            // starts off-screen on an edge
            let p = snake.pos;
            let off = p.x < 0.0 || p.y < 0.0 || p.x > 1280.0 || p.y > 720.0;
            assert!(off, "spawned on screen at {p:?}");
            assert!(snake.alive);
        }
    }

    #[test]
    fn test_opposite_edge_crosses_screen() {
        let mut rng = Pcg32::seed_from_u64(11);
        let cfg = ModeConfig::survivor();
        let model = DifficultyModel::default();
        for id in 0..100 {
            let snake = Snake::spawn(id, &mut rng, &cfg, &screen(), &model, 1.0);
            let p = snake.pos;
            if p.y < 0.0 {
                assert!(snake.vel.y > 0.0);
            } else if p.y > 720.0 {
                assert!(snake.vel.y < 0.0);
            } else if p.x < 0.0 {
                assert!(snake.vel.x > 0.0);
            } else {
                assert!(snake.vel.x < 0.0);
            }
        }
    }

    #[test]
    fn test_spawn_speed_capped_by_difficulty() {
        let mut rng = Pcg32::seed_from_u64(3);
        let cfg = ModeConfig::survivor();
        let model = DifficultyModel::default();
        for id in 0..50 {
            let snake = Snake::spawn(id, &mut rng, &cfg, &screen(), &model, 10.0);
            assert_eq!(snake.speed, model.speed_cap);
        }
    }

    #[test]
    fn test_tier_speed_model() {
        let mut rng = Pcg32::seed_from_u64(5);
        let cfg = ModeConfig::catcher();
        let model = DifficultyModel::constant();
        for id in 0..100 {
            let snake = Snake::spawn(id, &mut rng, &cfg, &screen(), &model, 1.0);
            let expected = match snake.tier {
                Tier::Low => 6.0,
                Tier::Mid => 6.0 + (50.0 / 150.0) * 4.0,
                Tier::High => 10.0,
            };
            assert!((snake.speed - expected).abs() < 1e-4);
        }
    }

    proptest! {
        #[test]
        fn segment_radii_shrink(length in 1u32..40, steps in 1usize..80) {
            let cfg = ModeConfig::survivor();
            let mut snake = Snake::new(
                1,
                Vec2::new(0.0, 300.0),
                Vec2::new(2000.0, 300.0),
                7.0,
                length,
                Wobble::NONE,
                &cfg,
            );
            for _ in 0..steps {
                snake.update(&ScreenConfig::new(1280, 720));
            }
            let segs = snake.segments();
            prop_assert_eq!(segs.len(), length as usize);
            for pair in segs.windows(2) {
                prop_assert!(pair[1].radius <= pair[0].radius);
            }
            for seg in &segs {
                prop_assert!(seg.radius >= MIN_SEGMENT_RADIUS);
            }
        }

        #[test]
        fn alive_iff_within_margin(x in -600.0f32..1900.0, y in -600.0f32..1400.0) {
            let cfg = ModeConfig::survivor();
            let screen = ScreenConfig::new(1280, 720);
            let p = Vec2::new(x, y);
            let mut snake = Snake::new(1, p, p, 0.0, 10, Wobble::NONE, &cfg);
            snake.update(&screen);
            let m = cfg.despawn_margin;
            let outside = x < -m || x > 1280.0 + m || y < -m || y > 720.0 + m;
            prop_assert_eq!(snake.alive, !outside);
        }
    }
}
