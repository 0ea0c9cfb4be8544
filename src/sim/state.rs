//! Game state and core simulation types
//!
//! One `GameState` is one run of a mode: created when the mode starts,
//! dropped on restart or return to the menu.

use std::fmt;

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

use super::difficulty::{DifficultyModel, DifficultyScalars};
use super::particle::Particle;
use super::player::Player;
use super::snake::Snake;
use crate::config::{Bounds, GameConfig, ModeConfig, ScreenConfig};

/// Stream offset so cosmetic randomness never shifts gameplay randomness
const FX_SEED_SALT: u64 = 0x5EED_F00D_CAFE_0001;

/// Which game is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Catch heads for points before the countdown ends
    Catcher,
    /// Avoid every body segment; score is time alive
    Survivor,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Catcher => "Catcher",
            Mode::Survivor => "Survivor",
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen, overlay shown
    Paused,
    /// Run ended (terminal)
    GameOver,
}

/// Result of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Catcher points
    Score(u64),
    /// Survivor seconds alive
    Survived(f64),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Score(score) => write!(f, "score {score}"),
            Outcome::Survived(secs) => write!(f, "survived {secs:.2} s"),
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub mode: Mode,
    pub config: ModeConfig,
    /// Flat for the catcher
    pub difficulty: DifficultyModel,
    pub screen: ScreenConfig,
    /// Spawn particle bursts
    pub particles_enabled: bool,
    pub phase: GamePhase,
    pub player: Player,
    /// Active snakes (spawn order)
    pub snakes: Vec<Snake>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Catcher: seconds left. Survivor: seconds survived.
    pub clock: f64,
    /// Catcher points
    pub score: u64,
    /// Seconds until the next spawn
    pub next_spawn: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Gameplay RNG
    pub rng: Pcg32,
    /// Cosmetic RNG
    pub fx_rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Start a new run of `mode`
    pub fn new(mode: Mode, config: &GameConfig, seed: u64) -> Self {
        let (mode_config, difficulty) = match mode {
            Mode::Catcher => (config.catcher.clone(), DifficultyModel::constant()),
            Mode::Survivor => (config.survivor.clone(), config.difficulty),
        };
        let screen = config.screen;
        let clock = mode_config.round_seconds.map_or(0.0, f64::from);

        let mut state = Self {
            seed,
            mode,
            player: Player::new(&mode_config, &screen),
            config: mode_config,
            difficulty,
            screen,
            particles_enabled: config.visuals.particles,
            phase: GamePhase::Playing,
            snakes: Vec::new(),
            particles: Vec::new(),
            clock,
            score: 0,
            next_spawn: 0.0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_SEED_SALT),
            next_id: 1,
        };

        // The survivor gets its first snake immediately
        if mode == Mode::Catcher {
            state.next_spawn = state.sample_spawn_interval();
        }

        log::info!("{} run started (seed {})", mode.as_str(), seed);
        state
    }

    /// Fresh run with the same mode and settings
    pub fn restart(&mut self) -> Self {
        let seed = self.rng.next_u64();
        let mut next = self.clone();
        next.reset(seed);
        next
    }

    fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.phase = GamePhase::Playing;
        self.player = Player::new(&self.config, &self.screen);
        self.snakes.clear();
        self.particles.clear();
        self.clock = self.config.round_seconds.map_or(0.0, f64::from);
        self.score = 0;
        self.time_ticks = 0;
        self.rng = Pcg32::seed_from_u64(seed);
        self.fx_rng = Pcg32::seed_from_u64(seed ^ FX_SEED_SALT);
        self.next_id = 1;
        self.next_spawn = match self.mode {
            Mode::Catcher => self.sample_spawn_interval(),
            Mode::Survivor => 0.0,
        };
        log::info!("{} run restarted (seed {})", self.mode.as_str(), seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Seconds survived (survivor) or seconds played (catcher)
    pub fn elapsed(&self) -> f64 {
        match self.config.round_seconds {
            Some(total) => (f64::from(total) - self.clock).max(0.0),
            None => self.clock,
        }
    }

    /// Seconds left on the countdown, if the mode has one
    pub fn time_left(&self) -> Option<f64> {
        self.config.round_seconds.map(|_| self.clock.max(0.0))
    }

    /// Difficulty multipliers for the current moment
    pub fn difficulty_scalars(&self) -> DifficultyScalars {
        self.difficulty.scalars(self.elapsed() as f32)
    }

    /// Spawn interval range in effect right now
    pub fn spawn_bounds(&self) -> Bounds<f32> {
        self.difficulty
            .spawn_bounds(self.config.spawn_interval, self.difficulty_scalars().spawn)
    }

    /// Draw the next spawn countdown from the current bounds
    pub fn sample_spawn_interval(&mut self) -> f32 {
        let bounds = self.spawn_bounds();
        self.rng.random_range(bounds.min..=bounds.max)
    }

    /// Add one random snake at the current difficulty
    pub fn spawn_snake(&mut self) {
        let id = self.next_entity_id();
        let speed_multiplier = self.difficulty_scalars().speed;
        let snake = Snake::spawn(
            id,
            &mut self.rng,
            &self.config,
            &self.screen,
            &self.difficulty,
            speed_multiplier,
        );
        log::debug!(
            "spawned snake {} ({:?}, length {}, speed {:.2})",
            snake.id,
            snake.tier,
            snake.length,
            snake.speed
        );
        self.snakes.push(snake);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Current (or final) result
    pub fn outcome(&self) -> Outcome {
        match self.mode {
            Mode::Catcher => Outcome::Score(self.score),
            Mode::Survivor => Outcome::Survived(self.clock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_catcher() {
        let state = GameState::new(Mode::Catcher, &GameConfig::default(), 42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.clock, 20.0);
        assert_eq!(state.time_left(), Some(20.0));
        assert!(state.next_spawn >= 0.35 && state.next_spawn <= 0.75);
        assert_eq!(state.difficulty, DifficultyModel::constant());
        assert_eq!(state.outcome(), Outcome::Score(0));
    }

    #[test]
    fn test_new_survivor_spawns_immediately() {
        let state = GameState::new(Mode::Survivor, &GameConfig::default(), 42);
        assert_eq!(state.next_spawn, 0.0);
        assert_eq!(state.clock, 0.0);
        assert_eq!(state.time_left(), None);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(Mode::Survivor, &GameConfig::default(), 1);
        state.spawn_snake();
        state.spawn_snake();
        assert_eq!(state.snakes[0].id, 1);
        assert_eq!(state.snakes[1].id, 2);
    }

    #[test]
    fn test_spawn_bounds_shrink_over_time() {
        let mut state = GameState::new(Mode::Survivor, &GameConfig::default(), 1);
        let early = state.spawn_bounds();
        state.clock = 30.0;
        let late = state.spawn_bounds();
        assert!(late.min < early.min);
        assert!(late.max < early.max);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = GameState::new(Mode::Catcher, &GameConfig::default(), 9);
        state.spawn_snake();
        state.score = 300;
        state.clock = 3.0;
        state.phase = GamePhase::GameOver;
        let fresh = state.restart();
        assert_eq!(fresh.phase, GamePhase::Playing);
        assert_eq!(fresh.score, 0);
        assert_eq!(fresh.clock, 20.0);
        assert!(fresh.snakes.is_empty());
        assert_ne!(fresh.seed, 9);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Score(350).to_string(), "score 350");
        assert_eq!(Outcome::Survived(12.346).to_string(), "survived 12.35 s");
    }
}
