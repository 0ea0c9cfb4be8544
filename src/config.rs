//! Game configuration and balance
//!
//! Every tuning constant of both modes lives here. Defaults reproduce the
//! shipped game; a JSON file can override any subset of fields.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::sim::DifficultyModel;

/// Inclusive `[min, max]` range used for random draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

/// Screen (play area) dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl ScreenConfig {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn h(&self) -> f32 {
        self.height as f32
    }
}

/// How a snake picks its cruising speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedModel {
    /// Uniform in the speed range, scaled by the difficulty multiplier
    Random,
    /// Interpolated across the speed range by reward tier
    ByTier,
}

/// Where a freshly spawned snake is headed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPath {
    /// Straight across to a point on the opposite edge
    OppositeEdge,
    /// Toward a random point in the middle two thirds of the screen
    Interior,
}

/// Points per tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub low: u64,
    pub mid: u64,
    pub high: u64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            low: 50,
            mid: 100,
            high: 200,
        }
    }
}

/// Tuning for one game mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeConfig {
    /// Snake speed range (pixels per tick)
    pub snake_speed: Bounds<f32>,
    pub speed_model: SpeedModel,
    /// Seconds between spawns (before difficulty scaling)
    pub spawn_interval: Bounds<f32>,
    /// Segment count range
    pub length: Bounds<u32>,
    /// Trail samples between body segments
    pub spacing: u32,
    pub head_radius: f32,
    pub player_radius: f32,
    /// Player speed (pixels per tick)
    pub player_speed: f32,
    /// Extra reach when catching a head
    pub pickup_slack: f32,
    pub wobble_amplitude: Bounds<f32>,
    /// Phase advance per tick (radians)
    pub wobble_frequency: Bounds<f32>,
    /// How far outside the screen snakes appear
    pub spawn_margin: f32,
    /// How far outside the screen snakes are retired
    pub despawn_margin: f32,
    pub path: SpawnPath,
    pub rewards: Rewards,
    /// Countdown length; `None` means the run lasts until a collision
    pub round_seconds: Option<f32>,
    /// Sprite size relative to the hitbox diameter
    pub sprite_scale: f32,
    /// Fixed sprite rotation (degrees, counter-clockwise)
    pub sprite_angle: f32,
}

impl ModeConfig {
    /// Catch the heads before time runs out
    pub fn catcher() -> Self {
        Self {
            snake_speed: Bounds::new(6.0, 10.0),
            speed_model: SpeedModel::ByTier,
            spawn_interval: Bounds::new(0.35, 0.75),
            length: Bounds::new(12, 28),
            spacing: 10,
            head_radius: 9.0,
            player_radius: 16.0,
            player_speed: 8.2,
            pickup_slack: 2.0,
            wobble_amplitude: Bounds::new(0.8, 1.6),
            wobble_frequency: Bounds::new(0.07, 0.12),
            spawn_margin: 40.0,
            despawn_margin: 200.0,
            path: SpawnPath::Interior,
            rewards: Rewards::default(),
            round_seconds: Some(20.0),
            sprite_scale: 2.6,
            sprite_angle: 0.0,
        }
    }

    /// Dodge everything for as long as possible
    pub fn survivor() -> Self {
        Self {
            snake_speed: Bounds::new(6.0, 10.0),
            speed_model: SpeedModel::Random,
            spawn_interval: Bounds::new(0.35, 0.75),
            length: Bounds::new(10, 24),
            spacing: 10,
            head_radius: 11.0,
            player_radius: 18.0,
            player_speed: 8.6,
            pickup_slack: 0.0,
            wobble_amplitude: Bounds::new(0.5, 1.2),
            wobble_frequency: Bounds::new(0.08, 0.12),
            spawn_margin: 70.0,
            despawn_margin: 300.0,
            path: SpawnPath::OppositeEdge,
            rewards: Rewards::default(),
            round_seconds: None,
            sprite_scale: 2.8,
            sprite_angle: -12.0,
        }
    }

    fn validate(&self, mode: &str, screen: &ScreenConfig) -> Result<(), ConfigError> {
        let field = |name: &str| format!("{mode}.{name}");

        check_bounds(&field("snake_speed"), self.snake_speed)?;
        check_non_negative(&field("snake_speed.min"), self.snake_speed.min)?;
        check_bounds(&field("spawn_interval"), self.spawn_interval)?;
        check_positive(&field("spawn_interval.min"), self.spawn_interval.min)?;
        check_bounds(&field("wobble_amplitude"), self.wobble_amplitude)?;
        check_non_negative(&field("wobble_amplitude.min"), self.wobble_amplitude.min)?;
        check_bounds(&field("wobble_frequency"), self.wobble_frequency)?;
        check_non_negative(&field("wobble_frequency.min"), self.wobble_frequency.min)?;

        if self.length.min > self.length.max {
            return Err(ConfigError::InvertedRange {
                field: field("length"),
                min: self.length.min as f64,
                max: self.length.max as f64,
            });
        }
        if self.length.min == 0 {
            return Err(ConfigError::NotPositive {
                field: field("length.min"),
                value: 0.0,
            });
        }
        if self.spacing == 0 {
            return Err(ConfigError::NotPositive {
                field: field("spacing"),
                value: 0.0,
            });
        }

        check_positive(&field("head_radius"), self.head_radius)?;
        check_positive(&field("player_radius"), self.player_radius)?;
        check_non_negative(&field("player_speed"), self.player_speed)?;
        check_non_negative(&field("pickup_slack"), self.pickup_slack)?;
        check_non_negative(&field("spawn_margin"), self.spawn_margin)?;
        check_non_negative(&field("despawn_margin"), self.despawn_margin)?;
        check_positive(&field("sprite_scale"), self.sprite_scale)?;
        check_finite(&field("sprite_angle"), self.sprite_angle)?;

        if let Some(seconds) = self.round_seconds {
            check_positive(&field("round_seconds"), seconds)?;
        }

        let r = &self.rewards;
        if r.low > r.mid || r.mid > r.high {
            return Err(ConfigError::InvertedRange {
                field: field("rewards"),
                min: r.low as f64,
                max: r.high as f64,
            });
        }
        if self.speed_model == SpeedModel::ByTier && r.low == r.high {
            return Err(ConfigError::Degenerate {
                field: field("rewards"),
                reason: "tier speed interpolation needs low < high",
            });
        }

        let diameter = self.player_radius * 2.0;
        if diameter > screen.w() || diameter > screen.h() {
            return Err(ConfigError::Degenerate {
                field: field("player_radius"),
                reason: "player does not fit on the screen",
            });
        }

        Ok(())
    }
}

/// Cosmetic switches (never affect the simulation outcome)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visuals {
    /// Pickup / impact particle bursts
    pub particles: bool,
    /// Show the difficulty multipliers in the survivor HUD
    pub show_difficulty: bool,
}

impl Default for Visuals {
    fn default() -> Self {
        Self {
            particles: true,
            show_difficulty: true,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    #[serde(deserialize_with = "catcher_section")]
    pub catcher: ModeConfig,
    #[serde(deserialize_with = "survivor_section")]
    pub survivor: ModeConfig,
    /// Survivor difficulty ramp
    pub difficulty: DifficultyModel,
    pub visuals: Visuals,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            catcher: ModeConfig::catcher(),
            survivor: ModeConfig::survivor(),
            difficulty: DifficultyModel::default(),
            visuals: Visuals::default(),
        }
    }
}

fn catcher_section<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ModeConfig, D::Error> {
    mode_section(ModeConfig::catcher(), deserializer)
}

fn survivor_section<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ModeConfig, D::Error> {
    mode_section(ModeConfig::survivor(), deserializer)
}

/// Overlay a (possibly partial) mode section onto that mode's defaults
fn mode_section<'de, D: Deserializer<'de>>(
    base: ModeConfig,
    deserializer: D,
) -> Result<ModeConfig, D::Error> {
    let overrides = serde_json::Value::deserialize(deserializer)?;
    let mut merged = serde_json::to_value(base).map_err(D::Error::custom)?;
    merge_json(&mut merged, overrides);
    serde_json::from_value(merged).map_err(D::Error::custom)
}

/// Objects merge key by key; anything else replaces the base value
fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: None,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject ranges and values that would make the game misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(ConfigError::NotPositive {
                field: "screen".to_string(),
                value: self.screen.width.min(self.screen.height) as f64,
            });
        }
        self.catcher.validate("catcher", &self.screen)?;
        self.survivor.validate("survivor", &self.screen)?;
        self.difficulty.validate()?;
        Ok(())
    }
}

/// Configuration problems, reported once at startup
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    InvertedRange {
        field: String,
        min: f64,
        max: f64,
    },
    NotPositive {
        field: String,
        value: f64,
    },
    Negative {
        field: String,
        value: f64,
    },
    NotFinite {
        field: String,
    },
    Degenerate {
        field: String,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {}", path.display(), source)
            }
            ConfigError::Parse {
                path: Some(path),
                source,
            } => write!(f, "invalid config {}: {}", path.display(), source),
            ConfigError::Parse { path: None, source } => write!(f, "invalid config: {}", source),
            ConfigError::InvertedRange { field, min, max } => {
                write!(f, "{field}: min {min} is greater than max {max}")
            }
            ConfigError::NotPositive { field, value } => {
                write!(f, "{field}: must be positive, got {value}")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{field}: must not be negative, got {value}")
            }
            ConfigError::NotFinite { field } => write!(f, "{field}: must be a finite number"),
            ConfigError::Degenerate { field, reason } => write!(f, "{field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub(crate) fn check_finite(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite {
            field: field.to_string(),
        })
    }
}

pub(crate) fn check_positive(field: &str, value: f32) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive {
            field: field.to_string(),
            value: value as f64,
        })
    }
}

pub(crate) fn check_non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative {
            field: field.to_string(),
            value: value as f64,
        })
    }
}

fn check_bounds(field: &str, bounds: Bounds<f32>) -> Result<(), ConfigError> {
    check_finite(field, bounds.min)?;
    check_finite(field, bounds.max)?;
    if bounds.min > bounds.max {
        return Err(ConfigError::InvertedRange {
            field: field.to_string(),
            min: bounds.min as f64,
            max: bounds.max as f64,
        });
    }
    Ok(())
}
