//! Optional image assets
//!
//! The shrimp sprite and the menu background are QOI files in an assets
//! directory. Both are optional: a missing or broken file falls back to the
//! plain circle / solid background and is never reported to the player.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use qoi::{Decoder, Header};

use crate::config::{GameConfig, ModeConfig, ScreenConfig};
use crate::sim::Mode;

pub const PLAYER_FILE: &str = "player.qoi";
pub const BACKGROUND_FILE: &str = "menu_bg.qoi";

#[derive(Debug)]
pub enum AssetError {
    Io { path: PathBuf, source: io::Error },
    Decode(qoi::Error),
    /// Pixel data does not match the stated size
    BadLength { expected: usize, actual: usize },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io { path, source } => write!(f, "cannot read {}: {}", path.display(), source),
            AssetError::Decode(e) => write!(f, "invalid QOI image: {e}"),
            AssetError::BadLength { expected, actual } => {
                write!(f, "expected {expected} bytes of RGBA, got {actual}")
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Decoded image, pixels packed as ARGB
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Sprite {
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(AssetError::BadLength {
                expected,
                actual: rgba.len(),
            });
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|p| u32::from_be_bytes([p[3], p[0], p[1], p[2]]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn decode_qoi(bytes: &[u8]) -> Result<Self, AssetError> {
        let mut decoder = Decoder::new(bytes)
            .map(|d| d.with_channels(qoi::Channels::Rgba))
            .map_err(AssetError::Decode)?;
        let &Header { width, height, .. } = decoder.header();
        let data = decoder.decode_to_vec().map_err(AssetError::Decode)?;
        Self::from_rgba(width, height, &data)
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode_qoi(&bytes)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// ARGB pixel, transparent outside the image
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Nearest-neighbour resize
    pub fn resized(&self, width: u32, height: u32) -> Sprite {
        let width = width.max(1);
        let height = height.max(1);
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            let sy = (u64::from(y) * u64::from(self.height) / u64::from(height)) as u32;
            for x in 0..width {
                let sx = (u64::from(x) * u64::from(self.width) / u64::from(width)) as u32;
                pixels.push(self.pixel(sx, sy));
            }
        }
        Sprite {
            width,
            height,
            pixels,
        }
    }

    /// Scale so the longer side is `target` pixels, then rotate
    ///
    /// Positive angles turn counter-clockwise on screen.
    pub fn fitted(&self, target: u32, angle_deg: f32) -> Sprite {
        let target = target.max(1);
        let (w, h) = if self.width >= self.height {
            let h = u64::from(target) * u64::from(self.height) / u64::from(self.width.max(1));
            (target, (h as u32).max(1))
        } else {
            let w = u64::from(target) * u64::from(self.width) / u64::from(self.height.max(1));
            ((w as u32).max(1), target)
        };
        let scaled = self.resized(w, h);
        if angle_deg == 0.0 {
            scaled
        } else {
            scaled.rotated(angle_deg)
        }
    }

    fn rotated(&self, angle_deg: f32) -> Sprite {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let (w, h) = (self.width as f32, self.height as f32);
        let out_w = ((w * cos.abs() + h * sin.abs()).round() as u32).max(1);
        let out_h = ((w * sin.abs() + h * cos.abs()).round() as u32).max(1);

        let (cx, cy) = (w / 2.0, h / 2.0);
        let (ox, oy) = (out_w as f32 / 2.0, out_h as f32 / 2.0);
        let mut pixels = Vec::with_capacity(out_w as usize * out_h as usize);
        for y in 0..out_h {
            for x in 0..out_w {
                let dx = x as f32 + 0.5 - ox;
                let dy = y as f32 + 0.5 - oy;
                // inverse rotation back into the source image
                let sx = dx * cos - dy * sin + cx;
                let sy = dx * sin + dy * cos + cy;
                let inside = sx >= 0.0 && sy >= 0.0 && sx < w && sy < h;
                pixels.push(if inside { self.pixel(sx as u32, sy as u32) } else { 0 });
            }
        }
        Sprite {
            width: out_w,
            height: out_h,
            pixels,
        }
    }
}

/// Loaded images, already sized for where they are drawn
#[derive(Debug, Clone, Default)]
pub struct Assets {
    catcher_player: Option<Sprite>,
    survivor_player: Option<Sprite>,
    background: Option<Sprite>,
}

impl Assets {
    /// No images: everything uses the fallback drawing
    pub fn none() -> Self {
        Self::default()
    }

    pub fn load(dir: &Path, config: &GameConfig) -> Self {
        let player = load_optional(&dir.join(PLAYER_FILE));
        let background = load_optional(&dir.join(BACKGROUND_FILE));
        Self::from_sprites(player.as_ref(), background.as_ref(), config)
    }

    /// Fit raw images to the modes and the screen
    pub fn from_sprites(
        player: Option<&Sprite>,
        background: Option<&Sprite>,
        config: &GameConfig,
    ) -> Self {
        Self {
            catcher_player: player.map(|s| fit_player(s, &config.catcher)),
            survivor_player: player.map(|s| fit_player(s, &config.survivor)),
            background: background.map(|s| fit_screen(s, &config.screen)),
        }
    }

    pub fn player(&self, mode: Mode) -> Option<&Sprite> {
        match mode {
            Mode::Catcher => self.catcher_player.as_ref(),
            Mode::Survivor => self.survivor_player.as_ref(),
        }
    }

    pub fn background(&self) -> Option<&Sprite> {
        self.background.as_ref()
    }
}

fn fit_player(sprite: &Sprite, cfg: &ModeConfig) -> Sprite {
    let target = (cfg.player_radius * 2.0 * cfg.sprite_scale) as u32;
    sprite.fitted(target, cfg.sprite_angle)
}

fn fit_screen(sprite: &Sprite, screen: &ScreenConfig) -> Sprite {
    sprite.resized(screen.width, screen.height)
}

fn load_optional(path: &Path) -> Option<Sprite> {
    if !path.exists() {
        log::info!("{} not found, using fallback", path.display());
        return None;
    }
    match Sprite::load(path) {
        Ok(sprite) => {
            log::info!(
                "Loaded {} ({}x{})",
                path.display(),
                sprite.width(),
                sprite.height()
            );
            Some(sprite)
        }
        Err(e) => {
            log::warn!("Failed to load {}: {}", path.display(), e);
            None
        }
    }
}
