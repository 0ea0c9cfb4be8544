//! Rendering
//!
//! The simulation never touches pixels. `scene` turns game state into a flat
//! list of [`DrawCmd`]s; `raster` executes that list into a 0RGB framebuffer.

pub mod font;
pub mod raster;
pub mod scene;

use glam::Vec2;

use crate::sim::Mode;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BG: Color = Color::rgb(18, 18, 18);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(240, 240, 240);
    pub const GRAY: Color = Color::rgb(150, 150, 150);
    pub const RED: Color = Color::rgb(230, 70, 70);
    pub const CYAN: Color = Color::rgb(0, 200, 220);
    pub const GOLD: Color = Color::rgb(252, 186, 3);
    /// Fallback shrimp circle
    pub const PLAYER: Color = Color::rgb(255, 120, 90);
    pub const EYE: Color = Color::rgb(15, 15, 15);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Brighten every channel by `amount`, saturating
    pub const fn lighten(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
            a: self.a,
        }
    }

    /// Packed 0RGB, alpha dropped
    #[inline]
    pub const fn to_0rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Pre-loaded image referenced by a draw command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    /// Shrimp sprite fitted for a mode
    Player(Mode),
}

/// One drawing operation, executed in list order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole frame
    Clear(Color),
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Filled rectangle with rounded corners and an optional 2 px outline
    Rect {
        rect: Rect,
        fill: Color,
        corner_radius: f32,
        outline: Option<Color>,
    },
    /// Blend black at `alpha` over the whole frame
    Dim(u8),
    /// Image centered on a point
    Sprite { id: SpriteId, center: Vec2 },
    /// Menu background image, already scaled to the screen
    Background,
    /// Bitmap text; `pos.y` is the top edge, `pos.x` depends on `align`
    Text {
        text: String,
        pos: Vec2,
        scale: u32,
        color: Color,
        align: Align,
    },
}

impl DrawCmd {
    pub fn text(text: impl Into<String>, pos: Vec2, scale: u32, color: Color) -> Self {
        DrawCmd::Text {
            text: text.into(),
            pos,
            scale,
            color,
            align: Align::Left,
        }
    }

    pub fn centered_text(text: impl Into<String>, pos: Vec2, scale: u32, color: Color) -> Self {
        DrawCmd::Text {
            text: text.into(),
            pos,
            scale,
            color,
            align: Align::Center,
        }
    }
}
