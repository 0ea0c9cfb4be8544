//! Software rasterizer
//!
//! Executes a draw list into a 0RGB `u32` framebuffer, the format minifb
//! presents. Shapes are filled as horizontal spans; everything is clipped to
//! the buffer.

use glam::Vec2;

use super::{Align, Color, DrawCmd, Rect, SpriteId, font};
use crate::assets::{Assets, Sprite};

/// Width of rectangle outlines in pixels
const OUTLINE_WIDTH: f32 = 2.0;

/// Alpha-blend `color` over a 0RGB pixel
#[inline]
fn mix(dst: u32, color: Color) -> u32 {
    mix_channels(dst, color.r, color.g, color.b, color.a)
}

#[inline]
fn mix_channels(dst: u32, r: u8, g: u8, b: u8, a: u8) -> u32 {
    match a {
        0 => dst,
        255 => (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b),
        _ => {
            let a = u32::from(a);
            let channel = |src: u8, shift: u32| {
                let d = (dst >> shift) & 0xFF;
                (u32::from(src) * a + d * (255 - a)) / 255
            };
            (channel(r, 16) << 16) | (channel(g, 8) << 8) | channel(b, 0)
        }
    }
}

/// Signed distance from `p` (relative to the box center) to a rounded box
#[inline]
fn sd_round_rect(p: Vec2, half: Vec2, radius: f32) -> f32 {
    let q = p.abs() - half + Vec2::splat(radius);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - radius
}

/// Frame being drawn
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major 0RGB pixels
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Run every command in order
    pub fn execute(&mut self, cmds: &[DrawCmd], assets: &Assets) {
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear(color) => self.clear(*color),
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                } => self.circle(*center, *radius, *color),
                DrawCmd::Rect {
                    rect,
                    fill,
                    corner_radius,
                    outline,
                } => self.rect(rect, *fill, *corner_radius, *outline),
                DrawCmd::Dim(alpha) => self.dim(*alpha),
                DrawCmd::Sprite { id, center } => {
                    let sprite = match id {
                        SpriteId::Player(mode) => assets.player(*mode),
                    };
                    if let Some(sprite) = sprite {
                        self.blit(sprite, *center);
                    }
                }
                DrawCmd::Background => match assets.background() {
                    Some(bg) => self.background(bg),
                    None => self.clear(Color::BG),
                },
                DrawCmd::Text {
                    text,
                    pos,
                    scale,
                    color,
                    align,
                } => self.text(text, *pos, *scale, *color, *align),
            }
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_0rgb());
    }

    /// Blend a horizontal run `[x0, x1)` on row `y`
    fn span(&mut self, y: i64, x0: i64, x1: i64, color: Color) {
        if y < 0 || y >= self.height as i64 {
            return;
        }
        let x0 = x0.clamp(0, self.width as i64) as usize;
        let x1 = x1.clamp(0, self.width as i64) as usize;
        if x0 >= x1 {
            return;
        }
        let row = y as usize * self.width;
        for p in &mut self.pixels[row + x0..row + x1] {
            *p = mix(*p, color);
        }
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        self.span(y, x, x + 1, color);
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let top = (center.y - radius).floor() as i64;
        let bottom = (center.y + radius).ceil() as i64;
        for y in top..=bottom {
            let dy = y as f32 + 0.5 - center.y;
            if dy * dy > r2 {
                continue;
            }
            let half = (r2 - dy * dy).sqrt();
            let x0 = (center.x - half).round() as i64;
            let x1 = (center.x + half).round() as i64;
            self.span(y, x0, x1, color);
        }
    }

    pub fn rect(&mut self, rect: &Rect, fill: Color, corner_radius: f32, outline: Option<Color>) {
        let half = Vec2::new(rect.w, rect.h) / 2.0;
        let center = Vec2::new(rect.x, rect.y) + half;
        let radius = corner_radius.clamp(0.0, half.x.min(half.y));

        let x0 = rect.x.floor().max(0.0) as i64;
        let x1 = ((rect.x + rect.w).ceil() as i64).min(self.width as i64);
        let y0 = rect.y.floor().max(0.0) as i64;
        let y1 = ((rect.y + rect.h).ceil() as i64).min(self.height as i64);

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                let d = sd_round_rect(p, half, radius);
                if d > 0.0 {
                    continue;
                }
                self.blend_pixel(x, y, fill);
                if let Some(edge) = outline
                    && d > -OUTLINE_WIDTH
                {
                    self.blend_pixel(x, y, edge);
                }
            }
        }
    }

    /// Darken the whole frame toward black
    pub fn dim(&mut self, alpha: u8) {
        let shade = Color::BLACK.with_alpha(alpha);
        for p in &mut self.pixels {
            *p = mix(*p, shade);
        }
    }

    /// Draw an ARGB sprite centered on `center`, honouring its alpha
    pub fn blit(&mut self, sprite: &Sprite, center: Vec2) {
        let left = (center.x - sprite.width() as f32 / 2.0).round() as i64;
        let top = (center.y - sprite.height() as f32 / 2.0).round() as i64;
        for sy in 0..sprite.height() {
            let y = top + i64::from(sy);
            if y < 0 || y >= self.height as i64 {
                continue;
            }
            for sx in 0..sprite.width() {
                let x = left + i64::from(sx);
                if x < 0 || x >= self.width as i64 {
                    continue;
                }
                let [a, r, g, b] = sprite.pixel(sx, sy).to_be_bytes();
                let i = y as usize * self.width + x as usize;
                self.pixels[i] = mix_channels(self.pixels[i], r, g, b, a);
            }
        }
    }

    /// Copy an opaque screen-sized image
    fn background(&mut self, sprite: &Sprite) {
        self.clear(Color::BG);
        let w = (sprite.width() as usize).min(self.width);
        let h = (sprite.height() as usize).min(self.height);
        for y in 0..h {
            for x in 0..w {
                self.pixels[y * self.width + x] = sprite.pixel(x as u32, y as u32) & 0x00FF_FFFF;
            }
        }
    }

    pub fn text(&mut self, text: &str, pos: Vec2, scale: u32, color: Color, align: Align) {
        let scale = scale.max(1);
        let width = font::text_width(text, scale) as f32;
        let left = match align {
            Align::Left => pos.x,
            Align::Center => pos.x - width / 2.0,
            Align::Right => pos.x - width,
        }
        .round() as i64;
        let top = pos.y.round() as i64;
        let s = i64::from(scale);

        for (col, row) in font::lit_pixels(text) {
            let x = left + i64::from(col) * s;
            let y = top + i64::from(row) * s;
            for dy in 0..s {
                self.span(y + dy, x, x + s, color);
            }
        }
    }
}
