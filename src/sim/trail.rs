//! Fixed-capacity position history
//!
//! A ring buffer: once full, every push overwrites the oldest sample. Never
//! reallocates after construction.

use glam::Vec2;

#[derive(Debug, Clone)]
pub struct Trail {
    buf: Vec<Vec2>,
    /// Index of the oldest sample once the buffer has wrapped
    start: usize,
    cap: usize,
}

impl Trail {
    /// Create a trail holding at most `capacity` samples, seeded with `origin`
    pub fn new(capacity: usize, origin: Vec2) -> Self {
        let cap = capacity.max(1);
        let mut buf = Vec::with_capacity(cap);
        buf.push(origin);
        Self { buf, start: 0, cap }
    }

    pub fn push(&mut self, p: Vec2) {
        if self.buf.len() < self.cap {
            self.buf.push(p);
        } else {
            self.buf[self.start] = p;
            self.start = (self.start + 1) % self.cap;
        }
    }

    /// Append evenly spaced points from the newest sample up to `to`
    ///
    /// Roughly one point per pixel travelled, at least one. The last point
    /// is exactly `to`. Returns the number of points added.
    pub fn extend_to(&mut self, to: Vec2) -> usize {
        let from = self.newest().unwrap_or(to);
        let steps = (from.distance(to) as usize).max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.push(if i == steps { to } else { from.lerp(to, t) });
        }
        steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Most recent sample
    pub fn newest(&self) -> Option<Vec2> {
        self.back(0)
    }

    /// Sample `n` steps back from the newest (0 = newest)
    pub fn back(&self, n: usize) -> Option<Vec2> {
        let len = self.buf.len();
        if n >= len {
            return None;
        }
        Some(self.buf[(self.start + len - 1 - n) % len])
    }
}
