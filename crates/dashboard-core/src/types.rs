//! Fundamental geometric and bookkeeping types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D point in map or scope coordinates (pixels, y grows downward).
pub type Point = DVec2;

/// True when both coordinates are finite (no NaN, no infinity).
pub fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Invocation counters for the two periodic tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounters {
    /// Number of frame-task invocations since startup.
    pub frames: u64,
    /// Number of timer-task invocations since startup.
    pub timer_ticks: u64,
}

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` centred on `center`.
    pub fn centered(center: Point, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Intersect with the surface `[0, width] x [0, height]`.
    /// Returns `None` when nothing of the rectangle remains visible.
    pub fn clamp_to(&self, width: f64, height: f64) -> Option<Rect> {
        let x0 = self.x.max(0.0);
        let y0 = self.y.max(0.0);
        let x1 = self.right().min(width);
        let y1 = self.bottom().min(height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}
