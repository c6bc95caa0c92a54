//! Rectangle and segment geometry
//!
//! The primitives behind player collision and the boss's sight line:
//! axis-aligned box overlap, distances, bearings and segment crossings.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::normalize_angle;

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub const fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Same rectangle moved so its corner sits at `pos`
    pub fn at(&self, pos: Vec2) -> Self {
        Self { pos, size: self.size }
    }

    /// The four edges as segments: top, bottom, left, right
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let top_left = self.pos;
        let top_right = Vec2::new(self.right(), self.pos.y);
        let bottom_left = Vec2::new(self.pos.x, self.bottom());
        let bottom_right = Vec2::new(self.right(), self.bottom());
        [
            (top_left, top_right),
            (bottom_left, bottom_right),
            (top_left, bottom_left),
            (top_right, bottom_right),
        ]
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        rect_overlap(self, other)
    }

    /// Uniform random point inside the rectangle.
    ///
    /// Degenerate (zero-sized) rectangles always yield their corner.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let t = Vec2::new(rng.random::<f32>(), rng.random::<f32>());
        self.pos + self.size.max(Vec2::ZERO) * t
    }
}

/// Overlap test with strict separation: rectangles that only share an edge
/// do not collide.
#[inline]
pub fn rect_overlap(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    (p2 - p1).length()
}

/// Angle of the vector `to - from`, in (-π, π]
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    normalize_angle(delta.y.atan2(delta.x))
}

/// Parametric segment intersection between `p1-p2` and `p3-p4`.
///
/// Parallel segments never intersect. Both parameters are checked against the
/// closed interval [0, 1], so touching an endpoint counts as a hit.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let denominator = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if denominator == 0.0 {
        return false;
    }

    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denominator;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denominator;

    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}

/// Result of stepping toward a destination at a fixed speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Approach {
    /// Destination is within one step; caller snaps to it
    Arrived,
    /// Still travelling with this per-tick velocity
    Moving(Vec2),
}

/// Per-tick velocity that carries `from` toward `to` at `speed`
pub fn approach(from: Vec2, to: Vec2, speed: f32) -> Approach {
    let delta = to - from;
    let dist = delta.length();
    if dist < speed || dist <= f32::EPSILON {
        Approach::Arrived
    } else {
        Approach::Moving(delta / dist * speed)
    }
}
