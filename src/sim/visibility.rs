//! Field-of-view detection
//!
//! A viewer sees a target when the target is close enough, inside the
//! viewer's cone, and the straight line between their centers crosses no
//! obstacle edge.

use serde::{Deserialize, Serialize};

use super::geometry::{Rect, bearing, distance, segments_intersect};
use super::state::Body;
use crate::normalize_angle;

/// Vision cone configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionCone {
    /// Maximum view distance
    pub distance: f32,
    /// Full opening angle in radians
    pub angle: f32,
}

impl Default for VisionCone {
    fn default() -> Self {
        Self {
            distance: 250.0,
            angle: std::f32::consts::FRAC_PI_3, // 60 degrees
        }
    }
}

impl VisionCone {
    #[inline]
    pub fn half_angle(&self) -> f32 {
        self.angle / 2.0
    }

    /// Whether `target_bearing` lies inside the cone when facing `facing`
    pub fn contains_bearing(&self, facing: f32, target_bearing: f32) -> bool {
        normalize_angle(target_bearing - facing).abs() <= self.half_angle()
    }
}

/// Can `viewer` see `target`?
///
/// Distance and angle are measured between the two anchor positions; the
/// occlusion ray runs between the bounding-box centers. Pure: zone-based
/// immunity such as safe rooms is the caller's business.
pub fn can_see<'a, V, T, I>(viewer: &V, target: &T, obstacles: I, cone: &VisionCone) -> bool
where
    V: Body + ?Sized,
    T: Body + ?Sized,
    I: IntoIterator<Item = &'a Rect>,
{
    let eye = viewer.actor();
    let body = target.actor();

    if distance(eye.pos, body.pos) > cone.distance {
        return false;
    }

    if !cone.contains_bearing(eye.angle, bearing(eye.pos, body.pos)) {
        return false;
    }

    let from = eye.center();
    let to = body.center();
    !obstacles.into_iter().any(|obstacle| {
        obstacle
            .edges()
            .iter()
            .any(|&(a, b)| segments_intersect(from, to, a, b))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Actor, EntityKind};
    use glam::Vec2;
    use std::f32::consts::PI;

    const NO_OBSTACLES: [Rect; 0] = [];

    fn actor_at(kind: EntityKind, x: f32, y: f32, angle: f32) -> Actor {
        let mut actor = Actor::new(0, kind, Vec2::new(x, y), Vec2::new(30.0, 30.0), 1.0);
        actor.angle = angle;
        actor
    }

    #[test]
    fn test_out_of_range_is_invisible() {
        let boss = actor_at(EntityKind::Boss, 0.0, 0.0, 0.0);
        let player = actor_at(EntityKind::Player, 300.0, 0.0, 0.0);
        assert!(!can_see(&boss, &player, &NO_OBSTACLES, &VisionCone::default()));

        let near = actor_at(EntityKind::Player, 240.0, 0.0, 0.0);
        assert!(can_see(&boss, &near, &NO_OBSTACLES, &VisionCone::default()));
    }

    #[test]
    fn test_target_behind_is_invisible() {
        let boss = actor_at(EntityKind::Boss, 200.0, 100.0, 0.0);
        let behind = actor_at(EntityKind::Player, 100.0, 100.0, 0.0);
        assert!(!can_see(&boss, &behind, &NO_OBSTACLES, &VisionCone::default()));

        // Turn around and the same target is plainly visible
        let turned = actor_at(EntityKind::Boss, 200.0, 100.0, PI);
        assert!(can_see(&turned, &behind, &NO_OBSTACLES, &VisionCone::default()));
    }

    #[test]
    fn test_cone_edge() {
        let cone = VisionCone::default();
        assert!(cone.contains_bearing(0.0, cone.half_angle() - 0.01));
        assert!(!cone.contains_bearing(0.0, cone.half_angle() + 0.01));
        // Wraparound: facing just below π, target just above -π
        assert!(cone.contains_bearing(PI - 0.05, -PI + 0.05));
    }

    #[test]
    fn test_obstacle_blocks_line_of_sight() {
        let boss = actor_at(EntityKind::Boss, 0.0, 100.0, 0.0);
        let player = actor_at(EntityKind::Player, 200.0, 100.0, 0.0);
        let desk = Rect::new(80.0, 60.0, 40.0, 80.0);
        assert!(!can_see(&boss, &player, &[desk], &VisionCone::default()));

        // Same desk slid off the sight line
        let moved = desk.at(Vec2::new(80.0, 200.0));
        assert!(can_see(&boss, &player, &[moved], &VisionCone::default()));
    }

    #[test]
    fn test_any_obstacle_in_list_blocks() {
        let boss = actor_at(EntityKind::Boss, 0.0, 100.0, 0.0);
        let player = actor_at(EntityKind::Player, 200.0, 100.0, 0.0);
        let clear = Rect::new(0.0, 400.0, 10.0, 10.0);
        let wall = Rect::new(150.0, 0.0, 10.0, 300.0);
        assert!(!can_see(&boss, &player, &[clear, wall], &VisionCone::default()));
    }
}
