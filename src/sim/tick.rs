//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boss::update_boss;
use super::geometry::{Approach, Rect, approach, rect_overlap};
use super::state::{CoffeeLady, GameEvent, Player, World};
use crate::office::Level;

/// Input commands for a single tick (deterministic)
///
/// A snapshot of which directions are held, taken once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Crouch held (halves speed)
    pub crouch: bool,
}

impl TickInput {
    /// Unit-per-axis direction. Opposite keys do not cancel: down and right
    /// win, matching the order the keys are read in.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y = -1.0;
        }
        if self.down {
            dir.y = 1.0;
        }
        if self.left {
            dir.x = -1.0;
        }
        if self.right {
            dir.x = 1.0;
        }
        dir
    }
}

/// Advance the world by one fixed timestep
pub fn tick<R: Rng + ?Sized>(
    world: &mut World,
    level: &Level,
    input: &TickInput,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    world.time_ticks += 1;

    move_player(&mut world.player, level, input);
    advance_patrol(
        &mut world.coffee_lady,
        &level.floorplan.coffee_path,
        level.tuning.patrol_wait_ticks,
    );

    world.boss.tick_phrase();
    update_boss(&mut world.boss, &world.player, level, rng, &mut events);

    events
}

/// Move the player one tick, sliding along whatever blocks a single axis
fn move_player(player: &mut Player, level: &Level, input: &TickInput) {
    let tuning = &level.tuning;
    let actor = &mut player.actor;

    player.crouching = input.crouch;
    let speed = if player.crouching {
        actor.speed * tuning.crouch_factor
    } else {
        actor.speed
    };
    actor.vel = input.direction() * speed;

    let max = (tuning.playfield - actor.size).max(Vec2::ZERO);
    let next = (actor.pos + actor.vel).clamp(Vec2::ZERO, max);

    // Test each axis on its own so a desk blocking X still lets Y through
    let try_x = Rect::from_pos_size(Vec2::new(next.x, actor.pos.y), actor.size);
    let try_y = Rect::from_pos_size(Vec2::new(actor.pos.x, next.y), actor.size);
    let blocked_x = level.floorplan.colliders().any(|r| rect_overlap(&try_x, r));
    let blocked_y = level.floorplan.colliders().any(|r| rect_overlap(&try_y, r));

    if !blocked_x {
        actor.pos.x = next.x;
    }
    if !blocked_y {
        actor.pos.y = next.y;
    }

    actor.face_velocity();
}

/// Walk the coffee route: head for the waypoint, pause, move on
fn advance_patrol(lady: &mut CoffeeLady, path: &[Vec2], wait_ticks: u32) {
    if lady.wait_ticks > 0 {
        lady.wait_ticks -= 1;
        lady.actor.vel = Vec2::ZERO;
        return;
    }

    if path.is_empty() {
        lady.actor.vel = Vec2::ZERO;
        return;
    }
    let index = lady.patrol_index % path.len();
    let Some(&waypoint) = path.get(index) else {
        return;
    };

    match approach(lady.actor.pos, waypoint, lady.actor.speed) {
        Approach::Arrived => {
            lady.actor.arrive(waypoint);
            lady.patrol_index = (index + 1) % path.len();
            lady.wait_ticks = wait_ticks;
        }
        Approach::Moving(vel) => {
            lady.patrol_index = index;
            lady.actor.step(vel);
        }
    }
}
