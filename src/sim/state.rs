//! Entity records and world state
//!
//! Everything the simulation mutates between ticks lives here. Rendering
//! reads it through `&World` or an owned [`Snapshot`](super::Snapshot).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::office::Level;

/// What an actor is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Boss,
    CoffeeLady,
}

/// Fields every moving character shares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub size: Vec2,
    /// Displacement applied this tick
    pub vel: Vec2,
    /// Base speed in units per tick
    pub speed: f32,
    /// Facing direction (radians)
    pub angle: f32,
}

impl Actor {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            vel: Vec2::ZERO,
            speed,
            angle: 0.0,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Point the actor along its velocity; standing still keeps the old facing
    pub fn face_velocity(&mut self) {
        if self.vel != Vec2::ZERO {
            self.angle = self.vel.y.atan2(self.vel.x);
        }
    }

    /// Apply `vel` for one tick and face along it
    pub fn step(&mut self, vel: Vec2) {
        self.vel = vel;
        self.pos += vel;
        self.face_velocity();
    }

    /// Snap to `pos` and stop
    pub fn arrive(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}

/// Anything with a position and a box: the capability collision and
/// visibility work against.
pub trait Body {
    fn actor(&self) -> &Actor;

    fn bounds(&self) -> Rect {
        self.actor().bounds()
    }

    fn center(&self) -> Vec2 {
        self.actor().center()
    }
}

impl Body for Actor {
    fn actor(&self) -> &Actor {
        self
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub actor: Actor,
    /// Crouching halves movement speed
    pub crouching: bool,
}

impl Body for Player {
    fn actor(&self) -> &Actor {
        &self.actor
    }
}

/// Boss behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    /// Sitting in the office
    Idle,
    /// Wandering the floor looking for slackers
    Searching,
    /// Reserved: nothing transitions here yet
    Chasing,
    /// Walking back to the office
    Returning,
}

/// The patrolling antagonist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub actor: Actor,
    pub state: BossState,
    /// Ticks left in the current state
    pub state_timer: u32,
    /// Where the boss is walking to
    pub target: Option<Vec2>,
    /// Line currently shown over the boss's head
    pub phrase: Option<String>,
    /// Ticks left to show `phrase`
    pub phrase_timer: u32,
}

impl Body for Boss {
    fn actor(&self) -> &Actor {
        &self.actor
    }
}

impl Boss {
    /// Show `line` for `ticks`; `None` or zero ticks clears the bubble
    pub fn say(&mut self, line: Option<String>, ticks: u32) {
        match line {
            Some(line) if ticks > 0 => {
                self.phrase = Some(line);
                self.phrase_timer = ticks;
            }
            _ => {
                self.phrase = None;
                self.phrase_timer = 0;
            }
        }
    }

    /// Count the speech bubble down, clearing it when it expires
    pub fn tick_phrase(&mut self) {
        self.phrase_timer = self.phrase_timer.saturating_sub(1);
        if self.phrase_timer == 0 {
            self.phrase = None;
        }
    }
}

/// The coffee lady walking her fixed route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeLady {
    pub actor: Actor,
    /// Index of the waypoint she is heading for
    pub patrol_index: usize,
    /// Ticks left standing at the current waypoint
    pub wait_ticks: u32,
}

impl Body for CoffeeLady {
    fn actor(&self) -> &Actor {
        &self.actor
    }
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BossStateChanged { from: BossState, to: BossState },
    BossSpoke { phrase: String },
    /// The boss spotted the player outside a safe room
    PlayerCaught { phrase: String },
}

/// All mutable simulation state for one play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Simulation tick counter since session start
    pub time_ticks: u64,
    pub player: Player,
    pub boss: Boss,
    pub coffee_lady: CoffeeLady,
    /// Next entity ID
    next_id: u32,
}

impl World {
    /// Place every entity at its starting point for `level`
    pub fn spawn<R: Rng + ?Sized>(level: &Level, rng: &mut R) -> Self {
        let tuning = &level.tuning;
        let mut world = Self {
            time_ticks: 0,
            player: Player {
                actor: Actor::new(
                    0,
                    EntityKind::Player,
                    tuning.player_spawn,
                    tuning.player_size,
                    tuning.player_speed,
                ),
                crouching: false,
            },
            boss: Boss {
                actor: Actor::new(
                    0,
                    EntityKind::Boss,
                    tuning.office_anchor,
                    tuning.boss_size,
                    tuning.boss_speed,
                ),
                state: BossState::Idle,
                state_timer: tuning.first_idle_ticks.sample(rng),
                target: None,
                phrase: None,
                phrase_timer: 0,
            },
            coffee_lady: CoffeeLady {
                actor: Actor::new(
                    0,
                    EntityKind::CoffeeLady,
                    level.floorplan.coffee_path.first().copied().unwrap_or(Vec2::ZERO),
                    tuning.coffee_lady_size,
                    tuning.coffee_lady_speed,
                ),
                patrol_index: 0,
                wait_ticks: 0,
            },
            next_id: 1,
        };
        world.boss.actor.angle = tuning.boss_facing;

        world.player.actor.id = world.next_entity_id();
        world.boss.actor.id = world.next_entity_id();
        world.coffee_lady.actor.id = world.next_entity_id();

        log::debug!(
            "Spawned world: boss idles for {} ticks",
            world.boss.state_timer
        );
        world
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whole seconds survived since the session started
    pub fn score(&self) -> u64 {
        self.time_ticks / u64::from(crate::consts::TICKS_PER_SECOND)
    }
}
