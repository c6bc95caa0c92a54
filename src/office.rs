//! Static level data: floorplan, rooms and the boss's phrase book
//!
//! None of this changes while a session runs. The default office is the
//! shipped 800x600 floor; callers may build or deserialize their own.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::geometry::{Rect, rect_overlap};
use crate::tuning::{Tuning, TuningError};

/// Wall thickness of the default office
pub const WALL_THICKNESS: f32 = 10.0;
/// Display height of walls (ignored by the simulation)
pub const WALL_HEIGHT: f32 = 100.0;
/// Display height of desks (ignored by the simulation)
pub const DESK_HEIGHT: f32 = 40.0;

/// An immovable box: a desk or a wall segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Extrusion height for the isometric renderer
    pub height: f32,
}

impl Obstacle {
    pub const fn wall(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            height: WALL_HEIGHT,
        }
    }

    pub const fn desk(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            height: DESK_HEIGHT,
        }
    }
}

/// Named areas of the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomKind {
    BossOffice,
    Pantry,
    Restroom,
    Exit,
}

impl RoomKind {
    /// Rooms where the boss cannot catch the player
    pub fn is_safe(&self) -> bool {
        matches!(self, RoomKind::Pantry | RoomKind::Restroom)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoomKind::BossOffice => "BOSS",
            RoomKind::Pantry => "PANTRY",
            RoomKind::Restroom => "WC",
            RoomKind::Exit => "EXIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub kind: RoomKind,
    pub rect: Rect,
}

/// Walls, desks, rooms and the coffee route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floorplan {
    pub walls: Vec<Obstacle>,
    pub desks: Vec<Obstacle>,
    pub rooms: Vec<Room>,
    /// Coffee lady waypoints, walked in order and wrapped
    pub coffee_path: Vec<Vec2>,
}

impl Default for Floorplan {
    fn default() -> Self {
        Self::office()
    }
}

impl Floorplan {
    /// The shipped office layout
    pub fn office() -> Self {
        let boss_office = Rect::new(300.0, 0.0, 200.0, 100.0);
        let pantry = Rect::new(0.0, 0.0, 150.0, 150.0);
        let restroom = Rect::new(650.0, 0.0, 150.0, 150.0);
        let exit = Rect::new(350.0, 580.0, 100.0, 20.0);
        let t = WALL_THICKNESS;

        let walls = vec![
            // Outer bounds (back and left only, front stays open for the camera)
            Obstacle::wall(-10.0, -10.0, 820.0, t),
            Obstacle::wall(-10.0, -10.0, t, 620.0),
            // Boss office sides
            Obstacle::wall(boss_office.pos.x, 0.0, t, boss_office.size.y),
            Obstacle::wall(boss_office.right() - t, 0.0, t, boss_office.size.y),
            // Boss office front, split by the door
            Obstacle::wall(boss_office.pos.x, boss_office.bottom(), 80.0, t),
            Obstacle::wall(boss_office.pos.x + 120.0, boss_office.bottom(), 80.0, t),
            // Pantry east wall and split front
            Obstacle::wall(pantry.right() - t, 0.0, t, pantry.size.y),
            Obstacle::wall(0.0, pantry.bottom(), 50.0, t),
            Obstacle::wall(100.0, pantry.bottom(), 50.0, t),
            // Restroom west wall and split front
            Obstacle::wall(restroom.pos.x, 0.0, t, restroom.size.y),
            Obstacle::wall(restroom.pos.x, restroom.bottom(), 50.0, t),
            Obstacle::wall(restroom.pos.x + 100.0, restroom.bottom(), 50.0, t),
        ];

        let desks = vec![
            Obstacle::desk(150.0, 200.0, 120.0, 80.0),
            Obstacle::desk(530.0, 200.0, 120.0, 80.0),
            Obstacle::desk(150.0, 400.0, 120.0, 80.0),
            Obstacle::desk(530.0, 400.0, 120.0, 80.0),
        ];

        let rooms = vec![
            Room {
                kind: RoomKind::BossOffice,
                rect: boss_office,
            },
            Room {
                kind: RoomKind::Pantry,
                rect: pantry,
            },
            Room {
                kind: RoomKind::Restroom,
                rect: restroom,
            },
            Room {
                kind: RoomKind::Exit,
                rect: exit,
            },
        ];

        let coffee_path = vec![
            Vec2::new(100.0, 300.0),
            Vec2::new(300.0, 300.0),
            Vec2::new(500.0, 300.0),
            Vec2::new(700.0, 300.0),
            Vec2::new(700.0, 500.0),
            Vec2::new(400.0, 500.0),
            Vec2::new(100.0, 500.0),
        ];

        Self {
            walls,
            desks,
            rooms,
            coffee_path,
        }
    }

    /// Boxes the player cannot walk through
    pub fn colliders(&self) -> impl Iterator<Item = &Rect> {
        self.desks.iter().chain(&self.walls).map(|o| &o.rect)
    }

    /// Boxes that break the boss's line of sight (desks only)
    pub fn sight_blockers(&self) -> impl Iterator<Item = &Rect> {
        self.desks.iter().map(|o| &o.rect)
    }

    pub fn room(&self, kind: RoomKind) -> Option<&Room> {
        self.rooms.iter().find(|r| r.kind == kind)
    }

    /// Whether `bounds` touches the inside of any safe room
    pub fn in_safe_room(&self, bounds: &Rect) -> bool {
        self.rooms
            .iter()
            .any(|room| room.kind.is_safe() && rect_overlap(bounds, &room.rect))
    }
}

/// What the boss says
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseBook {
    /// Lines picked at random when a search begins
    pub lines: Vec<String>,
    /// Said when heading back to the office
    pub return_line: String,
    /// Used as the game-over line when nothing is being said
    pub fallback_line: String,
}

impl Default for PhraseBook {
    fn default() -> Self {
        let lines = [
            "Need same last week sheet!",
            "Buy Ice Cream to my Dog!",
            "I Need round paper!",
            "I need a feedback!",
            "Get pocket lint for me!",
            "Where is the synergy?",
            "Let's circle back!",
            "We need to pivot!",
            "Think outside the box!",
            "Is this scalable?",
            "I need this ASAP!",
        ];
        Self {
            lines: lines.iter().map(|s| (*s).to_owned()).collect(),
            return_line: "Back to strategy...".to_owned(),
            fallback_line: "Gotcha!".to_owned(),
        }
    }
}

impl PhraseBook {
    /// A random line, or `None` for an empty book
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.lines.is_empty() {
            return None;
        }
        self.lines
            .get(rng.random_range(0..self.lines.len()))
            .map(String::as_str)
    }
}

/// Everything static a session runs against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level {
    pub tuning: Tuning,
    pub floorplan: Floorplan,
    pub phrases: PhraseBook,
}

impl Level {
    pub fn with_tuning(tuning: Tuning) -> Self {
        Self {
            tuning,
            ..Self::default()
        }
    }

    /// Check the tuning before a session runs against it.
    ///
    /// Levels deserialized whole, or built with [`Level::with_tuning`], skip
    /// the check `Tuning::from_json` does.
    pub fn validate(&self) -> Result<(), TuningError> {
        self.tuning.validate()
    }
}
