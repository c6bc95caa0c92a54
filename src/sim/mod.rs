//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, passed in by the caller
//! - Fixed update order: player, coffee lady, boss
//! - No rendering or platform dependencies

pub mod boss;
pub mod geometry;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod visibility;

pub use boss::update_boss;
pub use geometry::{Approach, Rect, approach, bearing, distance, rect_overlap, segments_intersect};
pub use session::{Session, SessionError, SessionEvent, SessionPhase, TickReport};
pub use snapshot::{ActorView, Snapshot};
pub use state::{
    Actor, Body, Boss, BossState, CoffeeLady, EntityKind, GameEvent, Player, World,
};
pub use tick::{TickInput, tick};
pub use visibility::{VisionCone, can_see};
