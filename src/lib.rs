//! Corporative Hide & Seek - office stealth game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, boss AI, line of sight, session)
//! - `office`: Static floorplan and phrase data the simulation consumes
//! - `tuning`: Data-driven game balance
//! - `logging`: Native logger setup

#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod office;
pub mod sim;
pub mod tuning;

pub use office::{Floorplan, Level, PhraseBook};
pub use sim::{GameEvent, Session, SessionEvent, SessionPhase, TickInput};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate; one tick per display refresh
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum ticks run for one frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions
    pub const FLOOR_WIDTH: f32 = 800.0;
    pub const FLOOR_HEIGHT: f32 = 600.0;
}

/// Normalize an angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return angle;
    }
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}
