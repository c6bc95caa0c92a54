//! Session lifecycle: NotStarted → Running → Ended → NotStarted
//!
//! The session owns the world, the static level and the seeded RNG, and only
//! lets the simulation tick while running.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{GameEvent, World};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::office::Level;
use crate::tuning::TuningError;

/// Coarse game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen, waiting for the shift to start
    NotStarted,
    /// Simulation ticking
    Running,
    /// Player was caught
    Ended,
}

/// Session state change notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started,
    /// Back on the title screen after a run
    Reset,
    /// Run over; carries what the boss said
    Ended { phrase: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot {action} a session that is {phase:?}")]
    IllegalTransition {
        phase: SessionPhase,
        action: &'static str,
    },
}

/// Result of advancing the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Simulation ticks actually run
    pub ticks: u32,
    pub events: Vec<GameEvent>,
    /// Set when this advance ended the session
    pub transition: Option<SessionEvent>,
}

/// A single play-through
#[derive(Debug, Clone)]
pub struct Session {
    level: Level,
    world: World,
    rng: Pcg32,
    seed: u64,
    phase: SessionPhase,
    final_phrase: Option<String>,
    /// Unsimulated time carried between frames
    accumulator: f32,
}

impl Session {
    /// Create a session on the title screen. Fails if the level's tuning
    /// does not validate.
    pub fn new(level: Level, seed: u64) -> Result<Self, TuningError> {
        level.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::spawn(&level, &mut rng);
        log::info!("Session created with seed: {}", seed);
        Ok(Self {
            level,
            world,
            rng,
            seed,
            phase: SessionPhase::NotStarted,
            final_phrase: None,
            accumulator: 0.0,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only world for rendering
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Whole seconds survived in the current run
    pub fn score(&self) -> u64 {
        self.world.score()
    }

    /// What the boss said when the last run ended
    pub fn final_phrase(&self) -> Option<&str> {
        self.final_phrase.as_deref()
    }

    /// NotStarted → Running
    pub fn start(&mut self) -> Result<SessionEvent, SessionError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(self.illegal("start"));
        }
        self.reset_world();
        self.phase = SessionPhase::Running;
        log::info!("Shift started");
        Ok(SessionEvent::Started)
    }

    /// Ended → NotStarted
    pub fn restart(&mut self) -> Result<SessionEvent, SessionError> {
        if self.phase != SessionPhase::Ended {
            return Err(self.illegal("restart"));
        }
        self.reset_world();
        self.phase = SessionPhase::NotStarted;
        log::info!("Session reset");
        Ok(SessionEvent::Reset)
    }

    /// Run one simulation tick. Outside `Running` this does nothing.
    pub fn advance(&mut self, input: &TickInput) -> TickReport {
        let mut report = TickReport::default();
        self.advance_into(input, &mut report);
        report
    }

    /// Run as many fixed ticks as `dt` seconds of wall time cover, capped at
    /// `MAX_SUBSTEPS`. The same input snapshot feeds every tick. A
    /// non-finite `dt` counts as no time passing.
    pub fn update(&mut self, dt: f32, input: &TickInput) -> TickReport {
        let mut report = TickReport::default();
        if self.phase != SessionPhase::Running {
            return report;
        }

        let dt = if dt.is_finite() {
            dt.min(0.1).max(0.0)
        } else {
            0.0
        };
        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.advance_into(input, &mut report);
            if self.phase != SessionPhase::Running {
                break;
            }
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        report
    }

    fn advance_into(&mut self, input: &TickInput, report: &mut TickReport) {
        if self.phase != SessionPhase::Running {
            return;
        }

        let events = tick(&mut self.world, &self.level, input, &mut self.rng);
        report.ticks += 1;

        let caught = events.iter().find_map(|event| match event {
            GameEvent::PlayerCaught { phrase } => Some(phrase.clone()),
            _ => None,
        });
        report.events.extend(events);

        if let Some(phrase) = caught {
            log::info!("Caught after {}s: \"{}\"", self.score(), phrase);
            self.phase = SessionPhase::Ended;
            self.final_phrase = Some(phrase.clone());
            report.transition = Some(SessionEvent::Ended { phrase });
        }
    }

    /// Put every entity back at its start and zero the clock
    fn reset_world(&mut self) {
        self.world = World::spawn(&self.level, &mut self.rng);
        self.accumulator = 0.0;
        if self.phase != SessionPhase::Ended {
            self.final_phrase = None;
        }
    }

    fn illegal(&self, action: &'static str) -> SessionError {
        log::warn!("Ignoring {} while {:?}", action, self.phase);
        SessionError::IllegalTransition {
            phase: self.phase,
            action,
        }
    }
}
