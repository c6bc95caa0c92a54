//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives in [`Tuning`]. Defaults
//! reproduce the shipped game; a JSON file may override any subset of fields.

use std::path::{Path, PathBuf};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FLOOR_HEIGHT, FLOOR_WIDTH};
use crate::sim::geometry::Rect;
use crate::sim::visibility::VisionCone;

/// Errors raised while loading or checking tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Inclusive range of tick counts, sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    pub min: u32,
    pub max: u32,
}

impl TickRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Sample a duration; an inverted range is read with its bounds swapped
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let lo = self.min.min(self.max);
        let hi = self.min.max(self.max);
        rng.random_range(lo..=hi)
    }
}

/// Game balance parameters (all durations in ticks, speeds in units/tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield extent; the player is clamped inside it
    pub playfield: Vec2,

    // === Player ===
    pub player_spawn: Vec2,
    pub player_size: Vec2,
    pub player_speed: f32,
    /// Speed multiplier while crouching
    pub crouch_factor: f32,

    // === Boss ===
    pub boss_size: Vec2,
    pub boss_speed: f32,
    /// Initial facing (radians); π/2 looks down into the office floor
    pub boss_facing: f32,
    /// Desk spot inside the office; spawn point and return destination
    pub office_anchor: Vec2,
    /// First destination after leaving the office
    pub doorway: Vec2,
    /// Region random search targets are drawn from
    pub search_area: Rect,
    pub vision: VisionCone,
    pub search_ticks: u32,
    /// Idle time before the first patrol of a session
    pub first_idle_ticks: TickRange,
    /// Idle time after returning to the office
    pub idle_ticks: TickRange,
    pub search_phrase_ticks: u32,
    pub return_phrase_ticks: u32,

    // === Coffee lady ===
    pub coffee_lady_size: Vec2,
    pub coffee_lady_speed: f32,
    pub patrol_wait_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield: Vec2::new(FLOOR_WIDTH, FLOOR_HEIGHT),

            player_spawn: Vec2::new(400.0, 300.0),
            player_size: Vec2::new(30.0, 30.0),
            player_speed: 2.0,
            crouch_factor: 0.5,

            boss_size: Vec2::new(32.0, 32.0),
            boss_speed: 1.6,
            boss_facing: std::f32::consts::FRAC_PI_2,
            office_anchor: Vec2::new(380.0, 40.0),
            doorway: Vec2::new(400.0, 200.0),
            search_area: Rect::new(50.0, 150.0, FLOOR_WIDTH - 100.0, FLOOR_HEIGHT - 200.0),
            vision: VisionCone::default(),
            search_ticks: 30 * 60,
            first_idle_ticks: TickRange::new(100, 300),
            idle_ticks: TickRange::new(200, 500),
            search_phrase_ticks: 180,
            return_phrase_ticks: 120,

            coffee_lady_size: Vec2::new(28.0, 28.0),
            coffee_lady_speed: 0.75,
            patrol_wait_ticks: 60,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn from_path(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        positive_vec("playfield", self.playfield)?;
        positive_vec("player_size", self.player_size)?;
        positive_vec("boss_size", self.boss_size)?;
        positive_vec("coffee_lady_size", self.coffee_lady_size)?;

        positive("player_speed", self.player_speed)?;
        positive("boss_speed", self.boss_speed)?;
        positive("coffee_lady_speed", self.coffee_lady_speed)?;
        positive("vision.distance", self.vision.distance)?;

        if !(self.crouch_factor > 0.0 && self.crouch_factor <= 1.0) {
            return Err(invalid("crouch_factor", "must be in (0, 1]"));
        }
        if !(self.vision.angle > 0.0 && self.vision.angle <= std::f32::consts::TAU) {
            return Err(invalid("vision.angle", "must be in (0, 2π]"));
        }
        if self.search_ticks == 0 {
            return Err(invalid("search_ticks", "must be at least one tick"));
        }
        for (field, range) in [
            ("first_idle_ticks", self.first_idle_ticks),
            ("idle_ticks", self.idle_ticks),
        ] {
            if range.min > range.max {
                return Err(invalid(
                    field,
                    format!("min {} exceeds max {}", range.min, range.max),
                ));
            }
        }
        if self.search_area.size.x < 0.0 || self.search_area.size.y < 0.0 {
            return Err(invalid("search_area", "size must not be negative"));
        }
        if self.player_size.x > self.playfield.x || self.player_size.y > self.playfield.y {
            return Err(invalid("player_size", "player does not fit in the playfield"));
        }
        let spawn_max = self.playfield - self.player_size;
        if !self.player_spawn.is_finite()
            || self.player_spawn.cmplt(Vec2::ZERO).any()
            || self.player_spawn.cmpgt(spawn_max).any()
        {
            return Err(invalid(
                "player_spawn",
                format!("{} lies outside the playfield", self.player_spawn),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a positive number, got {value}")))
    }
}

fn positive_vec(field: &'static str, value: Vec2) -> Result<(), TuningError> {
    if value.is_finite() && value.x > 0.0 && value.y > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected positive extents, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let tuning = Tuning::from_json(r#"{ "boss_speed": 2.5, "search_ticks": 600 }"#)
            .expect("partial override should parse");
        assert_eq!(tuning.boss_speed, 2.5);
        assert_eq!(tuning.search_ticks, 600);
        assert_eq!(tuning.player_speed, Tuning::default().player_speed);
        assert_eq!(tuning.vision, VisionCone::default());
    }

    #[test]
    fn test_roundtrip_through_json() {
        let json = serde_json::to_string(&Tuning::default()).expect("serialize");
        let back = Tuning::from_json(&json).expect("parse");
        assert_eq!(back, Tuning::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "boss_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "boss_speed", .. }));

        let err =
            Tuning::from_json(r#"{ "idle_ticks": { "min": 500, "max": 200 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "idle_ticks", .. }));

        let err = Tuning::from_json(r#"{ "vision": { "distance": 250.0, "angle": 7.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "vision.angle", .. }));

        let err = Tuning::from_json(r#"{ "player_spawn": [790.0, 300.0] }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "player_spawn", .. }));

        let err = Tuning::from_json(r#"{ "player_spawn": [-1.0, 300.0] }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "player_spawn", .. }));

        // Flush against the far corner is still inside
        assert!(Tuning::from_json(r#"{ "player_spawn": [770.0, 570.0] }"#).is_ok());

        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_tick_range_sample_bounds() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
        let range = TickRange::new(200, 500);
        for _ in 0..100 {
            let t = range.sample(&mut rng);
            assert!((200..=500).contains(&t));
        }
        assert_eq!(TickRange::new(7, 7).sample(&mut rng), 7);
        let swapped = TickRange::new(9, 3).sample(&mut rng);
        assert!((3..=9).contains(&swapped));
    }
}
