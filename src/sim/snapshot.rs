//! Owned, serializable view of a world for renderers
//!
//! Renderers living in the same process can borrow `&World` directly; this
//! copy is for those on the other side of a JSON or FFI boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Actor, BossState, EntityKind, World};

/// Placement of one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub angle: f32,
}

impl From<&Actor> for ActorView {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            kind: actor.kind,
            pos: actor.pos,
            size: actor.size,
            angle: actor.angle,
        }
    }
}

/// One frame's worth of drawable state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    /// Whole seconds survived
    pub score: u64,
    pub player: ActorView,
    pub crouching: bool,
    pub boss: ActorView,
    pub boss_state: BossState,
    pub boss_phrase: Option<String>,
    pub coffee_lady: ActorView,
    pub patrol_index: usize,
}

impl World {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            score: self.score(),
            player: ActorView::from(&self.player.actor),
            crouching: self.player.crouching,
            boss: ActorView::from(&self.boss.actor),
            boss_state: self.boss.state,
            boss_phrase: self.boss.phrase.clone(),
            coffee_lady: ActorView::from(&self.coffee_lady.actor),
            patrol_index: self.coffee_lady.patrol_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::office::Level;
    use rand::SeedableRng;

    #[test]
    fn test_snapshot_mirrors_world() {
        let mut rng = rand_pcg::Pcg32::seed_from_u64(21);
        let mut world = World::spawn(&Level::default(), &mut rng);
        world.time_ticks = 125;
        world.boss.say(Some("We need to pivot!".to_owned()), 10);

        let snap = world.snapshot();
        assert_eq!(snap.tick, 125);
        assert_eq!(snap.score, 2);
        assert_eq!(snap.player.pos, world.player.actor.pos);
        assert_eq!(snap.boss.kind, EntityKind::Boss);
        assert_eq!(snap.boss_state, BossState::Idle);
        assert_eq!(snap.boss_phrase.as_deref(), Some("We need to pivot!"));
        assert_eq!(snap.coffee_lady.size, Vec2::splat(28.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut rng = rand_pcg::Pcg32::seed_from_u64(22);
        let world = World::spawn(&Level::default(), &mut rng);
        let json = serde_json::to_value(world.snapshot()).expect("serialize");
        assert_eq!(json["boss_state"], "Idle");
        assert_eq!(json["player"]["kind"], "Player");
        assert_eq!(json["boss_phrase"], serde_json::Value::Null);
    }
}
