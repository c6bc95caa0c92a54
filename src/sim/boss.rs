//! Boss behaviour: idle in the office, search the floor, walk back
//!
//! Idle ──timer──▶ Searching ──timer──▶ Returning ──arrival──▶ Idle
//!
//! While searching the boss looks for the player every tick; being seen
//! outside a safe room ends the run.

use rand::Rng;

use super::geometry::{Approach, approach};
use super::state::{Body, Boss, BossState, GameEvent, Player};
use super::visibility::can_see;
use crate::office::Level;

impl Boss {
    fn enter(&mut self, to: BossState, timer: u32, events: &mut Vec<GameEvent>) {
        let from = self.state;
        self.state = to;
        self.state_timer = timer;
        log::info!("Boss {:?} -> {:?} ({} ticks)", from, to, timer);
        events.push(GameEvent::BossStateChanged { from, to });
    }

    fn announce(&mut self, line: Option<String>, ticks: u32, events: &mut Vec<GameEvent>) {
        self.say(line, ticks);
        if let Some(phrase) = &self.phrase {
            events.push(GameEvent::BossSpoke {
                phrase: phrase.clone(),
            });
        }
    }
}

/// Advance the boss state machine by one tick
pub fn update_boss<R: Rng + ?Sized>(
    boss: &mut Boss,
    player: &Player,
    level: &Level,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let tuning = &level.tuning;

    match boss.state {
        BossState::Idle => {
            boss.actor.vel = glam::Vec2::ZERO;
            boss.state_timer = boss.state_timer.saturating_sub(1);
            if boss.state_timer == 0 {
                boss.enter(BossState::Searching, tuning.search_ticks, events);
                let line = level.phrases.pick(rng).map(str::to_owned);
                boss.announce(line, tuning.search_phrase_ticks, events);
                boss.target = Some(tuning.doorway);
            }
        }

        BossState::Searching => {
            boss.state_timer = boss.state_timer.saturating_sub(1);

            let target = match boss.target {
                Some(target) => target,
                None => {
                    let target = tuning.search_area.random_point(rng);
                    log::debug!("Boss heading to ({:.0}, {:.0})", target.x, target.y);
                    boss.target = Some(target);
                    target
                }
            };

            match approach(boss.actor.pos, target, boss.actor.speed) {
                Approach::Arrived => {
                    boss.actor.arrive(target);
                    boss.target = None;
                }
                Approach::Moving(vel) => boss.actor.step(vel),
            }

            let spotted = can_see(
                boss,
                player,
                level.floorplan.sight_blockers(),
                &tuning.vision,
            );
            if spotted {
                if level.floorplan.in_safe_room(&player.bounds()) {
                    log::trace!("Player visible but hiding in a safe room");
                } else {
                    let phrase = boss
                        .phrase
                        .clone()
                        .unwrap_or_else(|| level.phrases.fallback_line.clone());
                    log::info!("Player caught: \"{}\"", phrase);
                    events.push(GameEvent::PlayerCaught { phrase });
                    return;
                }
            }

            if boss.state_timer == 0 {
                boss.enter(BossState::Returning, 0, events);
                boss.target = Some(tuning.office_anchor);
                let line = Some(level.phrases.return_line.clone());
                boss.announce(line, tuning.return_phrase_ticks, events);
            }
        }

        BossState::Returning => {
            let target = *boss.target.get_or_insert(tuning.office_anchor);
            match approach(boss.actor.pos, target, boss.actor.speed) {
                Approach::Arrived => {
                    boss.actor.arrive(target);
                    boss.target = None;
                    let idle = tuning.idle_ticks.sample(rng);
                    boss.enter(BossState::Idle, idle, events);
                }
                Approach::Moving(vel) => boss.actor.step(vel),
            }
        }

        // Reserved state with no behaviour
        BossState::Chasing => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::World;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup(seed: u64) -> (World, Level, Pcg32) {
        let level = Level::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut world = World::spawn(&level, &mut rng);
        // Park the player in the pantry so searches never end the test
        world.player.actor.pos = Vec2::new(40.0, 40.0);
        (world, level, rng)
    }

    fn run_boss(world: &mut World, level: &Level, rng: &mut Pcg32, events: &mut Vec<GameEvent>) {
        update_boss(&mut world.boss, &world.player, level, rng, events);
    }

    #[test]
    fn test_full_cycle_exact_ticks() {
        let (mut world, mut level, mut rng) = setup(11);
        level.tuning.search_ticks = 90;
        world.boss.state_timer = 25;

        let mut visited = vec![world.boss.state];
        let mut events = Vec::new();
        let mut entered_search_at = None;
        let mut entered_return_at = None;

        for t in 1..=2000u32 {
            run_boss(&mut world, &level, &mut rng, &mut events);
            let state = world.boss.state;
            if visited.last() != Some(&state) {
                visited.push(state);
                match state {
                    BossState::Searching => entered_search_at = Some(t),
                    BossState::Returning => entered_return_at = Some(t),
                    _ => {}
                }
            }
            if visited.len() == 4 {
                break;
            }
        }

        assert_eq!(
            visited,
            vec![
                BossState::Idle,
                BossState::Searching,
                BossState::Returning,
                BossState::Idle,
            ]
        );
        assert_eq!(entered_search_at, Some(25));
        assert_eq!(entered_return_at, Some(25 + 90));
        assert_eq!(world.boss.actor.pos, level.tuning.office_anchor);
        assert!((200..=500).contains(&world.boss.state_timer));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::PlayerCaught { .. }))
        );
    }

    #[test]
    fn test_search_start_sets_phrase_and_doorway() {
        let (mut world, level, mut rng) = setup(2);
        world.boss.state_timer = 1;
        let mut events = Vec::new();
        run_boss(&mut world, &level, &mut rng, &mut events);

        assert_eq!(world.boss.state, BossState::Searching);
        assert_eq!(world.boss.state_timer, level.tuning.search_ticks);
        assert_eq!(world.boss.target, Some(level.tuning.doorway));
        assert_eq!(world.boss.phrase_timer, level.tuning.search_phrase_ticks);
        let phrase = world.boss.phrase.clone().expect("boss should speak");
        assert!(level.phrases.lines.contains(&phrase));
        assert_eq!(
            events,
            vec![
                GameEvent::BossStateChanged {
                    from: BossState::Idle,
                    to: BossState::Searching,
                },
                GameEvent::BossSpoke { phrase },
            ]
        );
    }

    #[test]
    fn test_search_moves_and_faces_target() {
        let (mut world, level, mut rng) = setup(4);
        world.boss.state = BossState::Searching;
        world.boss.state_timer = 100;
        world.boss.actor.pos = Vec2::new(100.0, 300.0);
        world.boss.target = Some(Vec2::new(100.0, 400.0));
        let mut events = Vec::new();

        run_boss(&mut world, &level, &mut rng, &mut events);
        assert!((world.boss.actor.pos - Vec2::new(100.0, 301.6)).length() < 1e-4);
        assert!((world.boss.actor.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(world.boss.state_timer, 99);
    }

    #[test]
    fn test_reaching_target_clears_it_and_picks_new_one() {
        let (mut world, level, mut rng) = setup(5);
        world.boss.state = BossState::Searching;
        world.boss.state_timer = 100;
        world.boss.actor.pos = Vec2::new(300.0, 300.0);
        world.boss.target = Some(Vec2::new(301.0, 300.0));
        let mut events = Vec::new();

        run_boss(&mut world, &level, &mut rng, &mut events);
        assert_eq!(world.boss.actor.pos, Vec2::new(301.0, 300.0));
        assert_eq!(world.boss.target, None);

        run_boss(&mut world, &level, &mut rng, &mut events);
        let next = world.boss.target.expect("new random target");
        let area = level.tuning.search_area;
        assert!(next.x >= area.pos.x && next.x <= area.right());
        assert!(next.y >= area.pos.y && next.y <= area.bottom());
    }

    #[test]
    fn test_catch_uses_current_or_fallback_phrase() {
        let (mut world, level, mut rng) = setup(6);
        world.boss.state = BossState::Searching;
        world.boss.state_timer = 100;
        world.boss.actor.pos = Vec2::new(400.0, 150.0);
        world.boss.target = Some(Vec2::new(400.0, 250.0));
        world.player.actor.pos = Vec2::new(400.0, 260.0);

        let mut events = Vec::new();
        world.boss.say(Some("Is this scalable?".to_owned()), 50);
        run_boss(&mut world, &level, &mut rng, &mut events);
        assert_eq!(
            events,
            vec![GameEvent::PlayerCaught {
                phrase: "Is this scalable?".to_owned(),
            }]
        );

        events.clear();
        world.boss.say(None, 0);
        run_boss(&mut world, &level, &mut rng, &mut events);
        assert_eq!(
            events,
            vec![GameEvent::PlayerCaught {
                phrase: "Gotcha!".to_owned(),
            }]
        );
    }

    #[test]
    fn test_idle_boss_never_catches() {
        let (mut world, level, mut rng) = setup(7);
        world.boss.state_timer = 500;
        world.boss.actor.angle = std::f32::consts::FRAC_PI_2;
        // Directly in front of the boss, close by
        world.player.actor.pos = world.boss.actor.pos + Vec2::new(0.0, 40.0);
        let mut events = Vec::new();
        for _ in 0..100 {
            run_boss(&mut world, &level, &mut rng, &mut events);
        }
        assert!(events.is_empty());
        assert_eq!(world.boss.state, BossState::Idle);
    }

    #[test]
    fn test_returning_without_target_heads_to_office() {
        let (mut world, level, mut rng) = setup(8);
        world.boss.state = BossState::Returning;
        world.boss.target = None;
        world.boss.actor.pos = Vec2::new(380.0, 140.0);
        let mut events = Vec::new();
        run_boss(&mut world, &level, &mut rng, &mut events);
        assert_eq!(world.boss.target, Some(level.tuning.office_anchor));
        assert!(world.boss.actor.pos.y < 140.0);
    }

    #[test]
    fn test_chasing_is_inert() {
        let (mut world, level, mut rng) = setup(9);
        world.boss.state = BossState::Chasing;
        let before = world.boss.clone();
        let mut events = Vec::new();
        run_boss(&mut world, &level, &mut rng, &mut events);
        assert_eq!(world.boss, before);
        assert!(events.is_empty());
    }
}
