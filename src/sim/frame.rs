//! Per-frame update driver
//!
//! Invoked once per display frame by the render-loop collaborator with the
//! current elapsed time. Frame order is fixed: apply input, advance
//! projectiles, spawn targets, resolve collisions, apply scoring and level
//! rules, check the terminal condition. Outside of Playing only the
//! start/reset actions are honored; the callback itself is never
//! unregistered, the phase guards do the gating.

use super::collision::resolve_hits;
use super::state::{GameEvent, GameSession, SessionPhase, Target};
use crate::consts::*;

/// Input snapshot for a single frame (see `InputState::take_frame_input`)
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Accumulated look angles, read once at frame start
    pub yaw: f32,
    pub pitch: f32,
    /// Fire edges since the previous frame; one bullet each
    pub fire_shots: u32,
    /// Start action (Space / menu button)
    pub start: bool,
    /// Quit action (Escape)
    pub end: bool,
    /// Return-to-menu action
    pub reset: bool,
}

/// What a frame produced
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Clamped frame delta actually applied
    pub dt: f32,
    pub events: Vec<GameEvent>,
}

/// Advance the session by one display frame
pub fn advance_frame(session: &mut GameSession, input: &FrameInput, now: f32) -> FrameReport {
    let dt = session.step_clock(now);
    let mut events = Vec::new();

    match session.phase {
        SessionPhase::NotStarted => {
            if input.start {
                session.start();
                events.push(GameEvent::SessionStarted);
            }
        }

        SessionPhase::Over => {
            if input.reset {
                session.reset();
            } else if input.start {
                session.start();
                events.push(GameEvent::SessionStarted);
            }
        }

        SessionPhase::Playing => {
            if input.end {
                session.end();
                events.push(GameEvent::SessionEnded {
                    score: session.score,
                });
                return FrameReport { dt, events };
            }

            // Apply input: look, movement, fire edges
            session.player.yaw = input.yaw;
            session.player.pitch = input.pitch;
            session.player.apply_movement(
                input.forward,
                input.backward,
                input.left,
                input.right,
                dt,
            );

            for _ in 0..input.fire_shots {
                let id = session.next_entity_id();
                let origin = session.player.pos;
                let aim = session.player.look_dir();
                session
                    .shots
                    .fire(id, origin, aim, BULLET_SPREAD, now, &mut session.rng);
                events.push(GameEvent::ShotFired { id });
            }

            // Advance and cull bullets
            session.shots.advance(dt);
            session.shots.expire(now);

            // Spawn targets
            session.spawner.maybe_step_interval(now);
            if let Some(pos) = session.spawner.try_spawn(now, &mut session.rng) {
                let id = session.next_entity_id();
                session.targets.push(Target::new(id, pos));
                events.push(GameEvent::TargetSpawned { id });
            }

            // Collisions and scoring
            for hit in resolve_hits(&mut session.shots, &mut session.targets) {
                session.score += hit.score;
                if hit.target_destroyed {
                    events.push(GameEvent::TargetDestroyed {
                        id: hit.target_id,
                        score: hit.score,
                    });
                }
            }

            // Level progression; one step per frame, capped
            if session.level < MAX_LEVEL && session.score >= session.level * LEVEL_SCORE_STEP {
                session.level += 1;
                log::info!("level up -> {}", session.level);
                events.push(GameEvent::LevelUp {
                    level: session.level,
                });
            }

            // Terminal condition; health only moves through the damage hook
            if session.health == 0 {
                session.end();
                events.push(GameEvent::SessionEnded {
                    score: session.score,
                });
            }

            session.normalize_order();
        }
    }

    FrameReport { dt, events }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const STEP: f32 = 1.0 / 60.0;

    fn started_session(seed: u64) -> GameSession {
        let mut session = GameSession::new(seed);
        let input = FrameInput {
            start: true,
            ..Default::default()
        };
        advance_frame(&mut session, &input, 0.0);
        assert!(session.started());
        session
    }

    #[test]
    fn test_start_from_menu() {
        let mut session = GameSession::new(1);
        let report = advance_frame(&mut session, &FrameInput::default(), 0.0);
        assert!(report.events.is_empty());
        assert_eq!(session.phase, SessionPhase::NotStarted);

        let input = FrameInput {
            start: true,
            ..Default::default()
        };
        let report = advance_frame(&mut session, &input, STEP);
        assert_eq!(report.events, vec![GameEvent::SessionStarted]);
        assert!(session.started());
    }

    #[test]
    fn test_fire_outside_playing_is_noop() {
        let mut session = GameSession::new(1);
        let input = FrameInput {
            fire_shots: 5,
            ..Default::default()
        };
        advance_frame(&mut session, &input, 0.0);
        assert!(session.shots.is_empty());
    }

    #[test]
    fn test_escape_ends_session() {
        let mut session = started_session(1);
        let input = FrameInput {
            end: true,
            ..Default::default()
        };
        let report = advance_frame(&mut session, &input, STEP);
        assert!(session.over());
        assert_eq!(report.events, vec![GameEvent::SessionEnded { score: 0 }]);
    }

    #[test]
    fn test_reset_and_restart_from_over() {
        let mut session = started_session(1);
        advance_frame(
            &mut session,
            &FrameInput {
                end: true,
                ..Default::default()
            },
            STEP,
        );

        let mut via_reset = session.clone();
        advance_frame(
            &mut via_reset,
            &FrameInput {
                reset: true,
                ..Default::default()
            },
            2.0 * STEP,
        );
        assert_eq!(via_reset.phase, SessionPhase::NotStarted);

        advance_frame(
            &mut session,
            &FrameInput {
                start: true,
                ..Default::default()
            },
            2.0 * STEP,
        );
        assert!(session.started());
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_aimed_shot_scores_and_removes_target() {
        let mut session = started_session(42);
        // Target two units straight ahead of the default aim (-Z)
        let id = session.next_entity_id();
        let target_pos = session.player.pos + Vec3::NEG_Z * 2.0;
        session.targets.push(Target::new(id, target_pos));

        let fire = FrameInput {
            fire_shots: 1,
            ..Default::default()
        };
        let mut now = STEP;
        let mut destroyed = false;
        advance_frame(&mut session, &fire, now);

        for _ in 0..10 {
            now += STEP;
            let report = advance_frame(&mut session, &FrameInput::default(), now);
            if report
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::TargetDestroyed { .. }))
            {
                destroyed = true;
                break;
            }
        }

        assert!(destroyed, "bullet should close 2 units well within 10 frames");
        assert_eq!(session.score, HIT_SCORE);
        assert!(session.targets.is_empty());
        assert!(session.shots.is_empty());
    }

    #[test]
    fn test_health_exhaustion_ends_within_one_frame() {
        let mut session = started_session(3);
        session.apply_damage(100);
        let report = advance_frame(&mut session, &FrameInput::default(), STEP);
        assert!(session.over());
        assert!(
            report
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::SessionEnded { .. }))
        );
    }

    #[test]
    fn test_level_up_thresholds() {
        let mut session = started_session(4);
        session.score = 999;
        advance_frame(&mut session, &FrameInput::default(), STEP);
        assert_eq!(session.level, 1);

        session.score = 1000;
        let report = advance_frame(&mut session, &FrameInput::default(), 2.0 * STEP);
        assert_eq!(session.level, 2);
        assert!(report.events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_level_never_exceeds_cap() {
        let mut session = started_session(5);
        session.score = 99_999;
        for i in 0..10 {
            advance_frame(&mut session, &FrameInput::default(), (i + 1) as f32 * STEP);
        }
        assert_eq!(session.level, MAX_LEVEL);
    }

    #[test]
    fn test_frame_delta_is_clamped() {
        let mut session = started_session(6);
        let input = FrameInput {
            forward: true,
            ..Default::default()
        };
        let start_pos = session.player.pos;
        // A ten second stall must not teleport the player
        let report = advance_frame(&mut session, &input, 10.0);
        assert_eq!(report.dt, MAX_FRAME_DT);
        let moved = (session.player.pos - start_pos).length();
        assert!(moved <= MOVE_SPEED * MAX_FRAME_DT + 1e-4);
    }

    #[test]
    fn test_spawner_populates_targets_over_time() {
        let mut session = started_session(7);
        let mut spawned = 0;
        let mut now = 0.0;
        for _ in 0..(10.0 / STEP) as u32 {
            now += STEP;
            let report = advance_frame(&mut session, &FrameInput::default(), now);
            spawned += report
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::TargetSpawned { .. }))
                .count();
        }
        // Base interval is 2s; ten seconds yields a handful of targets
        assert!(spawned >= 4, "expected spawns, got {spawned}");
        assert_eq!(session.targets.len(), spawned);
    }

    #[test]
    fn test_score_monotonic_while_playing() {
        let mut session = started_session(8);
        let mut now = 0.0;
        let mut last_score = 0;
        for i in 0..600 {
            now += STEP;
            let input = FrameInput {
                fire_shots: u32::from(i % 7 == 0),
                yaw: (i as f32 * 0.01).sin() * 0.3,
                ..Default::default()
            };
            advance_frame(&mut session, &input, now);
            assert!(session.score >= last_score);
            last_score = session.score;
        }
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and script stay identical
        let mut a = GameSession::new(99_999);
        let mut b = GameSession::new(99_999);

        let mut now = 0.0;
        for i in 0u32..600 {
            now += STEP;
            let input = FrameInput {
                start: i == 0,
                forward: i % 3 == 0,
                left: i % 5 == 0,
                yaw: (i as f32 * 0.02).sin(),
                pitch: (i as f32 * 0.015).cos() * 0.2,
                fire_shots: u32::from(i % 9 == 0),
                ..Default::default()
            };
            advance_frame(&mut a, &input, now);
            advance_frame(&mut b, &input, now);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.level, b.level);
        assert_eq!(a.shots.len(), b.shots.len());
        assert_eq!(a.targets.len(), b.targets.len());
        assert!((a.player.pos - b.player.pos).length() < 1e-5);
    }
}
