//! Deadeye Range entry point
//!
//! Headless demo driver: runs a seeded, self-playing session through the
//! frame driver at a fixed cadence and logs HUD snapshots once per second.
//! The retained scene graph and HUD belong to external collaborators; a
//! counting stub stands in for the renderer here.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use deadeye_range::scene::{HudSnapshot, RetainedScene, SceneId, SceneMirror, Transform};
use deadeye_range::sim::{GameEvent, GameSession, InputState, KeyCode, advance_frame};
use deadeye_range::{Leaderboard, Settings, direction_to_yaw_pitch, normalize_angle};

const DEMO_SECONDS: f32 = 30.0;
const STEP: f32 = 1.0 / 60.0;
/// Frames between autopilot trigger pulls
const FIRE_COOLDOWN_FRAMES: u32 = 6;

/// Stand-in retained scene graph that only tracks node counts
#[derive(Default)]
struct CountingScene {
    nodes: usize,
    peak: usize,
}

impl RetainedScene for CountingScene {
    fn insert(&mut self, _id: SceneId, _transform: Transform) {
        self.nodes += 1;
        self.peak = self.peak.max(self.nodes);
    }

    fn update(&mut self, _id: SceneId, _transform: Transform) {}

    fn remove(&mut self, _id: SceneId) {
        self.nodes = self.nodes.saturating_sub(1);
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(now_ms);
    log::info!("Deadeye Range (headless demo) starting, seed {seed}");

    let settings = Settings::load_from(Path::new("deadeye_settings.json"));
    let mut input = InputState::from_settings(&settings);
    let mut session = GameSession::new(seed);
    let mut mirror = SceneMirror::new();
    let mut scene = CountingScene::default();

    // Start action, as the menu's start button would deliver it
    input.key_down(KeyCode::Space);

    let frames = (DEMO_SECONDS / STEP) as u32;
    let mut now = 0.0;
    let mut last_logged_second = 0;

    for frame_no in 0..frames {
        now = frame_no as f32 * STEP;
        steer(&mut input, &session, settings.look_sensitivity, frame_no);

        let frame_input = input.take_frame_input();
        let report = advance_frame(&mut session, &frame_input, now);
        for event in &report.events {
            match event {
                GameEvent::TargetDestroyed { id, score } => {
                    log::debug!("target {id} down (+{score})")
                }
                GameEvent::LevelUp { level } => log::info!("reached level {level}"),
                GameEvent::SessionEnded { score } => log::info!("session ended at {score}"),
                _ => {}
            }
        }

        mirror.sync(&session, &mut scene);

        let second = now as u32;
        if second > last_logged_second {
            last_logged_second = second;
            let hud = HudSnapshot::capture(&session);
            log::info!(
                "t={second:>3}s score={} health={} level={} targets={} shots={}",
                hud.score,
                hud.health,
                hud.level,
                session.targets.len(),
                session.shots.len()
            );
        }

        if session.over() {
            break;
        }
    }

    // Quit action
    input.key_down(KeyCode::Escape);
    let frame_input = input.take_frame_input();
    advance_frame(&mut session, &frame_input, now + STEP);
    mirror.sync(&session, &mut scene);

    let hud = HudSnapshot::capture(&session);
    println!(
        "final score {} (level {}), peak scene nodes {}",
        hud.score, hud.level, scene.peak
    );

    let board_path = Path::new("deadeye_highscores.json");
    let mut board = Leaderboard::load_from(board_path);
    if let Some(rank) = board.submit(hud.score, hud.level, now_ms()) {
        log::info!("leaderboard rank {rank}");
        if let Err(e) = board.save_to(board_path) {
            log::warn!("could not save high scores: {e}");
        }
    }
}

/// Aim-assist autopilot: swing the view toward the nearest target through the
/// pointer path, pull the trigger when roughly aligned
fn steer(input: &mut InputState, session: &GameSession, sensitivity: f32, frame_no: u32) {
    if !session.started() || sensitivity <= 0.0 {
        return;
    }
    let Some(target) = session.targets.iter().min_by(|a, b| {
        let da = a.pos.distance(session.player.pos);
        let db = b.pos.distance(session.player.pos);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    }) else {
        return;
    };

    let (want_yaw, want_pitch) = direction_to_yaw_pitch(target.pos - session.player.pos);
    let (yaw, pitch) = input.look();
    let yaw_err = normalize_angle(want_yaw - yaw);
    let pitch_err = want_pitch - pitch;

    let gain = 0.3;
    input.pointer_delta(
        -gain * yaw_err / sensitivity,
        -gain * pitch_err / sensitivity,
    );

    if yaw_err.abs() < 0.05 && pitch_err.abs() < 0.05 && frame_no % FIRE_COOLDOWN_FRAMES == 0 {
        input.trigger_fire();
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
