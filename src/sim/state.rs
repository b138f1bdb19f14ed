//! Session state and core simulation types
//!
//! Everything a play-through owns lives on `GameSession`; nothing is global.

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::projectile::ProjectilePool;
use super::spawner::TargetSpawner;
use crate::consts::*;
use crate::look_direction;

/// Lifecycle of one play-through
///
/// A single enum makes "started and over at once" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Waiting on the start action; frame driver idles
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended; waiting on reset (or a direct restart)
    Over,
}

/// Frame outcomes surfaced to presentation/audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted,
    ShotFired { id: u32 },
    TargetSpawned { id: u32 },
    TargetDestroyed { id: u32, score: u32 },
    LevelUp { level: u32 },
    SessionEnded { score: u32 },
}

/// First-person player pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Vec3,
    /// Accumulated look yaw (radians, normalized by the input layer)
    pub yaw: f32,
    /// Accumulated look pitch (radians, clamped by the input layer)
    pub pitch: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: PLAYER_SPAWN,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl Player {
    /// View orientation quaternion
    pub fn orientation(&self) -> Quat {
        crate::look_rotation(self.yaw, self.pitch)
    }

    /// Unit aim vector
    pub fn look_dir(&self) -> Vec3 {
        look_direction(self.yaw, self.pitch)
    }

    /// Apply latched movement flags along the view orientation
    pub fn apply_movement(
        &mut self,
        forward: bool,
        backward: bool,
        left: bool,
        right: bool,
        dt: f32,
    ) {
        let wish = Vec3::new(
            (right as i8 - left as i8) as f32,
            0.0,
            (backward as i8 - forward as i8) as f32,
        );
        let dir = (self.orientation() * wish).normalize_or_zero();
        self.pos += dir * MOVE_SPEED * dt;
    }
}

/// A target standing in its spawn lane
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: u32,
    pub pos: Vec3,
    /// Hits remaining before destruction
    pub health: u32,
}

impl Target {
    pub fn new(id: u32, pos: Vec3) -> Self {
        Self {
            id,
            pos,
            health: TARGET_HEALTH,
        }
    }
}

/// Complete session state
///
/// Handed by mutable reference into `advance_frame`; collaborators read it
/// between frames and never mutate it directly.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: SessionPhase,
    pub score: u32,
    /// 0..=100; only decreases through `apply_damage`
    pub health: u8,
    /// 1..=MAX_LEVEL
    pub level: u32,
    /// Simulation clock, fed from the render loop's elapsed time
    pub time: f32,
    pub(crate) prev_time: Option<f32>,
    pub player: Player,
    pub shots: ProjectilePool,
    pub spawner: TargetSpawner,
    /// Live targets (sorted by id for determinism)
    pub targets: Vec<Target>,
    next_id: u32,
}

impl GameSession {
    /// Create a fresh, not-yet-started session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::NotStarted,
            score: 0,
            health: START_HEALTH,
            level: 1,
            time: 0.0,
            prev_time: None,
            player: Player::default(),
            shots: ProjectilePool::default(),
            spawner: TargetSpawner::default(),
            targets: Vec::new(),
            next_id: 1,
        }
    }

    pub fn started(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    pub fn over(&self) -> bool {
        self.phase == SessionPhase::Over
    }

    /// Begin a run. Valid from NotStarted or Over; resets the scoreboard and
    /// clears any leftover entities.
    pub fn start(&mut self) {
        self.score = 0;
        self.health = START_HEALTH;
        self.level = 1;
        self.player = Player::default();
        self.shots.clear();
        self.targets.clear();
        self.spawner.begin(self.time);
        self.phase = SessionPhase::Playing;
        log::info!("session started (seed {})", self.seed);
    }

    /// End the run (player quit or health exhausted)
    pub fn end(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.spawner.halt();
            self.phase = SessionPhase::Over;
            log::info!("session over, score {}", self.score);
        }
    }

    /// Back to the menu; equivalent to a fresh session apart from seed and clock
    pub fn reset(&mut self) {
        self.score = 0;
        self.health = START_HEALTH;
        self.level = 1;
        self.player = Player::default();
        self.shots.clear();
        self.targets.clear();
        self.spawner.halt();
        self.phase = SessionPhase::NotStarted;
    }

    /// External damage hook; the core itself never calls this.
    /// The terminal transition happens on the next frame's health check.
    pub fn apply_damage(&mut self, amount: u8) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance the simulation clock; returns the clamped frame delta
    pub(crate) fn step_clock(&mut self, now: f32) -> f32 {
        let dt = match self.prev_time {
            Some(prev) => (now - prev).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.prev_time = Some(now);
        self.time = now;
        dt
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.shots.normalize_order();
        self.targets.sort_by_key(|t| t.id);
    }
}
