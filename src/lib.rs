//! Deadeye Range - a first-person target-range shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input latching, projectiles, spawning,
//!   collisions, session state)
//! - `scene`: Binding seams for a retained scene graph and HUD presenter
//! - `settings`: Player preferences
//! - `highscores`: Local leaderboard

pub mod highscores;
pub mod scene;
pub mod settings;
pub mod sim;

pub use highscores::Leaderboard;
pub use settings::{SensitivityPreset, Settings};

use glam::{EulerRot, Quat, Vec3};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Hard cap on a single frame's delta (seconds); stalls don't teleport entities
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player spawn pose
    pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 1.0, 5.0);
    /// Player movement speed (units per second)
    pub const MOVE_SPEED: f32 = 6.0;
    /// Look rotation per pointer pixel (radians)
    pub const LOOK_SENSITIVITY: f32 = 0.02;
    /// Pitch accumulation is clamped to ±this
    pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 30.0;
    /// Full spread width; each axis is perturbed by ±half of this
    pub const BULLET_SPREAD: f32 = 0.05;
    /// Seconds before an unspent bullet is culled
    pub const BULLET_LIFETIME: f32 = 3.0;

    /// Target spawn geometry: random lane x in ±TARGET_LANE_HALF_WIDTH
    pub const TARGET_LANE_HALF_WIDTH: f32 = 25.0;
    pub const TARGET_SPAWN_Y: f32 = 1.0;
    pub const TARGET_SPAWN_Z: f32 = -50.0;
    /// Hits a fresh target absorbs before it is destroyed
    pub const TARGET_HEALTH: u32 = 1;

    /// Bullet-vs-target collision radius
    pub const HIT_RADIUS: f32 = 1.0;
    /// Score awarded per destroyed target
    pub const HIT_SCORE: u32 = 100;

    /// Spawn pacing: interval steps down from BASE toward MIN as targets accumulate
    pub const BASE_SPAWN_INTERVAL: f32 = 2.0;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.5;
    /// Interval shrinks by 1/SPAWN_RAMP_DIVISOR seconds per spawned target
    pub const SPAWN_RAMP_DIVISOR: f32 = 10.0;
    /// Interval is only recalculated on this wall-clock cadence (seconds)
    pub const INTERVAL_RECALC_PERIOD: f32 = 5.0;

    /// Session bookkeeping
    pub const START_HEALTH: u8 = 100;
    pub const MAX_LEVEL: u32 = 5;
    /// Level N ends once score reaches N * LEVEL_SCORE_STEP
    pub const LEVEL_SCORE_STEP: u32 = 1000;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// View orientation for a yaw/pitch pair (yaw about Y, then pitch about local X)
#[inline]
pub fn look_rotation(yaw: f32, pitch: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)
}

/// Unit forward vector for a yaw/pitch pair; forward at rest is -Z
#[inline]
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    look_rotation(yaw, pitch) * Vec3::NEG_Z
}

/// Recover (yaw, pitch) from a direction vector
pub fn direction_to_yaw_pitch(dir: Vec3) -> (f32, f32) {
    let dir = dir.normalize_or_zero();
    let pitch = dir.y.clamp(-1.0, 1.0).asin();
    let yaw = (-dir.x).atan2(-dir.z);
    (yaw, pitch)
}
