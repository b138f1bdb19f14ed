//! Timer-driven target spawner
//!
//! Idle until a session starts. While spawning, an interval gates one target
//! at a time at a randomized lane ahead of the player. The interval is only
//! recalculated on a fixed wall-clock cadence, so difficulty steps down in
//! discrete notches rather than scaling continuously.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnerState {
    #[default]
    Idle,
    Spawning,
}

/// Spawn pacing state machine
#[derive(Debug, Clone)]
pub struct TargetSpawner {
    pub state: SpawnerState,
    last_spawn: f32,
    interval: f32,
    /// Cumulative spawn count for the current session
    spawned: u32,
    last_recalc: f32,
}

impl Default for TargetSpawner {
    fn default() -> Self {
        Self {
            state: SpawnerState::Idle,
            last_spawn: 0.0,
            interval: BASE_SPAWN_INTERVAL,
            spawned: 0,
            last_recalc: 0.0,
        }
    }
}

impl TargetSpawner {
    /// Idle -> Spawning on session start
    pub fn begin(&mut self, now: f32) {
        self.state = SpawnerState::Spawning;
        self.last_spawn = now;
        self.last_recalc = now;
        self.interval = BASE_SPAWN_INTERVAL;
        self.spawned = 0;
    }

    /// Spawning -> Idle on session end
    pub fn halt(&mut self) {
        self.state = SpawnerState::Idle;
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Step the interval down if the recalc cadence has elapsed
    pub fn maybe_step_interval(&mut self, now: f32) {
        if self.state != SpawnerState::Spawning {
            return;
        }
        if now - self.last_recalc >= INTERVAL_RECALC_PERIOD {
            let next =
                (BASE_SPAWN_INTERVAL - self.spawned as f32 / SPAWN_RAMP_DIVISOR).max(MIN_SPAWN_INTERVAL);
            if (next - self.interval).abs() > f32::EPSILON {
                log::debug!(
                    "spawn interval {:.2}s -> {:.2}s after {} targets",
                    self.interval,
                    next,
                    self.spawned
                );
            }
            self.interval = next;
            self.last_recalc = now;
        }
    }

    /// Produce one spawn position if the interval has been exceeded
    pub fn try_spawn(&mut self, now: f32, rng: &mut Pcg32) -> Option<Vec3> {
        if self.state != SpawnerState::Spawning {
            return None;
        }
        if now - self.last_spawn > self.interval {
            self.last_spawn = now;
            self.spawned += 1;
            let x = rng.random_range(-TARGET_LANE_HALF_WIDTH..TARGET_LANE_HALF_WIDTH);
            Some(Vec3::new(x, TARGET_SPAWN_Y, TARGET_SPAWN_Z))
        } else {
            None
        }
    }
}
