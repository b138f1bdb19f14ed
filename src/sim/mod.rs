//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies
//!
//! The frame driver is fed a clock by the render-loop collaborator; within a
//! frame every operation sees the same `now`.

pub mod collision;
pub mod frame;
pub mod input;
pub mod projectile;
pub mod spawner;
pub mod state;

pub use collision::{Hit, resolve_hits};
pub use frame::{FrameInput, FrameReport, advance_frame};
pub use input::{InputState, KeyCode};
pub use projectile::{Projectile, ProjectilePool};
pub use spawner::{SpawnerState, TargetSpawner};
pub use state::{GameEvent, GameSession, Player, SessionPhase, Target};
