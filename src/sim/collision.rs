//! Projectile-vs-target collision and scoring decisions
//!
//! Naive O(n×m) proximity checks; entity counts stay small. Resolution is
//! deterministic: projectiles are processed in ascending id order, each may
//! consume at most one target per frame — the nearest in range, ties broken
//! by lowest target id. A target consumed earlier in the same frame is
//! skipped by an existence check rather than raising.

use glam::Vec3;

use super::projectile::ProjectilePool;
use super::state::Target;
use crate::consts::{HIT_RADIUS, HIT_SCORE};

/// One scored collision
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub projectile_id: u32,
    pub target_id: u32,
    /// Center distance at resolution time
    pub distance: f32,
    /// Score delta for this collision
    pub score: u32,
    /// True when the hit exhausted the target's health
    pub target_destroyed: bool,
}

/// Resolve this frame's collisions, consuming bullets and destroyed targets
pub fn resolve_hits(shots: &mut ProjectilePool, targets: &mut Vec<Target>) -> Vec<Hit> {
    let candidates: Vec<(u32, Vec3)> = shots.iter().map(|p| (p.id, p.pos)).collect();
    let mut hits = Vec::new();

    for (shot_id, shot_pos) in candidates {
        let mut nearest: Option<(f32, usize)> = None;
        for (idx, target) in targets.iter().enumerate() {
            if target.health == 0 {
                // Consumed earlier this frame
                continue;
            }
            let distance = shot_pos.distance(target.pos);
            if distance < HIT_RADIUS && nearest.is_none_or(|(best, _)| distance < best) {
                nearest = Some((distance, idx));
            }
        }

        if let Some((distance, idx)) = nearest {
            let target = &mut targets[idx];
            target.health -= 1;
            hits.push(Hit {
                projectile_id: shot_id,
                target_id: target.id,
                distance,
                score: HIT_SCORE,
                target_destroyed: target.health == 0,
            });
            shots.remove(shot_id);
        }
    }

    targets.retain(|t| t.health > 0);
    hits
}
