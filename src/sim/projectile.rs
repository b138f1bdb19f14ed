//! Projectile pool
//!
//! Bullets are transient: fired with a spread-perturbed aim vector, advanced
//! along a straight line at fixed speed, culled on impact or timeout. Motion
//! is time-delta scaled so flight speed is independent of display refresh.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{BULLET_LIFETIME, BULLET_SPEED};

/// A bullet in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    /// Unit flight direction, fixed at fire time
    pub dir: Vec3,
    pub spawn_time: f32,
}

impl Projectile {
    pub fn age(&self, now: f32) -> f32 {
        now - self.spawn_time
    }
}

/// Pool of live bullets, iterated in id order
#[derive(Debug, Clone, Default)]
pub struct ProjectilePool {
    shots: Vec<Projectile>,
}

impl ProjectilePool {
    /// Spawn one bullet. The aim vector is perturbed by a uniform ±spread/2
    /// on x and y, then renormalized.
    pub fn fire(
        &mut self,
        id: u32,
        origin: Vec3,
        aim: Vec3,
        spread: f32,
        now: f32,
        rng: &mut Pcg32,
    ) -> u32 {
        let mut dir = aim.normalize_or_zero();
        dir.x += rng.random_range(-0.5..0.5) * spread;
        dir.y += rng.random_range(-0.5..0.5) * spread;
        let dir = dir.normalize_or_zero();
        self.shots.push(Projectile {
            id,
            pos: origin,
            dir,
            spawn_time: now,
        });
        id
    }

    /// Move every bullet along its direction
    pub fn advance(&mut self, dt: f32) {
        for shot in &mut self.shots {
            shot.pos += shot.dir * BULLET_SPEED * dt;
        }
    }

    /// Cull bullets whose age has reached the lifetime; returns how many
    pub fn expire(&mut self, now: f32) -> usize {
        let before = self.shots.len();
        self.shots.retain(|p| p.age(now) < BULLET_LIFETIME);
        before - self.shots.len()
    }

    /// Remove one bullet by id (collision consumption)
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.shots.len();
        self.shots.retain(|p| p.id != id);
        before != self.shots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.shots.iter()
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    pub fn clear(&mut self) {
        self.shots.clear();
    }

    pub(crate) fn normalize_order(&mut self) {
        self.shots.sort_by_key(|p| p.id);
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::look_direction;
    use proptest::prelude::*;
    use rand::SeedableRng;

    proptest! {
        #[test]
        fn fired_direction_stays_unit_and_near_aim(
            yaw in -3.1f32..3.1,
            pitch in -1.3f32..1.3,
            spread in 0.0f32..0.2,
            seed in any::<u64>(),
        ) {
            let aim = look_direction(yaw, pitch);
            let mut pool = ProjectilePool::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            pool.fire(1, Vec3::ZERO, aim, spread, 0.0, &mut rng);
            let shot = pool.iter().next().unwrap();
            prop_assert!((shot.dir.length() - 1.0).abs() < 1e-3);
            prop_assert!(shot.dir.dot(aim) >= 1.0 - spread);
        }

        #[test]
        fn advance_distance_matches_speed(dt in 0.0f32..0.1, steps in 1usize..20) {
            let mut pool = ProjectilePool::default();
            let mut rng = Pcg32::seed_from_u64(9);
            pool.fire(1, Vec3::ZERO, Vec3::NEG_Z, 0.0, 0.0, &mut rng);
            for _ in 0..steps {
                pool.advance(dt);
            }
            let shot = pool.iter().next().unwrap();
            let expected = BULLET_SPEED * dt * steps as f32;
            prop_assert!((shot.pos.length() - expected).abs() < expected * 1e-3 + 1e-3);
        }
    }
}
