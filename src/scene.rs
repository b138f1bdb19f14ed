//! Collaborator seams: retained scene graph and HUD presenter
//!
//! The core never owns the render graph. Each frame `SceneMirror` diffs live
//! entities against what it has already published and replays the difference
//! as insert/update/remove calls on the renderer's `RetainedScene`; the HUD
//! presenter reads a `HudSnapshot` and writes nothing back (user start/reset
//! actions come in through `InputState`).

use std::collections::{HashMap, HashSet};

use glam::{Quat, Vec3};

use crate::sim::GameSession;

/// Node transform written into the retained graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Entity class a scene node mirrors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Player,
    Projectile,
    Target,
}

/// Stable scene node key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId {
    pub kind: NodeKind,
    pub entity: u32,
}

impl SceneId {
    pub fn new(kind: NodeKind, entity: u32) -> Self {
        Self { kind, entity }
    }
}

/// The retained scene graph, owned by the renderer
pub trait RetainedScene {
    fn insert(&mut self, id: SceneId, transform: Transform);
    fn update(&mut self, id: SceneId, transform: Transform);
    fn remove(&mut self, id: SceneId);
}

/// Publishes session entities into a retained scene graph
///
/// Owns only the bookkeeping of what it has inserted so far; no-op updates
/// (static targets, idle player) are skipped.
#[derive(Debug, Default)]
pub struct SceneMirror {
    published: HashMap<SceneId, Transform>,
}

impl SceneMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the graph with the session's current entities
    pub fn sync(&mut self, session: &GameSession, scene: &mut impl RetainedScene) {
        let mut desired: Vec<(SceneId, Transform)> =
            Vec::with_capacity(1 + session.shots.len() + session.targets.len());

        desired.push((
            SceneId::new(NodeKind::Player, 0),
            Transform {
                translation: session.player.pos,
                rotation: session.player.orientation(),
            },
        ));
        for shot in session.shots.iter() {
            desired.push((
                SceneId::new(NodeKind::Projectile, shot.id),
                Transform::from_translation(shot.pos),
            ));
        }
        for target in &session.targets {
            desired.push((
                SceneId::new(NodeKind::Target, target.id),
                Transform::from_translation(target.pos),
            ));
        }

        let mut stale: HashSet<SceneId> = self.published.keys().copied().collect();

        for (id, transform) in desired {
            stale.remove(&id);
            match self.published.insert(id, transform) {
                None => scene.insert(id, transform),
                Some(prev) if prev != transform => scene.update(id, transform),
                Some(_) => {}
            }
        }

        for id in stale {
            self.published.remove(&id);
            scene.remove(id);
        }
    }

    /// Forget everything published (renderer rebuilt its graph)
    pub fn invalidate(&mut self) {
        self.published.clear();
    }
}

/// Per-frame read model for the HUD/menu presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u32,
    pub health: u8,
    pub level: u32,
    pub started: bool,
    pub over: bool,
}

impl HudSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        Self {
            score: session.score,
            health: session.health,
            level: session.level,
            started: session.started(),
            over: session.over(),
        }
    }
}
