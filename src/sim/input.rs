//! Latched keyboard/pointer state
//!
//! Key and pointer events arrive asynchronously relative to the frame
//! callback; they are latched here and read as one immutable snapshot at the
//! start of each frame. Movement flags persist until key release; one-shot
//! edges (fire, start, end, reset) are drained by the snapshot.

use super::frame::FrameInput;
use crate::consts::{LOOK_SENSITIVITY, PITCH_LIMIT};
use crate::normalize_angle;

/// Physical key codes the range binds. Raw codes map 1:1, no validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    Space,
    Escape,
}

/// Latched input state
#[derive(Debug, Clone)]
pub struct InputState {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    /// Accumulated look angles; yaw wraps, pitch clamps to ±PITCH_LIMIT
    yaw: f32,
    pitch: f32,
    look_sensitivity: f32,
    invert_y: bool,
    fire_edges: u32,
    start_edge: bool,
    end_edge: bool,
    reset_edge: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(LOOK_SENSITIVITY, false)
    }
}

impl InputState {
    pub fn new(look_sensitivity: f32, invert_y: bool) -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            yaw: 0.0,
            pitch: 0.0,
            look_sensitivity,
            invert_y,
            fire_edges: 0,
            start_edge: false,
            end_edge: false,
            reset_edge: false,
        }
    }

    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self::new(settings.look_sensitivity, settings.invert_y)
    }

    /// Latch a key press. Repeats are idempotent.
    pub fn key_down(&mut self, key: KeyCode) {
        match key {
            KeyCode::KeyW => self.forward = true,
            KeyCode::KeyS => self.backward = true,
            KeyCode::KeyA => self.left = true,
            KeyCode::KeyD => self.right = true,
            KeyCode::Space => self.start_edge = true,
            KeyCode::Escape => self.end_edge = true,
        }
    }

    /// Clear a movement flag on release. One-shot keys have no release action.
    pub fn key_up(&mut self, key: KeyCode) {
        match key {
            KeyCode::KeyW => self.forward = false,
            KeyCode::KeyS => self.backward = false,
            KeyCode::KeyA => self.left = false,
            KeyCode::KeyD => self.right = false,
            KeyCode::Space | KeyCode::Escape => {}
        }
    }

    /// Accumulate a pointer movement (pixels)
    pub fn pointer_delta(&mut self, dx: f32, dy: f32) {
        let dy = if self.invert_y { -dy } else { dy };
        self.yaw = normalize_angle(self.yaw - dx * self.look_sensitivity);
        self.pitch = (self.pitch - dy * self.look_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Latch a fire trigger edge (mouse button down)
    pub fn trigger_fire(&mut self) {
        self.fire_edges += 1;
    }

    /// Latch a restart action (menu button)
    pub fn trigger_reset(&mut self) {
        self.reset_edge = true;
    }

    /// Current accumulated (yaw, pitch)
    pub fn look(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    /// Snapshot for the coming frame, draining one-shot edges
    pub fn take_frame_input(&mut self) -> FrameInput {
        let snapshot = FrameInput {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
            yaw: self.yaw,
            pitch: self.pitch,
            fire_shots: self.fire_edges,
            start: self.start_edge,
            end: self.end_edge,
            reset: self.reset_edge,
        };
        self.fire_edges = 0;
        self.start_edge = false;
        self.end_edge = false;
        self.reset_edge = false;
        snapshot
    }
}
