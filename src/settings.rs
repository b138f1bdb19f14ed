//! Game settings and preferences
//!
//! Persisted as a JSON file beside the leaderboard. Gameplay never depends on
//! a successful load; any failure logs and falls back to defaults.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::LOOK_SENSITIVITY;

/// Look sensitivity presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SensitivityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl SensitivityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensitivityPreset::Low => "Low",
            SensitivityPreset::Medium => "Medium",
            SensitivityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(SensitivityPreset::Low),
            "medium" | "med" => Some(SensitivityPreset::Medium),
            "high" => Some(SensitivityPreset::High),
            _ => None,
        }
    }

    /// Radians of look rotation per pointer pixel
    pub fn look_sensitivity(&self) -> f32 {
        match self {
            SensitivityPreset::Low => LOOK_SENSITIVITY * 0.5,
            SensitivityPreset::Medium => LOOK_SENSITIVITY,
            SensitivityPreset::High => LOOK_SENSITIVITY * 2.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Input ===
    /// Look rotation per pointer pixel (radians)
    pub look_sensitivity: f32,
    /// Invert vertical look
    pub invert_y: bool,

    // === Display ===
    /// Camera field of view (degrees); consumed by the renderer collaborator
    pub fov_degrees: f32,
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio (prep for later) ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Suppress hit/level-up flash effects
    pub reduced_flash: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            look_sensitivity: LOOK_SENSITIVITY,
            invert_y: false,

            fov_degrees: 75.0,
            show_fps: true,

            master_volume: 0.8,
            sfx_volume: 1.0,

            reduced_flash: false,
        }
    }
}

impl Settings {
    /// Create settings from a sensitivity preset
    pub fn from_preset(preset: SensitivityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a sensitivity preset, keeping everything else
    pub fn apply_preset(&mut self, preset: SensitivityPreset) {
        self.look_sensitivity = preset.look_sensitivity();
    }

    /// Load settings from a JSON file, defaulting on any failure
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings file: {e}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
