//! Game settings and preferences
//!
//! Persisted separately from game saves as a small JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default settings file name, next to the executable's working directory
pub const SETTINGS_FILE: &str = "settings.json";

pub const MIN_FIELD_OF_VIEW: f32 = 10.0;
pub const MAX_FIELD_OF_VIEW: f32 = 170.0;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Animate jumps, captures and the victory cutscene
    pub move_animation: bool,
    /// Marbles slowly spin about their axis
    pub spinning_marbles: bool,
    /// Ask before discarding unsaved moves
    pub prompts: bool,

    // === Scene ===
    pub space_backdrop: bool,
    pub show_sun: bool,
    /// Draw a marker at the camera focus point
    pub show_focus_point: bool,
    /// Key bindings overlay
    pub show_controls: bool,

    // === Camera & window ===
    /// First-person camera instead of orbiting
    pub fps_mode: bool,
    pub full_screen: bool,
    /// Vertical field of view (degrees)
    pub field_of_view: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            move_animation: true,
            spinning_marbles: true,
            prompts: true,

            space_backdrop: true,
            show_sun: true,
            show_focus_point: false,
            show_controls: true,

            fps_mode: false,
            full_screen: true,
            field_of_view: 45.0,
        }
    }
}

impl Settings {
    /// Set the field of view, clamped to the supported range
    pub fn set_field_of_view(&mut self, degrees: f32) {
        self.field_of_view = degrees.clamp(MIN_FIELD_OF_VIEW, MAX_FIELD_OF_VIEW);
    }

    /// Whether a destructive action (new game, load) should ask first
    pub fn needs_prompt(&self, unsaved_moves: bool) -> bool {
        self.prompts && unsaved_moves
    }

    /// Parse settings, clamping out-of-range values
    pub fn try_load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let mut settings: Settings = serde_json::from_str(&json)?;
        settings.set_field_of_view(settings.field_of_view);
        Ok(settings)
    }

    /// Load settings, falling back to defaults on a missing or broken file
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::info!("Using default settings ({err})");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
