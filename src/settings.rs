//! Game settings and preferences
//!
//! Loaded from a JSON file next to the executable when present; any load
//! failure falls back to defaults. Game state itself is never persisted.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Particle pool ceiling for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 150,
            QualityPreset::Medium => 500,
            QualityPreset::High => 1000,
        }
    }

    /// Whether to render the starfield backdrop
    pub fn starfield_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    /// Trail length multiplier (1.0 = full)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Ship engine trail
    pub trails: bool,
    /// Particle effects (explosions, pickups)
    pub particles: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::default(),
            trails: true,
            particles: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!("malformed settings file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let raw = serde_json::to_string_pretty(self).expect("settings always serialize");
        std::fs::write(path, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert_eq!(settings.quality.max_particles(), 500);
        assert!(settings.quality.starfield_enabled());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"quality":"Low"}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.trails);
        assert!(!settings.quality.starfield_enabled());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_roundtrip() {
        let mut settings = Settings::default();
        settings.quality = QualityPreset::High;
        settings.muted = true;
        let raw = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.quality, QualityPreset::High);
        assert!(back.muted);
    }
}
