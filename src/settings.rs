//! Player settings and preferences
//!
//! Stored as JSON next to the player's other data. Missing fields fall back
//! to defaults so older files keep loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SHOWDOWN_SECONDS;
use crate::error::Result;

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

    /// Positions kept in the golf ball trail
    pub fn trail_length(&self) -> usize {
        match self {
            QualityPreset::Low => 2,
            QualityPreset::Medium => 5,
            QualityPreset::High => 8,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Golf ball trails
    pub trails: bool,

    // === Input ===
    /// Device shake counts as a Beat Blitz action
    pub shake_input: bool,
    /// Breath (microphone) counts as a Beat Blitz action
    pub breath_input: bool,

    // === Gameplay ===
    /// Beat Blitz round length in seconds
    pub showdown_seconds: u32,

    // === Accessibility ===
    /// Reduced motion: no ball trail
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            trails: true,

            shake_input: true,
            breath_input: true,

            showdown_seconds: SHOWDOWN_SECONDS,

            reduced_motion: false,
        }
    }
}

impl Settings {
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Trail positions to keep, 0 when trails are off or motion is reduced
    pub fn trail_length(&self) -> usize {
        if self.trails && !self.reduced_motion {
            self.quality.trail_length()
        } else {
            0
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!(
                    "Loaded settings from {} ({} quality)",
                    path.display(),
                    settings.quality.as_str()
                );
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({e})");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_trail_lengths() {
        assert_eq!(Settings::from_preset(QualityPreset::Low).trail_length(), 2);
        assert_eq!(Settings::default().trail_length(), 5);
        assert_eq!(Settings::from_preset(QualityPreset::High).trail_length(), 8);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_reduced_motion_drops_trail() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(settings.trail_length(), 0);
    }

    #[test]
    fn test_old_file_fields_are_ignored() {
        let settings =
            Settings::from_json(r#"{"screen_shake": false, "master_volume": 0.2}"#).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_trails_off() {
        let settings = Settings {
            trails: false,
            ..Settings::default()
        };
        assert_eq!(settings.trail_length(), 0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"showdown_seconds": 45, "quality": "High"}"#).unwrap();
        assert_eq!(settings.showdown_seconds, 45);
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.shake_input);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("rupeverse_settings_{}.json", std::process::id()));
        let settings = Settings {
            showdown_seconds: 20,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("rupeverse_settings_does_not_exist.json");
        assert_eq!(Settings::load_or_default(path), Settings::default());
    }
}
