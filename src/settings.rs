//! Runtime settings
//!
//! Loaded from an optional JSON file; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANIMATION_SPEED, MAX_ANIMATION_SPEED, MAX_SUBSTEPS, MIN_ANIMATION_SPEED, MIN_SIM_HZ,
    SIM_HZ,
};
use crate::error::SettingsError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial speed slider position (1 = slowest, 8 = fastest)
    pub animation_speed: u8,

    // === Scheduling ===
    /// Fixed simulation rate (Hz)
    pub sim_hz: u32,
    /// Maximum substeps per frame
    pub max_substeps: u32,

    /// Level index to open on start
    pub start_level: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            animation_speed: DEFAULT_ANIMATION_SPEED,
            sim_hz: SIM_HZ,
            max_substeps: MAX_SUBSTEPS,
            start_level: 0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let settings = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_ANIMATION_SPEED..=MAX_ANIMATION_SPEED).contains(&self.animation_speed) {
            return Err(SettingsError::AnimationSpeed(self.animation_speed));
        }
        if self.sim_hz < MIN_SIM_HZ {
            return Err(SettingsError::SimRate(self.sim_hz));
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Substeps);
        }
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.animation_speed, 5);
        assert_eq!(settings.sim_hz, 120);
        assert_eq!(settings.max_substeps, 8);
        assert_eq!(settings.start_level, 0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"animation_speed": 8}"#).unwrap();
        assert_eq!(settings.animation_speed, 8);
        assert_eq!(settings.sim_hz, SIM_HZ);

        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{"animation_speed": 9}"#),
            Err(SettingsError::AnimationSpeed(9))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"animation_speed": 0}"#),
            Err(SettingsError::AnimationSpeed(0))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"sim_hz": 30}"#),
            Err(SettingsError::SimRate(30))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"max_substeps": 0}"#),
            Err(SettingsError::Substeps)
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("vector-navigator-settings-{}.json", std::process::id()));
        let settings = Settings {
            animation_speed: 3,
            start_level: 6,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/vector-navigator.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
        assert!(Settings::load_or_default(None).is_ok());
    }
}
