//! Striker tunables
//!
//! Persisted as JSON. Missing fields fall back to defaults and out-of-range
//! values are clamped rather than rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Name and legal range of a scalar tunable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunable {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl Tunable {
    const fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    /// Clamp `value` into range; NaN falls back to the default
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

/// Maximum distance (m) per second a striker moves toward its target
pub const MAX_SPEED: Tunable = Tunable::new("Remote Max Speed", 1.0, 60.0, 4.5);
/// Inside this distance the striker decelerates instead of accelerating
pub const EASE_IN_DISTANCE: Tunable = Tunable::new("Remote Ease-in Distance", 0.0, 1.0, 0.25);
/// Inside this distance the striker stops steering
pub const CLOSE_ENOUGH: Tunable = Tunable::new("Remote Close Enough", 0.001, 1.0, 0.1);
/// Multiplied by distance to target and added to speed each second
pub const ACCELERATION: Tunable = Tunable::new("Remote Acceleration", 0.0, 100.0, 10.0);
/// Speed removed per second while easing in
pub const DECELERATION: Tunable = Tunable::new("Remote Deceleration", 0.0, 200.0, 100.0);
/// Distance the bounds extend beyond the physical board
pub const BOUNDS_BUFFER: Tunable = Tunable::new("Remote Bounds Buffer", 0.0, 15.0, 6.0);
/// Maximum heading change, radians per second
pub const TURN_RATE: Tunable = Tunable::new("Remote Turn Rate", 0.0, 60.0, 20.0);

/// Striker motion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Steering ===
    pub max_speed: f32,
    pub ease_in_distance: f32,
    pub close_enough: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub turn_rate: f32,

    // === Bounds ===
    /// Pin a lone striker to the board
    pub bounds_enable: bool,
    pub bounds_buffer: f32,

    // === Feature flags ===
    /// Drive strikers by velocity (kinematic body) instead of writing positions
    pub enable_velocity_kinematic: bool,
    /// When off, strikers steer but never move
    pub enable_striker_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED.default,
            ease_in_distance: EASE_IN_DISTANCE.default,
            close_enough: CLOSE_ENOUGH.default,
            acceleration: ACCELERATION.default,
            deceleration: DECELERATION.default,
            turn_rate: TURN_RATE.default,

            bounds_enable: true,
            bounds_buffer: BOUNDS_BUFFER.default,

            enable_velocity_kinematic: false,
            enable_striker_motion: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, clamping every tunable into range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.clamped())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Copy with every tunable clamped into its legal range
    pub fn clamped(&self) -> Self {
        Self {
            max_speed: MAX_SPEED.clamp(self.max_speed),
            ease_in_distance: EASE_IN_DISTANCE.clamp(self.ease_in_distance),
            close_enough: CLOSE_ENOUGH.clamp(self.close_enough),
            acceleration: ACCELERATION.clamp(self.acceleration),
            deceleration: DECELERATION.clamp(self.deceleration),
            turn_rate: TURN_RATE.clamp(self.turn_rate),
            bounds_buffer: BOUNDS_BUFFER.clamp(self.bounds_buffer),
            ..self.clone()
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read settings {}: {}", path.display(), err);
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Invalid settings {}: {}", path.display(), err);
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let settings = Settings::default();
        assert_eq!(settings.clamped(), settings);
    }

    #[test]
    fn test_missing_fields_default() {
        let settings = Settings::from_json(r#"{ "max_speed": 8.0 }"#).unwrap();
        assert_eq!(settings.max_speed, 8.0);
        assert_eq!(settings.turn_rate, TURN_RATE.default);
        assert!(settings.enable_striker_motion);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let settings =
            Settings::from_json(r#"{ "max_speed": 500.0, "close_enough": 0.0 }"#).unwrap();
        assert_eq!(settings.max_speed, MAX_SPEED.max);
        assert_eq!(settings.close_enough, CLOSE_ENOUGH.min);
    }

    #[test]
    fn test_nan_falls_back_to_default() {
        assert_eq!(TURN_RATE.clamp(f32::NAN), TURN_RATE.default);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            enable_velocity_kinematic: true,
            bounds_enable: false,
            acceleration: 42.0,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("striker_sim_settings_does_not_exist.json");
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "striker_sim_settings_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            turn_rate: 3.5,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }
}
