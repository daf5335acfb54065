//! Game settings and tuning
//!
//! Persisted in LocalStorage as JSON. Every field has a default, so a
//! partial document only overrides what it names.

use serde::{Deserialize, Serialize};

/// Flappy tuning, in reference-resolution units (scaled by the ratio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlappyTuning {
    /// Height the sprites were drawn for (background image height)
    pub base_height: f32,
    /// Background image width at the reference height
    pub background_width: f32,
    pub gravity: f32,
    /// Scroll speed (px/frame), also the minimum speed
    pub speed: f32,
    /// Charged speed as a multiple of `speed`
    pub max_speed_factor: f32,
    /// Energy and sprite tick interval (ms)
    pub event_interval_ms: f32,

    pub player_x: f32,
    pub player_sprite_size: f32,
    pub player_radius: f32,
    pub flap_speed: f32,
    /// Vertical speed right after a reset (negative is up)
    pub launch_speed: f32,

    pub energy_start: u32,
    pub energy_min_to_charge: u32,
    pub energy_drain: u32,

    /// Obstacles per run (capped at the pool capacity)
    pub obstacle_count: usize,
    pub obstacle_spacing: f32,
    pub obstacle_sprite_size: f32,
    pub obstacle_speed_y: f32,
}

impl Default for FlappyTuning {
    fn default() -> Self {
        Self {
            base_height: 720.0,
            background_width: 2400.0,
            gravity: 0.15,
            speed: 2.0,
            max_speed_factor: 5.0,
            event_interval_ms: 150.0,

            player_x: 20.0,
            player_sprite_size: 200.0,
            player_radius: 40.0,
            flap_speed: 5.0,
            launch_speed: -8.0,

            energy_start: 30,
            energy_min_to_charge: 15,
            energy_drain: 6,

            obstacle_count: crate::sim::OBSTACLE_CAPACITY,
            obstacle_spacing: 600.0,
            obstacle_sprite_size: 120.0,
            obstacle_speed_y: 1.0,
        }
    }
}

/// Defence tuning, in reference-resolution units (scaled by the ratio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenceTuning {
    pub reference_height: f32,
    pub planet_radius: f32,
    pub planet_sprite_size: f32,
    pub turret_radius: f32,
    pub projectile_radius: f32,
    pub projectile_speed: f32,
    pub enemy_speed: f32,
    pub enemy_interval_ms: f32,
    pub sprite_interval_ms: f32,
    pub planet_lives: u32,
    pub winning_score: u32,
}

impl Default for DefenceTuning {
    fn default() -> Self {
        Self {
            reference_height: 720.0,
            planet_radius: 80.0,
            planet_sprite_size: 200.0,
            turret_radius: 40.0,
            projectile_radius: 5.0,
            projectile_speed: 5.0,
            enemy_speed: 1.0,
            enemy_interval_ms: 1700.0,
            sprite_interval_ms: 150.0,
            planet_lives: 30,
            winning_score: 50,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw collision circles and enemy lives
    pub debug: bool,
    pub flappy: FlappyTuning,
    pub defence: DefenceTuning,
}

impl Settings {
    /// LocalStorage key
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "canvas_arcade_settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring invalid stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                        log::info!("Settings saved");
                    }
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"debug": true, "defence": {"winning_score": 5}}"#)
            .expect("valid json");
        assert!(settings.debug);
        assert_eq!(settings.defence.winning_score, 5);
        assert_eq!(settings.defence.planet_lives, 30);
        assert_eq!(settings.flappy, FlappyTuning::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.flappy.obstacle_count = 3;
        let json = settings.to_json().expect("serializable");
        assert_eq!(Settings::from_json(&json).expect("valid json"), settings);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }
}
