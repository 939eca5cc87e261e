//! Actor tuning parameters
//!
//! Two builds of the game disagree on a handful of actor constants. Both are
//! available as presets; neither is privileged beyond being the default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SimError;

/// Named parameter sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Tall player, fast hazards
    #[default]
    Standard,
    /// Square player, slow hazards
    Classic,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Standard => "Standard",
            Preset::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(Preset::Standard),
            "classic" => Some(Preset::Classic),
            _ => None,
        }
    }

    pub fn player_height(&self) -> f64 {
        match self {
            Preset::Standard => 1.5,
            Preset::Classic => 1.0,
        }
    }

    pub fn horizontal_fireball_speed(&self) -> f64 {
        match self {
            Preset::Standard => 2.0,
            Preset::Classic => 1.0,
        }
    }

    pub fn fire_rain_speed(&self) -> f64 {
        match self {
            Preset::Standard => 3.0,
            Preset::Classic => 1.0,
        }
    }
}

/// Actor parameters consumed by constructors and the parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which preset the values below started from
    pub preset: Preset,

    // === Player ===
    pub player_height: f64,

    // === Hazards (tiles per second) ===
    pub horizontal_fireball_speed: f64,
    pub vertical_fireball_speed: f64,
    pub fire_rain_speed: f64,

    // === Coins ===
    /// Phase accumulated per second of bobbing
    pub coin_spring_speed: f64,
    /// Bobbing amplitude in tiles
    pub coin_spring_dist: f64,

    // === Outcome ===
    /// Seconds the level lingers after it is won or lost
    pub finish_delay: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(Preset::Standard)
    }
}

impl Settings {
    /// Create settings from a preset
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            player_height: preset.player_height(),
            horizontal_fireball_speed: preset.horizontal_fireball_speed(),
            vertical_fireball_speed: 2.0,
            fire_rain_speed: preset.fire_rain_speed(),
            coin_spring_speed: 8.0,
            coin_spring_dist: 0.07,
            finish_delay: 1.0,
        }
    }

    /// Apply a preset, overwriting the preset-dependent values
    pub fn apply_preset(&mut self, preset: Preset) {
        self.preset = preset;
        self.player_height = preset.player_height();
        self.horizontal_fireball_speed = preset.horizontal_fireball_speed();
        self.fire_rain_speed = preset.fire_rain_speed();
    }

    /// Check every value is usable by the actor constructors
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = [
            ("player_height", self.player_height),
            ("coin_spring_speed", self.coin_spring_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidSetting { name, value });
            }
        }

        let finite = [
            ("horizontal_fireball_speed", self.horizontal_fireball_speed),
            ("vertical_fireball_speed", self.vertical_fireball_speed),
            ("fire_rain_speed", self.fire_rain_speed),
            ("coin_spring_dist", self.coin_spring_dist),
            ("finish_delay", self.finish_delay),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(SimError::InvalidSetting { name, value });
            }
        }

        Ok(())
    }

    /// Read and validate settings from a JSON file
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }
}
