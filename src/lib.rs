//! Lava Dash - a tile-based platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, level, collisions, outcome)
//! - `settings`: Tunable actor parameters
//! - `plans`: ASCII level plans
//! - `error`: Contract violations at the API boundary

pub mod error;
pub mod plans;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{Preset, Settings};

/// Game configuration constants
pub mod consts {
    use glam::DVec2;

    /// Fixed simulation timestep used by the native driver (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Longest single step `advance` will take
    pub const MAX_STEP: f64 = 0.05;
    /// Maximum steps per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player width in tiles (height comes from settings)
    pub const PLAYER_WIDTH: f64 = 0.8;
    /// Player spawns half a tile up so it stands on the tile below
    pub const PLAYER_SPAWN_OFFSET: DVec2 = DVec2::new(0.0, -0.5);

    pub const COIN_SIZE: DVec2 = DVec2::new(0.6, 0.6);
    /// Centres the coin within its tile
    pub const COIN_SPAWN_OFFSET: DVec2 = DVec2::new(0.2, 0.1);

    pub const FIREBALL_SIZE: DVec2 = DVec2::new(1.0, 1.0);

    /// Seconds a decided level lingers before it counts as finished
    pub const DEFAULT_FINISH_DELAY: f64 = 1.0;
    /// Coin phase seed used when none is given
    pub const DEFAULT_COIN_SEED: u64 = 0x5eed;
}
