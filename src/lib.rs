//! Coin Arena - collect coins, dodge hazards, stay out of the walls
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game state)
//! - `hud`: Presentation model built from simulation snapshots
//! - `settings`: Runtime configuration loaded from JSON

pub mod hud;
pub mod settings;
pub mod sim;

pub use hud::{HealthBand, HudModel};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the presentation loop
    pub const TARGET_FPS: u32 = 60;
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Seed used when none is configured
    pub const DEFAULT_SEED: u64 = 6;

    /// Screen dimensions
    pub const SCREEN_W: i32 = 960;
    pub const SCREEN_H: i32 = 540;
    /// Height of the HUD band at the top of the screen
    pub const HUD_H: i32 = 64;
    /// Gap between the screen edge / HUD and the playfield
    pub const PADDING: i32 = 12;
    /// Thickness of the border walls
    pub const WALL_THICKNESS: i32 = 16;

    /// Agent defaults
    pub const AGENT_SIZE: i32 = 34;
    pub const AGENT_SPEED: f32 = 320.0;
    pub const AGENT_MAX_HEALTH: u32 = 100;

    /// Pickup (coin) defaults
    pub const COIN_SIZE: i32 = 22;
    pub const COIN_VALUE: u32 = 10;
    pub const COIN_COUNT: usize = 7;
    /// Spawn margin from the playfield edge
    pub const COIN_MARGIN: i32 = 40;

    /// Hazard defaults
    pub const HAZARD_SIZE: i32 = 32;
    pub const HAZARD_COUNT: usize = 2;
    pub const HAZARD_MARGIN: i32 = 60;
    pub const HAZARD_DAMAGE: u32 = 20;
    /// Post-hit invincibility window (seconds)
    pub const INVINCIBILITY_WINDOW: f32 = 0.65;

    /// Rejection sampling budget per spawn request
    pub const SPAWN_ATTEMPTS: u32 = 200;
}
