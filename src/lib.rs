//! Rupeverse - game core for the Rupeverse mini-games
//!
//! Core modules:
//! - `rewards`: Reward tier table and pity-adjusted draws
//! - `rhythm`: Beat Blitz beat detection, accuracy scoring and showdown rounds
//! - `golf`: Cosmic mini-golf simulation (fixed timestep, seeded rewards)
//! - `platform`: Capability traits for audio analysis sources
//! - `settings`: Player preferences and quality presets
//! - `leaderboard`: Per-player Beat Blitz standings

pub mod error;
pub mod golf;
pub mod leaderboard;
pub mod platform;
pub mod rewards;
pub mod rhythm;
pub mod settings;

pub use error::{Error, Result};
pub use leaderboard::Leaderboard;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed golf simulation timestep in milliseconds (~60 Hz)
    pub const SIM_TICK_MS: u32 = 16;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playing field bounds (x in [0, FIELD_WIDTH], y below FIELD_HEIGHT is out)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Where the ball rests between shots
    pub const TEE_X: f32 = 100.0;
    pub const TEE_Y: f32 = 400.0;

    /// Drag distance to shot power
    pub const POWER_MULTIPLIER: f32 = 0.15;
    pub const MAX_POWER: f32 = 100.0;
    /// Shot power to launch speed (units per tick)
    pub const LAUNCH_SCALE: f32 = 0.2;

    /// Per-tick forces
    pub const DRAG: f32 = 0.99;
    pub const GRAVITY: f32 = 0.5;
    pub const REMOTE_PUSH_X: f32 = 0.5;
    pub const REMOTE_LIFT_Y: f32 = 0.3;
    pub const REMOTE_CONTROL_MS: u32 = 750;

    /// Base magnet strength; holes scale it
    pub const MAGNETIC_FORCE: f32 = 5.0;
    /// Distance to cup that sinks the ball
    pub const CUP_RADIUS: f32 = 20.0;

    /// Obstacle contact radius and effects
    pub const OBSTACLE_RADIUS: f32 = 30.0;
    pub const BOUNCE_FORCE: f32 = 15.0;
    pub const BOUNCE_DAMPING: f32 = 0.8;
    pub const SLOW_FACTOR: f32 = 0.5;
    pub const OBSTACLE_HIGHLIGHT_MS: u32 = 500;

    /// Trail opacity decay per tick
    pub const TRAIL_FADE: f32 = 0.8;

    /// Beat Blitz round length
    pub const SHOWDOWN_SECONDS: u32 = 30;
}

