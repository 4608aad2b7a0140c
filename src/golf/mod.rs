//! Cosmic mini-golf simulation
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed 16 ms timestep only
//! - Seeded RNG only (reward draws)
//! - Obstacles evaluated in array order
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{ball_in_cup, magnet_pull, obstacle_contact, obstacle_response, out_of_bounds};
pub use state::{
    Aim, BallState, GolfEvent, GolfPhase, GolfSession, Hole, Obstacle, ObstacleKind, TrailPoint,
    default_course,
};
pub use tick::{Step, StepOutcome, TickInput, step, tick};
