//! Beat Blitz rhythm game
//!
//! Frame-driven and single-threaded: the showdown owns its audio source,
//! estimator and scorer, and everything is mutated from its own callbacks.

pub mod beat;
pub mod scoring;
pub mod showdown;

pub use beat::{BandLevels, BeatIntensityEstimator};
pub use scoring::{AccuracyScorer, ActionResult, ComboState, accuracy, score_action};
pub use showdown::{BreathDetector, BreathMode, RoundPhase, Showdown, ShowdownSummary};
