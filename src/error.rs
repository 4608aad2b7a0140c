//! Crate error type
//!
//! Gameplay operations are total. Errors only come from validating
//! caller-supplied data and from persistence.

use thiserror::Error;

use crate::rewards::Tier;

#[derive(Debug, Error)]
pub enum Error {
    /// Frequency data had no bins to analyse
    #[error("spectrum contains no frequency bins")]
    EmptySpectrum,

    #[error("reward table has no tiers")]
    EmptyRewardTable,

    #[error("{tier:?} chance {chance} is outside (0, 1]")]
    InvalidChance { tier: Tier, chance: f64 },

    /// Tier chances must add up to exactly one
    #[error("reward chances sum to {sum}, expected 1.0")]
    ChanceSum { sum: f64 },

    /// Saved draw history whose counters disagree with its results
    #[error("invalid draw history: {reason}")]
    InvalidHistory { reason: &'static str },

    #[error("golf course has no holes")]
    EmptyCourse,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
