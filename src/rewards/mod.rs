//! Reward system
//!
//! A fixed table of reward tiers and a weighted draw over it. Long droughts
//! without a Legendary inflate the weights (the "pity" multiplier).

pub mod draw;
pub mod tier;

pub use draw::{DrawHistory, HISTORY_WINDOW, RewardDraw, select_tier};
pub use tier::{Payload, RewardTable, RewardTier, Tier};
