//! Pity-adjusted reward draws
//!
//! Every 10 consecutive non-Legendary results raise the weight multiplier by
//! 0.1, once at least 10 draws have happened this session. The multiplier
//! scales every tier as the table is walked in order, so earlier tiers soak
//! up the inflated mass first.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::tier::{RewardTable, RewardTier, Tier};
use crate::error::{Error, Result};

/// Number of recent results kept for display
pub const HISTORY_WINDOW: usize = 50;
/// Draws required before pity can kick in
pub const PITY_MIN_DRAWS: u64 = 10;
/// Drought length per pity step
pub const PITY_STEP_DRAWS: u32 = 10;
/// Multiplier increase per pity step
pub const PITY_STEP: f64 = 0.1;

/// Session draw history
///
/// Only a trailing window of results is stored. The counters keep the pity
/// computation identical to scanning an unbounded list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredHistory")]
pub struct DrawHistory {
    /// Most recent results, oldest first
    recent: VecDeque<Tier>,
    /// Draws this session
    total_draws: u64,
    /// Trailing non-Legendary draws
    drought: u32,
}

impl DrawHistory {
    pub fn new() -> Self {
        Self {
            recent: VecDeque::with_capacity(HISTORY_WINDOW),
            total_draws: 0,
            drought: 0,
        }
    }

    /// Record a result
    pub fn push(&mut self, tier: Tier) {
        self.total_draws += 1;
        if tier == Tier::Legendary {
            self.drought = 0;
        } else {
            self.drought = self.drought.saturating_add(1);
        }

        self.recent.push_back(tier);
        self.trim();
    }

    fn trim(&mut self) {
        while self.recent.len() > HISTORY_WINDOW {
            self.recent.pop_front();
        }
    }

    /// Consecutive non-Legendary results counting back from the latest
    pub fn consecutive_non_legendary(&self) -> u32 {
        self.drought
    }

    pub fn total_draws(&self) -> u64 {
        self.total_draws
    }

    /// Retained results, oldest first
    pub fn recent(&self) -> impl Iterator<Item = Tier> + '_ {
        self.recent.iter().copied()
    }

    /// Number of retained results (at most `HISTORY_WINDOW`)
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn last(&self) -> Option<Tier> {
        self.recent.back().copied()
    }

    pub fn pity_multiplier(&self) -> f64 {
        if self.total_draws < PITY_MIN_DRAWS {
            return 1.0;
        }
        let steps = self.drought / PITY_STEP_DRAWS;
        1.0 + steps as f64 * PITY_STEP
    }

    pub fn clear(&mut self) {
        self.recent.clear();
        self.total_draws = 0;
        self.drought = 0;
    }
}

/// Saved form of `DrawHistory`, checked before it is trusted
#[derive(Deserialize)]
struct StoredHistory {
    recent: Vec<Tier>,
    total_draws: u64,
    drought: u32,
}

impl TryFrom<StoredHistory> for DrawHistory {
    type Error = Error;

    fn try_from(stored: StoredHistory) -> Result<Self> {
        let StoredHistory {
            recent,
            total_draws,
            drought,
        } = stored;

        if recent.len() as u64 > total_draws {
            return Err(Error::InvalidHistory {
                reason: "more results than draws",
            });
        }
        if drought as u64 > total_draws {
            return Err(Error::InvalidHistory {
                reason: "drought longer than the session",
            });
        }
        let trailing = recent
            .iter()
            .rev()
            .take_while(|&&t| t != Tier::Legendary)
            .count() as u32;
        let has_legendary = (trailing as usize) < recent.len();
        if (has_legendary && drought != trailing) || drought < trailing {
            return Err(Error::InvalidHistory {
                reason: "drought does not match the recorded results",
            });
        }

        let mut history = Self {
            recent: recent.into(),
            total_draws,
            drought,
        };
        history.trim();
        Ok(history)
    }
}

impl FromIterator<Tier> for DrawHistory {
    fn from_iter<I: IntoIterator<Item = Tier>>(iter: I) -> Self {
        let mut history = Self::new();
        for tier in iter {
            history.push(tier);
        }
        history
    }
}

/// Walk the table accumulating `chance * pity` and pick the first row whose
/// running sum reaches `roll`. Falls back to the last row evaluated.
pub fn select_tier(table: &RewardTable, pity: f64, roll: f64) -> &RewardTier {
    let mut probability_sum = 0.0;
    for tier in table.iter() {
        probability_sum += tier.chance * pity;
        if roll <= probability_sum {
            return tier;
        }
    }
    table.last()
}

/// A session's reward source: table, history and a seeded RNG
#[derive(Debug, Clone)]
pub struct RewardDraw {
    table: RewardTable,
    history: DrawHistory,
    rng: Pcg32,
    last: Option<RewardTier>,
}

impl RewardDraw {
    /// Standard table with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self::with_table(RewardTable::standard(), seed)
    }

    pub fn with_table(table: RewardTable, seed: u64) -> Self {
        Self {
            table,
            history: DrawHistory::new(),
            rng: Pcg32::seed_from_u64(seed),
            last: None,
        }
    }

    /// Standard table seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            table: RewardTable::standard(),
            history: DrawHistory::new(),
            rng: Pcg32::from_os_rng(),
            last: None,
        }
    }

    /// Draw a reward and record it
    pub fn draw(&mut self) -> RewardTier {
        let roll: f64 = self.rng.random();
        self.draw_with_roll(roll)
    }

    /// Draw using a caller-supplied roll in [0, 1)
    pub fn draw_with_roll(&mut self, roll: f64) -> RewardTier {
        let pity = self.history.pity_multiplier();
        let reward = select_tier(&self.table, pity, roll).clone();
        self.history.push(reward.tier);

        log::debug!(
            "Reward draw #{}: roll={:.4} pity={:.1} -> {}",
            self.history.total_draws(),
            roll,
            pity,
            reward.tier.as_str()
        );

        self.last = Some(reward.clone());
        reward
    }

    pub fn pity_multiplier(&self) -> f64 {
        self.history.pity_multiplier()
    }

    pub fn history(&self) -> &DrawHistory {
        &self.history
    }

    pub fn table(&self) -> &RewardTable {
        &self.table
    }

    /// Most recent reward this session
    pub fn last(&self) -> Option<&RewardTier> {
        self.last.as_ref()
    }

    /// Start a fresh session (keeps RNG stream)
    pub fn reset(&mut self) {
        self.history.clear();
        self.last = None;
    }
}
