//! Reward tiers and the tier table

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Allowed slack when checking that chances sum to one
const CHANCE_SUM_EPSILON: f64 = 1e-6;

/// Rarity of a reward, ordered from most to least likely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Common => "Common",
            Tier::Rare => "Rare",
            Tier::Epic => "Epic",
            Tier::Legendary => "Legendary",
        }
    }
}

/// What the player actually receives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// Flat score bonus
    Points(u32),
    /// Score multiplier for the next round
    Multiplier(f32),
    /// Named gameplay boost
    PowerBoost(String),
    /// Named cosmetic (skins, trails)
    CosmeticUnlock(String),
}

/// One row of the reward table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardTier {
    pub tier: Tier,
    /// Base draw probability in (0, 1]
    pub chance: f64,
    pub payload: Payload,
    /// Reveal effect the presentation layer plays
    pub fx: String,
    pub flavor_text: String,
}

impl RewardTier {
    fn new(tier: Tier, chance: f64, payload: Payload, fx: &str, flavor_text: &str) -> Self {
        Self {
            tier,
            chance,
            payload,
            fx: fx.to_string(),
            flavor_text: flavor_text.to_string(),
        }
    }
}

/// Ordered, validated list of reward tiers
///
/// Deserializing goes through the same validation as `RewardTable::new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RewardTier>", into = "Vec<RewardTier>")]
pub struct RewardTable {
    tiers: Vec<RewardTier>,
}

impl TryFrom<Vec<RewardTier>> for RewardTable {
    type Error = Error;

    fn try_from(tiers: Vec<RewardTier>) -> Result<Self> {
        Self::new(tiers)
    }
}

impl From<RewardTable> for Vec<RewardTier> {
    fn from(table: RewardTable) -> Self {
        table.tiers
    }
}

impl Default for RewardTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RewardTable {
    /// Build a table, checking that it is non-empty, every chance is in
    /// (0, 1] and the chances sum to 1.
    pub fn new(tiers: Vec<RewardTier>) -> Result<Self> {
        if tiers.is_empty() {
            return Err(Error::EmptyRewardTable);
        }
        for t in &tiers {
            if !(t.chance > 0.0 && t.chance <= 1.0) {
                return Err(Error::InvalidChance {
                    tier: t.tier,
                    chance: t.chance,
                });
            }
        }
        let sum: f64 = tiers.iter().map(|t| t.chance).sum();
        if (sum - 1.0).abs() > CHANCE_SUM_EPSILON {
            return Err(Error::ChanceSum { sum });
        }
        Ok(Self { tiers })
    }

    /// The game's built-in table
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                RewardTier::new(
                    Tier::Common,
                    0.60,
                    Payload::Points(100),
                    "subtleParticles",
                    "A glimmer of stardust!",
                ),
                RewardTier::new(
                    Tier::Rare,
                    0.25,
                    Payload::Multiplier(1.5),
                    "blueGlowTrail",
                    "Cosmic boost unlocked!",
                ),
                RewardTier::new(
                    Tier::Epic,
                    0.10,
                    Payload::PowerBoost("precisionBoost".into()),
                    "purplePulse",
                    "Pulse of precision flows through you!",
                ),
                RewardTier::new(
                    Tier::Legendary,
                    0.05,
                    Payload::CosmeticUnlock("goldenBoltSkin".into()),
                    "goldenFlash",
                    "The Glizzy Gods smile... Legendary Unlocked!",
                ),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RewardTier> {
        self.tiers.iter()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Last row in walk order
    pub fn last(&self) -> &RewardTier {
        // Non-empty by construction
        &self.tiers[self.tiers.len() - 1]
    }

    pub fn get(&self, tier: Tier) -> Option<&RewardTier> {
        self.tiers.iter().find(|t| t.tier == tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_sums_to_one() {
        let table = RewardTable::standard();
        let sum: f64 = table.iter().map(|t| t.chance).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(RewardTable::new(table.iter().cloned().collect()).is_ok());
    }

    #[test]
    fn test_standard_table_order() {
        let order: Vec<Tier> = RewardTable::standard().iter().map(|t| t.tier).collect();
        assert_eq!(
            order,
            vec![Tier::Common, Tier::Rare, Tier::Epic, Tier::Legendary]
        );
        assert_eq!(RewardTable::standard().last().tier, Tier::Legendary);
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(matches!(
            RewardTable::new(Vec::new()),
            Err(Error::EmptyRewardTable)
        ));
    }

    #[test]
    fn test_rejects_bad_sum() {
        let tiers = vec![
            RewardTier::new(Tier::Common, 0.5, Payload::Points(10), "", ""),
            RewardTier::new(Tier::Rare, 0.3, Payload::Points(20), "", ""),
        ];
        match RewardTable::new(tiers) {
            Err(Error::ChanceSum { sum }) => assert!((sum - 0.8).abs() < 1e-9),
            other => panic!("expected ChanceSum, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_zero_chance() {
        let tiers = vec![
            RewardTier::new(Tier::Common, 1.0, Payload::Points(10), "", ""),
            RewardTier::new(Tier::Legendary, 0.0, Payload::Points(20), "", ""),
        ];
        assert!(matches!(
            RewardTable::new(tiers),
            Err(Error::InvalidChance {
                tier: Tier::Legendary,
                ..
            })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = serde_json::to_string(&RewardTable::standard()).unwrap();
        let table: RewardTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, RewardTable::standard());

        assert!(serde_json::from_str::<RewardTable>("[]").is_err());
    }

    #[test]
    fn test_lookup_by_tier() {
        let table = RewardTable::standard();
        let epic = table.get(Tier::Epic).unwrap();
        assert_eq!(epic.payload, Payload::PowerBoost("precisionBoost".into()));
    }
}
