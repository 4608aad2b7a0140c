//! Beat Blitz standings
//!
//! One record per player in the showdown roster, holding that player's best
//! round. Players rank by best score, then by perfect cuts; full ties keep
//! roster order.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rhythm::ShowdownSummary;

/// Players shown on the showdown screen
pub const DEFAULT_ROSTER: [&str; 2] = ["Cosmic Creator", "Rhythm Master"];

/// A player's best round and totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    /// Best round so far (all zeros before the first round)
    pub best: ShowdownSummary,
    pub rounds: u32,
    /// Rounds that earned the Rhythm Crown
    pub crowns: u32,
}

impl PlayerRecord {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            best: ShowdownSummary::default(),
            rounds: 0,
            crowns: 0,
        }
    }
}

/// Higher score wins, perfect cuts break ties
fn compare_rounds(a: &ShowdownSummary, b: &ShowdownSummary) -> Ordering {
    a.score
        .cmp(&b.score)
        .then(a.perfect_cuts.cmp(&b.perfect_cuts))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    players: Vec<PlayerRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut board = Self::new();
        for name in names {
            board.entry(name);
        }
        board
    }

    /// The showdown screen's two players
    pub fn standard() -> Self {
        Self::with_roster(DEFAULT_ROSTER)
    }

    fn entry(&mut self, name: &str) -> &mut PlayerRecord {
        let index = match self.players.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                self.players.push(PlayerRecord::new(name));
                self.players.len() - 1
            }
        };
        &mut self.players[index]
    }

    /// Record a finished round, adding the player if needed. Returns true
    /// when it is the player's new best.
    pub fn record(&mut self, name: &str, summary: &ShowdownSummary) -> bool {
        let record = self.entry(name);
        record.rounds += 1;
        if summary.earned_crown() {
            record.crowns += 1;
        }

        let improved =
            record.rounds == 1 || compare_rounds(summary, &record.best) == Ordering::Greater;
        if improved {
            record.best = *summary;
            log::info!(
                "{name}: new best {} points ({} perfect cuts)",
                summary.score,
                summary.perfect_cuts
            );
        }
        improved
    }

    pub fn player(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Players best first
    pub fn standings(&self) -> Vec<&PlayerRecord> {
        let mut standings: Vec<&PlayerRecord> = self.players.iter().collect();
        // Stable sort keeps roster order on full ties
        standings.sort_by(|a, b| compare_rounds(&b.best, &a.best));
        standings
    }

    /// 1-based position in the standings
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.standings()
            .iter()
            .position(|p| p.name == name)
            .map(|i| i + 1)
    }

    pub fn leader(&self) -> Option<&PlayerRecord> {
        self.standings().first().copied()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let board: Leaderboard = serde_json::from_str(&json)?;
        log::info!("Loaded standings for {} players", board.players.len());
        Ok(board)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string(self)?)?;
        log::info!("Standings saved ({} players)", self.players.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(score: u64, perfect_cuts: u32) -> ShowdownSummary {
        ShowdownSummary {
            score,
            perfect_cuts,
            combo: 0,
            best_combo: perfect_cuts,
        }
    }

    #[test]
    fn test_standard_roster() {
        let board = Leaderboard::standard();
        assert_eq!(board.len(), 2);
        let names: Vec<&str> = board.standings().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, DEFAULT_ROSTER);
        assert_eq!(board.player("Rhythm Master").map(|p| p.rounds), Some(0));
    }

    #[test]
    fn test_keeps_personal_best() {
        let mut board = Leaderboard::standard();
        assert!(board.record("Cosmic Creator", &round(300, 2)));
        assert!(!board.record("Cosmic Creator", &round(200, 6)));
        assert!(board.record("Cosmic Creator", &round(300, 3)));

        let me = board.player("Cosmic Creator").unwrap();
        assert_eq!(me.best, round(300, 3));
        assert_eq!(me.rounds, 3);
        assert_eq!(me.crowns, 1);
    }

    #[test]
    fn test_first_round_counts_even_at_zero() {
        let mut board = Leaderboard::new();
        assert!(board.record("Nova", &round(0, 0)));
        assert!(!board.record("Nova", &round(0, 0)));
        assert_eq!(board.player("Nova").unwrap().rounds, 2);
    }

    #[test]
    fn test_ties_broken_by_perfect_cuts() {
        let mut board = Leaderboard::standard();
        board.record("Cosmic Creator", &round(500, 2));
        board.record("Rhythm Master", &round(500, 4));
        assert_eq!(board.rank_of("Rhythm Master"), Some(1));
        assert_eq!(board.rank_of("Cosmic Creator"), Some(2));
        assert_eq!(board.leader().map(|p| p.name.as_str()), Some("Rhythm Master"));
    }

    #[test]
    fn test_full_tie_keeps_roster_order() {
        let mut board = Leaderboard::standard();
        board.record("Rhythm Master", &round(100, 1));
        board.record("Cosmic Creator", &round(100, 1));
        assert_eq!(board.rank_of("Cosmic Creator"), Some(1));
        assert_eq!(board.rank_of("Nobody"), None);
    }

    #[test]
    fn test_roundtrip_file() {
        let path = std::env::temp_dir().join(format!("rupeverse_board_{}.json", std::process::id()));
        let mut board = Leaderboard::standard();
        board.record("Cosmic Creator", &round(1234, 5));
        board.save_to(&path).unwrap();
        assert_eq!(Leaderboard::load_from(&path).unwrap(), board);
        let _ = std::fs::remove_file(&path);
    }
}
