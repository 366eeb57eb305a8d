//! Session-wide win counters

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::player::{Player, Seat};

/// Wins of one player at a point in time
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub seat: Seat,
    pub name: String,
    pub wins: u32,
}

/// Win counters keyed by seat, kept for the whole session
#[derive(Clone, Debug, Default)]
pub struct ScoreTracker {
    wins: FxHashMap<Seat, u32>,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_win(&mut self, seat: Seat) {
        *self.wins.entry(seat).or_insert(0) += 1;
    }

    pub fn score(&self, seat: Seat) -> u32 {
        self.wins.get(&seat).copied().unwrap_or(0)
    }

    /// Rounds recorded so far
    pub fn total_rounds(&self) -> u32 {
        self.wins.values().sum()
    }

    pub fn snapshot(&self, players: &[Player]) -> Vec<PlayerScore> {
        players
            .iter()
            .map(|p| PlayerScore {
                seat: p.id,
                name: p.name.clone(),
                wins: self.score(p.id),
            })
            .collect()
    }
}
