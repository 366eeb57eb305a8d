//! Move selection for human and computer players

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rules::max_move;

// ============================================================================
// INPUT COLLABORATOR
// ============================================================================

/// Context handed to the input collaborator when a human must move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePrompt {
    pub player_name: String,
    pub pile: u32,
    pub max_move: u32,
}

/// Errors raised while reading a move from outside the engine
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Input was not an integer. Recoverable: prompt again.
    #[error("not a number: {0:?}")]
    Parse(String),

    /// Input stream ended
    #[error("input closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InputError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, InputError::Parse(_))
    }
}

/// Source of raw, unvalidated human moves
pub trait MoveInput {
    fn request_move(&mut self, prompt: &MovePrompt) -> Result<u32, InputError>;
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// How a player picks its move
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStrategy {
    /// Ask the input collaborator
    #[default]
    Human,
    /// Always take half the pile
    Automated,
    /// Leave the opponent on a pile of the form 2^k - 1 whenever possible
    Perfect,
}

impl MoveStrategy {
    pub fn is_computer(self) -> bool {
        !matches!(self, MoveStrategy::Human)
    }

    /// Pick a move for `pile`. Only `Human` touches `input`.
    pub fn select_move(
        self,
        player_name: &str,
        pile: u32,
        input: &mut dyn MoveInput,
    ) -> Result<u32, InputError> {
        match self {
            MoveStrategy::Human => {
                let prompt = MovePrompt {
                    player_name: player_name.to_string(),
                    pile,
                    max_move: max_move(pile),
                };
                input.request_move(&prompt)
            }
            MoveStrategy::Automated => Ok(automated_move(pile)),
            MoveStrategy::Perfect => Ok(perfect_move(pile)),
        }
    }

    /// Move chosen without input, `None` for human players
    pub fn computer_move(self, pile: u32) -> Option<u32> {
        match self {
            MoveStrategy::Human => None,
            MoveStrategy::Automated => Some(automated_move(pile)),
            MoveStrategy::Perfect => Some(perfect_move(pile)),
        }
    }
}

/// Half-pile heuristic: the whole pile, capped at half of it
pub fn automated_move(pile: u32) -> u32 {
    if pile == 0 {
        return 1;
    }
    pile.min(max_move(pile))
}

/// Optimal single-pile play under the take-at-most-half rule.
///
/// Piles of the form `2^k - 1` are lost for the player to move: every move
/// lands in `[2^(k-1), 2^k - 2]`, from which the opponent can return to
/// `2^(k-1) - 1`. From a winning pile, move to the largest such value.
/// From a lost pile, remove 1 and hope.
pub fn perfect_move(pile: u32) -> u32 {
    if pile < 2 || pile.checked_add(1).map_or(true, u32::is_power_of_two) {
        return 1;
    }
    let bits = u32::BITS - 1 - pile.leading_zeros();
    let target = (1u32 << bits) - 1;
    pile - target
}

impl fmt::Display for MoveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveStrategy::Human => "human",
            MoveStrategy::Automated => "automated",
            MoveStrategy::Perfect => "perfect",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown strategy '{0}' (expected human, automated or perfect)")]
pub struct ParseStrategyError(String);

impl FromStr for MoveStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(MoveStrategy::Human),
            "automated" | "ai" => Ok(MoveStrategy::Automated),
            "perfect" => Ok(MoveStrategy::Perfect),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
