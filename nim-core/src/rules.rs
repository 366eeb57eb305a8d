//! Pile rules: move legality, starting pile size, starting player
//!
//! This variant of Nim caps every move at half the pile (floor division),
//! so a pile of 1 or less has no legal move and ends the round.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::player::Seat;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default smallest starting pile
pub const DEFAULT_MIN_PILE: u32 = 10;

/// Default largest starting pile
pub const DEFAULT_MAX_PILE: u32 = 50;

/// Smallest pile on which a move is possible
pub const MIN_PLAYABLE_PILE: u32 = 2;

// ============================================================================
// PILE RANGE
// ============================================================================

/// Inclusive range of starting pile sizes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileRange {
    pub min: u32,
    pub max: u32,
}

impl PileRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Range containing exactly one pile size
    pub fn fixed(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn contains(&self, pile: u32) -> bool {
        (self.min..=self.max).contains(&pile)
    }
}

impl Default for PileRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PILE, DEFAULT_MAX_PILE)
    }
}

// ============================================================================
// RULES
// ============================================================================

/// Draw a starting pile size uniformly from `range`.
///
/// Panics if the range is empty; `GameConfig::validate` rules that out.
pub fn generate_pile_size<R: Rng + ?Sized>(range: PileRange, rng: &mut R) -> u32 {
    rng.gen_range(range.min..=range.max)
}

/// Largest legal move for a pile
pub fn max_move(pile: u32) -> u32 {
    pile / 2
}

/// A move is legal iff `1 <= mv <= pile / 2`
pub fn validate_move(mv: u32, pile: u32) -> bool {
    mv >= 1 && mv <= max_move(pile)
}

/// No legal move remains
pub fn is_terminal(pile: u32) -> bool {
    pile < MIN_PLAYABLE_PILE
}

/// Fair coin flip between the two seats
pub fn choose_starting_player<R: Rng + ?Sized>(rng: &mut R) -> Seat {
    if rng.gen_bool(0.5) {
        Seat::One
    } else {
        Seat::Two
    }
}

// ============================================================================
// TESTS
// ============================================================================
