//! Player identities

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::strategy::MoveStrategy;

/// Player seat, the stable identifier of a player within a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    One = 0,
    Two = 1,
}

impl Seat {
    pub fn other(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::One => write!(f, "player 1"),
            Seat::Two => write!(f, "player 2"),
        }
    }
}

/// A participant in the session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: Seat,
    pub name: String,
    pub strategy: MoveStrategy,
}

impl Player {
    pub fn new(id: Seat, name: impl Into<String>, strategy: MoveStrategy) -> Self {
        Self {
            id,
            name: name.into(),
            strategy,
        }
    }

    pub fn human(id: Seat, name: impl Into<String>) -> Self {
        Self::new(id, name, MoveStrategy::Human)
    }

    /// Computer opponent using the half-pile heuristic
    pub fn computer(id: Seat) -> Self {
        Self::new(id, "AI", MoveStrategy::Automated)
    }

    pub fn is_computer(&self) -> bool {
        self.strategy.is_computer()
    }
}
