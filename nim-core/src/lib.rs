//! Nim Core - Single-pile game engine
//!
//! This crate provides the core game logic for single-pile Nim:
//! - Pile rules (take at most half, starting pile generation, coin flip)
//! - Move strategies (human input, half-pile heuristic, perfect play)
//! - Turn engine state machine with win detection
//! - Session-wide score tracking
//! - Game configuration

pub mod config;
pub mod engine;
pub mod player;
pub mod rules;
pub mod score;
pub mod strategy;

// Re-exports for convenient access
pub use config::{create_rng, ConfigError, GameConfig, Mode};
pub use engine::{GameOutcome, MoveError, PlayError, RoundState, TurnEngine, TurnEvent, TurnRecord};
pub use player::{Player, Seat};
pub use rules::{choose_starting_player, generate_pile_size, is_terminal, max_move, validate_move, PileRange};
pub use score::{PlayerScore, ScoreTracker};
pub use strategy::{automated_move, perfect_move, InputError, MoveInput, MovePrompt, MoveStrategy, ParseStrategyError};
