//! Turn engine: pile, active player, alternation and win detection

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig, Mode};
use crate::player::{Player, Seat};
use crate::rules::{choose_starting_player, generate_pile_size, is_terminal, max_move, validate_move};
use crate::score::{PlayerScore, ScoreTracker};
use crate::strategy::{InputError, MoveInput, MoveStrategy};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Round state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    AwaitingMove { active: Seat },
    RoundOver { winner: Seat },
}

/// One accepted move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub seat: Seat,
    pub removed: u32,
    pub pile_after: u32,
}

/// Result of a finished round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub round: u32,
    pub winner: Seat,
    pub winner_name: String,
    /// Round ended by the automated player reducing the pile to 1 in single-player mode
    pub forced: bool,
    pub initial_pile: u32,
    pub moves: usize,
    pub final_scores: Vec<PlayerScore>,
}

/// What happened after an accepted move
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    Moved { seat: Seat, removed: u32, pile: u32 },
    RoundOver { removed: u32, outcome: GameOutcome },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MoveError {
    /// Recoverable: the same player moves again
    #[error("invalid move: cannot remove {requested} from a pile of {pile} (1 to {max} allowed)")]
    InvalidMove { requested: u32, pile: u32, max: u32 },

    #[error("round is over")]
    RoundOver,
}

#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Input(#[from] InputError),
}

// ============================================================================
// TURN ENGINE
// ============================================================================

/// Owns the pile and the active seat for the current round, plus the
/// session's players and scores.
#[derive(Clone, Debug)]
pub struct TurnEngine<R: Rng = ChaCha8Rng> {
    config: GameConfig,
    players: [Player; 2],
    scores: ScoreTracker,
    rng: R,

    pile: u32,
    initial_pile: u32,
    state: RoundState,

    /// Rounds started this session
    round: u32,

    /// Accepted moves of the current round
    history: Vec<TurnRecord>,
}

impl<R: Rng> TurnEngine<R> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Start a session with a random first round
    pub fn new(config: GameConfig, players: [Player; 2], mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let pile = generate_pile_size(config.pile_range, &mut rng);
        let starting = choose_starting_player(&mut rng);
        Self::with_start(config, players, rng, pile, starting)
    }

    /// Start a session with a fixed first round
    pub fn with_start(
        config: GameConfig,
        players: [Player; 2],
        rng: R,
        pile: u32,
        starting: Seat,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if players[0].id != Seat::One || players[1].id != Seat::Two {
            return Err(ConfigError::SeatMismatch);
        }
        if is_terminal(pile) {
            return Err(ConfigError::PileTooSmall(pile));
        }

        let mut engine = Self {
            config,
            players,
            scores: ScoreTracker::new(),
            rng,
            pile,
            initial_pile: pile,
            state: RoundState::AwaitingMove { active: starting },
            round: 0,
            history: Vec::new(),
        };
        engine.start_round(pile, starting);
        Ok(engine)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn pile(&self) -> u32 {
        self.pile
    }

    pub fn initial_pile(&self) -> u32 {
        self.initial_pile
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_round_over(&self) -> bool {
        matches!(self.state, RoundState::RoundOver { .. })
    }

    /// Player to move, `None` once the round is over
    pub fn active_player(&self) -> Option<&Player> {
        match self.state {
            RoundState::AwaitingMove { active } => Some(self.player(active)),
            RoundState::RoundOver { .. } => None,
        }
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // ========================================================================
    // TURNS
    // ========================================================================

    /// Ask the active player's strategy for a move and apply it
    pub fn play_turn(&mut self, input: &mut dyn MoveInput) -> Result<TurnEvent, PlayError> {
        let active = self.active_player().ok_or(MoveError::RoundOver)?;
        let mv = active.strategy.select_move(&active.name, self.pile, input)?;
        Ok(self.submit_move(mv)?)
    }

    /// Validate and apply a move for the active player.
    ///
    /// An invalid move leaves the state untouched and the same player to move.
    pub fn submit_move(&mut self, mv: u32) -> Result<TurnEvent, MoveError> {
        let active = match self.state {
            RoundState::AwaitingMove { active } => active,
            RoundState::RoundOver { .. } => return Err(MoveError::RoundOver),
        };

        if !validate_move(mv, self.pile) {
            return Err(MoveError::InvalidMove {
                requested: mv,
                pile: self.pile,
                max: max_move(self.pile),
            });
        }

        self.pile -= mv;
        self.history.push(TurnRecord {
            seat: active,
            removed: mv,
            pile_after: self.pile,
        });

        // Half-pile heuristic leaving a single item in single-player mode ends the round
        if self.config.mode == Mode::SinglePlayer
            && self.player(active).strategy == MoveStrategy::Automated
            && self.pile == 1
        {
            let outcome = self.finish_round(active, true);
            return Ok(TurnEvent::RoundOver { removed: mv, outcome });
        }

        if is_terminal(self.pile) {
            // Winner is the seat that just moved, not the one left facing the pile
            let outcome = self.finish_round(active, false);
            return Ok(TurnEvent::RoundOver { removed: mv, outcome });
        }

        self.state = RoundState::AwaitingMove { active: active.other() };
        Ok(TurnEvent::Moved {
            seat: active,
            removed: mv,
            pile: self.pile,
        })
    }

    // ========================================================================
    // ROUNDS
    // ========================================================================

    /// New round with a fresh pile and a fresh coin flip. Scores are kept.
    pub fn reset(&mut self) {
        let pile = generate_pile_size(self.config.pile_range, &mut self.rng);
        let starting = choose_starting_player(&mut self.rng);
        self.start_round(pile, starting);
    }

    /// New round with a fixed pile and starting seat
    pub fn reset_with(&mut self, pile: u32, starting: Seat) -> Result<(), ConfigError> {
        if is_terminal(pile) {
            return Err(ConfigError::PileTooSmall(pile));
        }
        self.start_round(pile, starting);
        Ok(())
    }

    fn start_round(&mut self, pile: u32, starting: Seat) {
        self.round += 1;
        self.pile = pile;
        self.initial_pile = pile;
        self.state = RoundState::AwaitingMove { active: starting };
        self.history.clear();
    }

    fn finish_round(&mut self, winner: Seat, forced: bool) -> GameOutcome {
        self.state = RoundState::RoundOver { winner };
        self.scores.record_win(winner);

        GameOutcome {
            round: self.round,
            winner,
            winner_name: self.player(winner).name.clone(),
            forced,
            initial_pile: self.initial_pile,
            moves: self.history.len(),
            final_scores: self.scores.snapshot(&self.players),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
