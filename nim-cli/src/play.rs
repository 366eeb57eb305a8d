//! Play command - interactive rounds in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), create_players(), play_session()
//! - Level 3: play_round(), report_outcome()
//! - Level 4: argument conversion

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use nim_core::{
    GameConfig, GameOutcome, MoveError, MoveStrategy, Mode, PlayError, Player, Seat, TurnEngine,
    TurnEvent,
};

use crate::console::Console;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Play against the computer
    Single,
    /// Two people at one terminal
    Two,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Single => Mode::SinglePlayer,
            ModeArg::Two => Mode::TwoPlayer,
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct PlayArgs {
    /// Game mode (asked interactively when omitted)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Smallest starting pile
    #[arg(long)]
    pub min_pile: Option<u32>,

    /// Largest starting pile
    #[arg(long)]
    pub max_pile: Option<u32>,

    /// JSON game configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Name of player 1 (asked when omitted)
    #[arg(long)]
    pub player1: Option<String>,

    /// Name of player 2 in two-player mode (asked when omitted)
    #[arg(long)]
    pub player2: Option<String>,

    /// Computer strategy in single-player mode
    #[arg(long, default_value = "automated")]
    pub computer: MoveStrategy,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command on the process terminal
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    play_session(&args, seed, &mut console)?;
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play rounds until the user declines another one. Returns every outcome.
pub fn play_session<R: BufRead, W: Write>(
    args: &PlayArgs,
    seed: Option<u64>,
    console: &mut Console<R, W>,
) -> Result<Vec<GameOutcome>> {
    let config = build_config(args, seed, console)?;
    let players = create_players(&config, args, console)?;
    let rng = config.rng();
    let mut engine = TurnEngine::new(config, players, rng).context("Invalid game configuration")?;

    let mut outcomes = Vec::new();
    loop {
        outcomes.push(play_round(&mut engine, console)?);

        if !console.ask_yes_no("\nWould you like to play again? (yes/no)")? {
            console.say("Thanks for playing!")?;
            break;
        }
        engine.reset();
        console.say("\nStarting a new game...")?;
    }

    Ok(outcomes)
}

/// Merge config file, command line and interactive answers
fn build_config<R: BufRead, W: Write>(
    args: &PlayArgs,
    seed: Option<u64>,
    console: &mut Console<R, W>,
) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(min) = args.min_pile {
        config.pile_range.min = min;
    }
    if let Some(max) = args.max_pile {
        config.pile_range.max = max;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    if let Some(mode) = args.mode {
        config.mode = mode.into();
    } else if args.config.is_none() {
        let choice = console.ask_number(
            "Choose game mode: Enter '1' for Single Player (AI) or '2' for Two Player: ",
        )?;
        config.mode = if choice == 1 {
            Mode::SinglePlayer
        } else {
            Mode::TwoPlayer
        };
    }

    config.validate()?;
    tracing::info!(
        "Session config: mode={:?}, piles {}..={}",
        config.mode,
        config.pile_range.min,
        config.pile_range.max
    );
    Ok(config)
}

fn create_players<R: BufRead, W: Write>(
    config: &GameConfig,
    args: &PlayArgs,
    console: &mut Console<R, W>,
) -> Result<[Player; 2]> {
    let first = match &args.player1 {
        Some(name) => name.clone(),
        None => console.ask("Enter the name of Player 1: ")?,
    };

    let second = match config.mode {
        Mode::SinglePlayer => {
            anyhow::ensure!(
                args.computer.is_computer(),
                "--computer must be a computer strategy, got '{}'",
                args.computer
            );
            Player::new(Seat::Two, "AI", args.computer)
        }
        Mode::TwoPlayer => {
            let name = match &args.player2 {
                Some(name) => name.clone(),
                None => console.ask("Enter the name of Player 2: ")?,
            };
            Player::human(Seat::Two, name)
        }
    };

    Ok([Player::human(Seat::One, first), second])
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play the engine's current round to the end
pub fn play_round<R: BufRead, W: Write>(
    engine: &mut TurnEngine,
    console: &mut Console<R, W>,
) -> Result<GameOutcome> {
    tracing::info!("Round {} starting with pile {}", engine.round(), engine.pile());

    console.say("Welcome to the Game of Nim!")?;
    console.say(format!("Initial pile size: {}", engine.pile()))?;
    if let Some(starter) = engine.active_player() {
        console.say(format!("{} will start.", starter.name))?;
    }

    loop {
        let name = match engine.active_player() {
            Some(player) => player.name.clone(),
            None => anyhow::bail!("round {} already finished", engine.round()),
        };
        console.say(format!("\n{}'s turn.", name))?;
        console.say(format!("Current pile size: {}", engine.pile()))?;

        match engine.play_turn(console) {
            Ok(TurnEvent::Moved { seat, removed, pile }) => {
                tracing::debug!("{} removed {}, pile now {}", seat, removed, pile);
                console.say(format!("{} removed {} pieces.", name, removed))?;
            }
            Ok(TurnEvent::RoundOver { removed, outcome }) => {
                console.say(format!("{} removed {} pieces.", name, removed))?;
                report_outcome(&outcome, console)?;
                return Ok(outcome);
            }
            Err(PlayError::Move(err @ MoveError::InvalidMove { .. })) => {
                tracing::debug!("{}: {}", name, err);
                console.say("Invalid move. Try again.")?;
            }
            Err(PlayError::Move(err)) => return Err(err.into()),
            Err(PlayError::Input(err)) if err.is_recoverable() => {
                console.say("Please enter a whole number.")?;
            }
            Err(PlayError::Input(err)) => {
                return Err(err).context("Failed to read move");
            }
        }
    }
}

fn report_outcome<R: BufRead, W: Write>(
    outcome: &GameOutcome,
    console: &mut Console<R, W>,
) -> Result<()> {
    tracing::info!(
        "Round {} won by {} after {} moves (forced={})",
        outcome.round,
        outcome.winner_name,
        outcome.moves,
        outcome.forced
    );

    if outcome.forced {
        console.say("You lose, the AI always wins!")?;
    }
    console.say(format!("\n{} wins!", outcome.winner_name))?;
    console.say(format!("Score: {}", format_scores(outcome)))?;
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_scores(outcome: &GameOutcome) -> String {
    outcome
        .final_scores
        .iter()
        .map(|s| format!("{} - {}", s.name, s.wins))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// TESTS
// ============================================================================
