//! Simulate command - computer strategies playing each other
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: create_engine(), play_rounds(), report_results()
//! - Level 3: play_unattended_round(), compute_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;

use nim_core::{
    GameConfig, InputError, MoveInput, MovePrompt, MoveStrategy, Player, Seat, TurnEngine,
    TurnEvent,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Clone, Debug)]
pub struct SimulateArgs {
    /// Number of rounds to play
    #[arg(long, default_value = "100")]
    pub rounds: usize,

    /// Strategy for seat one
    #[arg(long, default_value = "automated")]
    pub player1: MoveStrategy,

    /// Strategy for seat two
    #[arg(long, default_value = "perfect")]
    pub player2: MoveStrategy,

    /// Smallest starting pile
    #[arg(long, default_value = "10")]
    pub min_pile: u32,

    /// Largest starting pile
    #[arg(long, default_value = "50")]
    pub max_pile: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single round
#[derive(Clone, Debug, serde::Serialize)]
struct RoundRecord {
    round: u32,
    starter: Seat,
    initial_pile: u32,
    winner: Seat,
    moves: usize,
}

/// Aggregated simulation results
#[derive(Clone, Debug, serde::Serialize)]
struct SimulationResults {
    player1: String,
    player2: String,
    player1_wins: usize,
    player2_wins: usize,
    avg_moves: f32,
    rounds: Vec<RoundRecord>,
}

/// Computer players never ask for input
struct Unattended;

impl MoveInput for Unattended {
    fn request_move(&mut self, _prompt: &MovePrompt) -> Result<u32, InputError> {
        Err(InputError::Closed)
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let mut engine = create_engine(&args, seed)?;

    tracing::info!(
        "Starting simulation: {} vs {} ({} rounds)",
        args.player1,
        args.player2,
        args.rounds
    );

    let records = play_rounds(&mut engine, args.rounds)?;
    let results = compute_statistics(&args, records);

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn create_engine(args: &SimulateArgs, seed: Option<u64>) -> Result<TurnEngine> {
    anyhow::ensure!(
        args.player1.is_computer() && args.player2.is_computer(),
        "simulation needs two computer strategies, got '{}' and '{}'",
        args.player1,
        args.player2
    );

    let mut config = GameConfig::two_player().with_pile_range(args.min_pile, args.max_pile);
    config.seed = seed;

    let players = [
        Player::new(Seat::One, args.player1.to_string(), args.player1),
        Player::new(Seat::Two, args.player2.to_string(), args.player2),
    ];
    let rng = config.rng();
    TurnEngine::new(config, players, rng).context("Invalid simulation configuration")
}

fn play_rounds(engine: &mut TurnEngine, rounds: usize) -> Result<Vec<RoundRecord>> {
    let mut records = Vec::with_capacity(rounds);
    for i in 0..rounds {
        if i > 0 {
            engine.reset();
        }
        let record = play_unattended_round(engine)?;
        tracing::debug!(
            "Round {}: pile {} won by {} in {} moves",
            record.round,
            record.initial_pile,
            record.winner,
            record.moves
        );
        records.push(record);
    }
    Ok(records)
}

fn report_results(results: &SimulationResults, args: &SimulateArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_unattended_round(engine: &mut TurnEngine) -> Result<RoundRecord> {
    let starter = engine
        .active_player()
        .map(|p| p.id)
        .context("round already finished")?;

    loop {
        if let TurnEvent::RoundOver { outcome, .. } = engine.play_turn(&mut Unattended)? {
            return Ok(RoundRecord {
                round: outcome.round,
                starter,
                initial_pile: outcome.initial_pile,
                winner: outcome.winner,
                moves: outcome.moves,
            });
        }
    }
}

fn compute_statistics(args: &SimulateArgs, rounds: Vec<RoundRecord>) -> SimulationResults {
    let player1_wins = rounds.iter().filter(|r| r.winner == Seat::One).count();
    let player2_wins = rounds.len() - player1_wins;

    let total_moves: usize = rounds.iter().map(|r| r.moves).sum();
    let avg_moves = if rounds.is_empty() {
        0.0
    } else {
        total_moves as f32 / rounds.len() as f32
    };

    SimulationResults {
        player1: args.player1.to_string(),
        player2: args.player2.to_string(),
        player1_wins,
        player2_wins,
        avg_moves,
        rounds,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_text_results(results: &SimulationResults) {
    let total = results.rounds.len();

    println!("\n=== Simulation Results ===");
    println!("Total rounds: {}", total);
    println!(
        "Player 1 ({}): {} ({:.1}%)",
        results.player1,
        results.player1_wins,
        percent(results.player1_wins, total)
    );
    println!(
        "Player 2 ({}): {} ({:.1}%)",
        results.player2,
        results.player2_wins,
        percent(results.player2_wins, total)
    );
    println!("Avg moves:    {:.1}", results.avg_moves);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(player1: MoveStrategy, player2: MoveStrategy) -> SimulateArgs {
        SimulateArgs {
            rounds: 20,
            player1,
            player2,
            min_pile: 10,
            max_pile: 50,
            json: false,
        }
    }

    #[test]
    fn test_compute_statistics_empty() {
        let results = compute_statistics(&args(MoveStrategy::Automated, MoveStrategy::Perfect), vec![]);
        assert_eq!(results.player1_wins, 0);
        assert_eq!(results.player2_wins, 0);
        assert_eq!(results.avg_moves, 0.0);
    }

    #[test]
    fn test_compute_statistics() {
        let record = |winner, moves| RoundRecord {
            round: 1,
            starter: Seat::One,
            initial_pile: 10,
            winner,
            moves,
        };
        let results = compute_statistics(
            &args(MoveStrategy::Automated, MoveStrategy::Perfect),
            vec![record(Seat::One, 4), record(Seat::Two, 6), record(Seat::One, 2)],
        );
        assert_eq!(results.player1_wins, 2);
        assert_eq!(results.player2_wins, 1);
        assert_eq!(results.avg_moves, 4.0);
    }

    #[test]
    fn test_rejects_human_strategy() {
        assert!(create_engine(&args(MoveStrategy::Human, MoveStrategy::Perfect), Some(1)).is_err());
    }

    #[test]
    fn test_play_rounds_deterministic() {
        let a = args(MoveStrategy::Automated, MoveStrategy::Automated);
        let mut e1 = create_engine(&a, Some(11)).unwrap();
        let mut e2 = create_engine(&a, Some(11)).unwrap();
        let r1 = play_rounds(&mut e1, 10).unwrap();
        let r2 = play_rounds(&mut e2, 10).unwrap();
        let w1: Vec<Seat> = r1.iter().map(|r| r.winner).collect();
        let w2: Vec<Seat> = r2.iter().map(|r| r.winner).collect();
        assert_eq!(w1, w2);
        assert_eq!(r1.len(), 10);
        assert_eq!(e1.scores().total_rounds(), 10);
    }

    #[test]
    fn test_perfect_wins_from_winning_piles() {
        let a = args(MoveStrategy::Perfect, MoveStrategy::Automated);
        let mut engine = create_engine(&a, Some(3)).unwrap();
        for record in play_rounds(&mut engine, 50).unwrap() {
            let pile = record.initial_pile;
            if record.starter == Seat::One && !(pile + 1).is_power_of_two() {
                assert_eq!(record.winner, Seat::One, "lost from pile {}", pile);
            }
        }
    }
}
