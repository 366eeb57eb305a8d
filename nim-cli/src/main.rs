//! Nim CLI - Command-line interface
//!
//! Commands:
//! - play: Interactive rounds against the computer or a second player
//! - simulate: Computer strategies playing each other

mod console;
mod play;
mod simulate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nim")]
#[command(about = "Single-pile Nim: take at most half, last to leave one wins")]
struct Cli {
    /// Random seed for reproducible piles and coin flips
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal
    Play(play::PlayArgs),
    /// Pit computer strategies against each other
    Simulate(simulate::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the game text
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Simulate(args) => simulate::run(args, cli.seed),
    }
}
