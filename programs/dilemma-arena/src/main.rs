//! Dilemma Arena - command line runner
//!
//! Commands:
//! - play: run one game between two strategies
//! - tournament: round-robin among many strategies
//! - list: show the strategy catalog

mod play;
mod tournament;

use clap::{Parser, Subcommand};
use dilemma_logic::StrategyKind;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dilemma-arena")]
#[command(about = "Iterated Prisoner's Dilemma games and tournaments")]
struct Cli {
    /// Log every game (debug level)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(play::PlayArgs),
    /// Run a round-robin tournament
    Tournament(tournament::TournamentArgs),
    /// List available strategies
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Tournament(args) => tournament::run(args),
        Commands::List => {
            list_strategies();
            Ok(())
        }
    }
}

/// `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_strategies() {
    println!("{:<12} {:<30} {}", "ABBREV", "STRATEGY", "DESCRIPTION");
    for kind in StrategyKind::catalog() {
        println!("{:<12} {:<30} {}", kind.abbreviation(), kind.to_string(), kind.describe());
    }
}
