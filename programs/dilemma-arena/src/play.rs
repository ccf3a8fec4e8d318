//! Play command - one game between two strategies

use anyhow::{Context, Result};
use clap::Args;
use dilemma_logic::{run_game, GameConfig, MatchResult, Outcome, Strategy, StrategyKind};

#[derive(Args)]
pub struct PlayArgs {
    /// Strategy in seat 1 (name or abbreviation, e.g. tft, "MemoryOne(1,0,0,1)")
    #[arg(long)]
    pub player1: String,

    /// Strategy in seat 2
    #[arg(long)]
    pub player2: String,

    /// Number of rounds
    #[arg(long, default_value = "200")]
    pub rounds: usize,

    /// Random seed for probabilistic strategies
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Output the full result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let kind1: StrategyKind = args
        .player1
        .parse()
        .with_context(|| format!("Invalid strategy for player 1: {}", args.player1))?;
    let kind2: StrategyKind = args
        .player2
        .parse()
        .with_context(|| format!("Invalid strategy for player 2: {}", args.player2))?;

    let config = GameConfig::new(args.rounds).with_seed(args.seed);

    tracing::info!(
        "Starting game: {} vs {} for {} rounds",
        kind1.name(),
        kind2.name(),
        args.rounds
    );

    let result = run_game(Strategy::new(kind1), Strategy::new(kind2), &config, 0)
        .context("Game aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        report(&result);
    }
    Ok(())
}

fn report(result: &MatchResult) {
    println!(
        "{} {} - {} {} ({} rounds)",
        result.player1_name,
        result.player1_total,
        result.player2_total,
        result.player2_name,
        result.round_count()
    );
    match result.outcome {
        Outcome::Draw => println!("It's a draw!"),
        _ => {
            if let Some(winner) = result.winner_name() {
                println!("Winner: {}", winner);
            }
        }
    }
}
