//! Tournament command - round-robin among many strategies

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use dilemma_logic::{run_tournament, StrategyKind, TournamentConfig, TournamentResult};

#[derive(Args)]
pub struct TournamentArgs {
    /// JSON tournament config (rounds, seed, payoffs, entrants)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Comma-separated strategies, added after any config entrants
    #[arg(long, value_delimiter = ',')]
    pub strategies: Vec<String>,

    /// Use every catalog strategy
    #[arg(long)]
    pub all: bool,

    /// Rounds per game (overrides the config file)
    #[arg(long)]
    pub rounds: Option<usize>,

    /// Tournament seed (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output the standings as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TournamentArgs) -> Result<()> {
    let config = build_config(&args)?;
    if config.entrants.len() < 2 {
        bail!("A tournament needs at least two entrants (got {})", config.entrants.len());
    }

    let result = run_tournament(&config).context("Tournament aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.standings)?);
    } else {
        report(&result);
    }
    Ok(())
}

fn build_config(args: &TournamentArgs) -> Result<TournamentConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            TournamentConfig::from_json(&json)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => TournamentConfig::default(),
    };

    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let kinds = args
        .strategies
        .iter()
        .map(|s| s.parse::<StrategyKind>().with_context(|| format!("Invalid strategy: {}", s)))
        .collect::<Result<Vec<_>>>()?;
    config = config.with_strategies(kinds);
    if args.all {
        config = config.with_strategies(StrategyKind::catalog());
    }

    Ok(config)
}

fn report(result: &TournamentResult) {
    println!(
        "{:>4}  {:<32} {:>8} {:>8} {:>4} {:>4} {:>4}",
        "#", "ENTRANT", "SCORE", "AVG", "W", "L", "D"
    );
    for (rank, s) in result.standings.iter().enumerate() {
        println!(
            "{:>4}  {:<32} {:>8} {:>8.1} {:>4} {:>4} {:>4}",
            rank + 1,
            s.name,
            s.total_score,
            s.average_score(),
            s.wins,
            s.losses,
            s.draws
        );
    }
}
