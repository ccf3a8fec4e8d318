//! Dilemma Logic for the Iterated Prisoner's Dilemma
//!
//! Core game logic shared by the command line and any other front end:
//! - Strategies that read the round history and emit a choice
//! - The round engine that resolves payoffs and records history
//! - Round-robin tournaments that aggregate scores into a leaderboard

mod config;
mod error;
mod game;
mod history;
mod pairing;
mod payoff;
mod random;
mod strategy;
mod tournament;

pub use config::{Entrant, GameConfig, TournamentConfig};
pub use error::{DilemmaError, Result};
pub use game::{run_game, Game, GameState, MatchResult, Outcome};
pub use history::{Choice, HistoryLog, RoundRecord, Seat, SeatView};
pub use pairing::{calculate_game_count, generate_all_pairings, get_pairing_for_game};
pub use payoff::PayoffTable;
pub use random::SeededRng;
pub use strategy::{MemoryOneParams, ReactiveParams, Strategy, StrategyKind};
pub use tournament::{run_tournament, GameRecord, Standing, TournamentResult};

/// Payoff matrix for the Prisoner's Dilemma with canonical values
/// Returns (score_a, score_b)
pub fn payoff(a: Choice, b: Choice) -> (u32, u32) {
    PayoffTable::CANONICAL.resolve(a, b)
}
