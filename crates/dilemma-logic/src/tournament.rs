//! Round-robin tournament execution
//!
//! Every pair of entrants plays one game with freshly built strategies.
//! Scores accumulate per entrant into a leaderboard.

use serde::{Deserialize, Serialize};

use crate::config::{Entrant, TournamentConfig};
use crate::error::Result;
use crate::game::{run_game, MatchResult, Outcome};
use crate::pairing::generate_all_pairings;
use crate::strategy::Strategy;

/// Leaderboard row for one entrant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// Index of the entrant in the config
    pub index: usize,
    pub name: String,
    /// Sum of scores across all games
    pub total_score: u64,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games_played: u32,
}

impl Standing {
    fn new(index: usize, name: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            total_score: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            games_played: 0,
        }
    }

    /// Average score per game
    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games_played as f64
        }
    }

    fn record(&mut self, score: u64, outcome: Outcome, won: Outcome) {
        self.total_score += score;
        self.games_played += 1;
        match outcome {
            Outcome::Draw => self.draws += 1,
            o if o == won => self.wins += 1,
            _ => self.losses += 1,
        }
    }
}

/// One played pairing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_index: u32,
    /// Entrant index in seat 1
    pub player1: usize,
    /// Entrant index in seat 2
    pub player2: usize,
    pub result: MatchResult,
}

/// Result of a tournament
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentResult {
    /// Sorted by total score (descending), ties by entrant index
    pub standings: Vec<Standing>,
    pub games: Vec<GameRecord>,
}

impl TournamentResult {
    /// Top standing
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    pub fn top_n(&self, n: usize) -> &[Standing] {
        let n = n.min(self.standings.len());
        &self.standings[..n]
    }

    pub fn standing_for(&self, index: usize) -> Option<&Standing> {
        self.standings.iter().find(|s| s.index == index)
    }
}

/// Run a full round-robin
///
/// Games run in pairing order; the first failing game aborts the tournament.
pub fn run_tournament(config: &TournamentConfig) -> Result<TournamentResult> {
    let game_config = config.game_config();
    game_config.validate()?;

    // Normalise once so bad parameters are reported once, not once per game
    let entrants: Vec<Entrant> = config
        .entrants
        .iter()
        .map(|e| Entrant::new(e.name.clone(), e.strategy.normalized()))
        .collect();

    let pairings = generate_all_pairings(entrants.len() as u32);
    tracing::info!(
        entrants = entrants.len(),
        games = pairings.len(),
        rounds = config.rounds,
        "starting tournament"
    );

    let mut standings: Vec<Standing> = entrants
        .iter()
        .enumerate()
        .map(|(i, e)| Standing::new(i, &e.name))
        .collect();
    let mut games = Vec::with_capacity(pairings.len());

    for (game_index, (a, b)) in pairings.into_iter().enumerate() {
        let game_index = game_index as u32;
        let (a, b) = (a as usize, b as usize);

        let mut result = run_game(
            Strategy::new(entrants[a].strategy),
            Strategy::new(entrants[b].strategy),
            &game_config,
            game_index,
        )?;
        result.player1_name = entrants[a].name.clone();
        result.player2_name = entrants[b].name.clone();

        standings[a].record(result.player1_total, result.outcome, Outcome::Player1Wins);
        standings[b].record(result.player2_total, result.outcome, Outcome::Player2Wins);

        tracing::debug!(
            game_index,
            player1 = %entrants[a].name,
            player2 = %entrants[b].name,
            score1 = result.player1_total,
            score2 = result.player2_total,
            "game recorded"
        );

        games.push(GameRecord { game_index, player1: a, player2: b, result });
    }

    standings.sort_by(|x, y| y.total_score.cmp(&x.total_score).then(x.index.cmp(&y.index)));

    if let Some(top) = standings.first() {
        tracing::info!(winner = %top.name, score = top.total_score, "tournament complete");
    }

    Ok(TournamentResult { standings, games })
}
