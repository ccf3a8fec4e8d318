//! Game execution engine

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::{DilemmaError, Result};
use crate::history::{HistoryLog, RoundRecord, Seat};
use crate::payoff::PayoffTable;
use crate::random::SeededRng;
use crate::strategy::Strategy;

/// Final standing between the two seats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Player1Wins,
    Player2Wins,
    Draw,
}

impl Outcome {
    pub fn from_totals(player1: u64, player2: u64) -> Self {
        match player1.cmp(&player2) {
            std::cmp::Ordering::Greater => Outcome::Player1Wins,
            std::cmp::Ordering::Less => Outcome::Player2Wins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn winner(self) -> Option<Seat> {
        match self {
            Outcome::Player1Wins => Some(Seat::Player1),
            Outcome::Player2Wins => Some(Seat::Player2),
            Outcome::Draw => None,
        }
    }
}

/// Result of a complete game
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub player1_name: String,
    pub player2_name: String,
    pub rounds: Vec<RoundRecord>,
    pub player1_scores: Vec<u32>,
    pub player2_scores: Vec<u32>,
    pub player1_total: u64,
    pub player2_total: u64,
    pub outcome: Outcome,
}

impl MatchResult {
    /// Derive the summary from a finished log
    pub fn from_history(
        history: &HistoryLog,
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
    ) -> Self {
        let player1_scores: Vec<u32> = history.iter().map(|r| r.player1_payoff).collect();
        let player2_scores: Vec<u32> = history.iter().map(|r| r.player2_payoff).collect();
        let player1_total = player1_scores.iter().map(|&s| s as u64).sum();
        let player2_total = player2_scores.iter().map(|&s| s as u64).sum();

        MatchResult {
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
            rounds: history.records().to_vec(),
            player1_scores,
            player2_scores,
            player1_total,
            player2_total,
            outcome: Outcome::from_totals(player1_total, player2_total),
        }
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn total(&self, seat: Seat) -> u64 {
        match seat {
            Seat::Player1 => self.player1_total,
            Seat::Player2 => self.player2_total,
        }
    }

    pub fn scores(&self, seat: Seat) -> &[u32] {
        match seat {
            Seat::Player1 => &self.player1_scores,
            Seat::Player2 => &self.player2_scores,
        }
    }

    /// Running total after each round
    pub fn cumulative(&self, seat: Seat) -> Vec<u64> {
        self.scores(seat)
            .iter()
            .scan(0u64, |acc, &s| {
                *acc += s as u64;
                Some(*acc)
            })
            .collect()
    }

    /// Name of the winning strategy, `None` on a draw
    pub fn winner_name(&self) -> Option<&str> {
        self.outcome.winner().map(|seat| match seat {
            Seat::Player1 => self.player1_name.as_str(),
            Seat::Player2 => self.player2_name.as_str(),
        })
    }
}

/// Engine state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    InProgress { round: usize },
    Completed,
}

/// Drives one game between two seated strategies
#[derive(Debug)]
pub struct Game {
    player1: Strategy,
    player2: Strategy,
    rounds: usize,
    payoffs: PayoffTable,
    rng: SeededRng,
    history: HistoryLog,
    state: GameState,
    total1: u64,
    total2: u64,
}

impl Game {
    /// Seat both strategies and prepare an empty log
    ///
    /// `game_index` selects the random stream, so the same seed can drive
    /// many distinct games.
    pub fn new(
        mut player1: Strategy,
        mut player2: Strategy,
        config: &GameConfig,
        game_index: u32,
    ) -> Result<Self> {
        config.validate()?;
        player1.take_seat(Seat::Player1, &config.payoffs)?;
        player2.take_seat(Seat::Player2, &config.payoffs)?;

        Ok(Self {
            player1,
            player2,
            rounds: config.rounds,
            payoffs: config.payoffs,
            rng: SeededRng::new(config.seed, game_index),
            history: HistoryLog::with_capacity(config.rounds),
            state: GameState::NotStarted,
            total1: 0,
            total2: 0,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn totals(&self) -> (u64, u64) {
        (self.total1, self.total2)
    }

    pub fn start(&mut self) -> Result<()> {
        if self.state != GameState::NotStarted {
            return Err(DilemmaError::InvalidState);
        }
        tracing::debug!(
            player1 = self.player1.name(),
            player2 = self.player2.name(),
            rounds = self.rounds,
            "starting game"
        );
        self.state = GameState::InProgress { round: 0 };
        Ok(())
    }

    /// Play the next round and return its record
    pub fn step(&mut self) -> Result<RoundRecord> {
        let GameState::InProgress { round } = self.state else {
            return Err(DilemmaError::InvalidState);
        };

        // Separate streams per seat so neither player perturbs the other
        let mut rng1 = self.rng.for_round(round, Seat::Player1.lane());
        let mut rng2 = self.rng.for_round(round, Seat::Player2.lane());

        let choice1 = self.player1.decide(&self.history, round, &mut rng1)?;
        let choice2 = self.player2.decide(&self.history, round, &mut rng2)?;

        let (payoff1, payoff2) = self.payoffs.resolve(choice1, choice2);
        let record = RoundRecord {
            round,
            player1_choice: choice1,
            player2_choice: choice2,
            player1_payoff: payoff1,
            player2_payoff: payoff2,
        };
        self.history.push(record)?;
        self.total1 += payoff1 as u64;
        self.total2 += payoff2 as u64;

        tracing::debug!(round, ?choice1, ?choice2, payoff1, payoff2, "round resolved");

        self.state = if round + 1 == self.rounds {
            GameState::Completed
        } else {
            GameState::InProgress { round: round + 1 }
        };
        Ok(record)
    }

    /// Summarise a completed game
    pub fn finish(self) -> Result<MatchResult> {
        if self.state != GameState::Completed {
            return Err(DilemmaError::InvalidState);
        }
        let result = MatchResult::from_history(&self.history, self.player1.name(), self.player2.name());
        debug_assert_eq!((result.player1_total, result.player2_total), (self.total1, self.total2));

        tracing::info!(
            player1 = %result.player1_name,
            player2 = %result.player2_name,
            score1 = result.player1_total,
            score2 = result.player2_total,
            outcome = ?result.outcome,
            "game complete"
        );
        Ok(result)
    }

    /// Play every remaining round and summarise
    pub fn play(mut self) -> Result<MatchResult> {
        if self.state == GameState::NotStarted {
            self.start()?;
        }
        while self.state != GameState::Completed {
            self.step()?;
        }
        self.finish()
    }
}

/// Run a complete game between two strategies
///
/// # Arguments
/// * `player1` - Strategy for seat 1 (unseated or already seated as Player1)
/// * `player2` - Strategy for seat 2
/// * `config` - Round count, seed and payoffs
/// * `game_index` - Index of this game, selects the random stream
///
/// Any strategy failure aborts the game; no partial result is returned.
pub fn run_game(
    player1: Strategy,
    player2: Strategy,
    config: &GameConfig,
    game_index: u32,
) -> Result<MatchResult> {
    Game::new(player1, player2, config, game_index)?.play()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Choice;
    use crate::strategy::{MemoryOneParams, StrategyKind};

    fn play(a: StrategyKind, b: StrategyKind, rounds: usize) -> MatchResult {
        run_game(Strategy::new(a), Strategy::new(b), &GameConfig::new(rounds).with_seed(42), 0).unwrap()
    }

    #[test]
    fn test_match_determinism() {
        let r1 = play(StrategyKind::TitForTat, StrategyKind::Random, 100);
        let r2 = play(StrategyKind::TitForTat, StrategyKind::Random, 100);
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_different_games_differ() {
        let config = GameConfig::new(64).with_seed(42);
        let r1 = run_game(
            Strategy::new(StrategyKind::Random),
            Strategy::new(StrategyKind::Random),
            &config,
            0,
        )
        .unwrap();
        let r2 = run_game(
            Strategy::new(StrategyKind::Random),
            Strategy::new(StrategyKind::Random),
            &config,
            1,
        )
        .unwrap();
        assert_ne!(r1.rounds, r2.rounds);
    }

    #[test]
    fn test_cooperate_vs_cooperate() {
        let result = play(StrategyKind::AlwaysCooperate, StrategyKind::AlwaysCooperate, 30);
        for round in &result.rounds {
            assert_eq!(round.player1_choice, Choice::Cooperate);
            assert_eq!(round.player2_choice, Choice::Cooperate);
            assert_eq!((round.player1_payoff, round.player2_payoff), (3, 3));
        }
        assert_eq!(result.player1_total, 90);
        assert_eq!(result.outcome, Outcome::Draw);
        assert_eq!(result.winner_name(), None);
    }

    #[test]
    fn test_defect_vs_cooperate() {
        let result = play(StrategyKind::AlwaysDefect, StrategyKind::AlwaysCooperate, 20);
        assert_eq!(result.player1_total, 100);
        assert_eq!(result.player2_total, 0);
        assert_eq!(result.outcome, Outcome::Player1Wins);
        assert_eq!(result.winner_name(), Some("Always Defect"));
    }

    #[test]
    fn test_tft_vs_always_cooperate() {
        for n in [1, 2, 17] {
            let result = play(StrategyKind::TitForTat, StrategyKind::AlwaysCooperate, n);
            assert!(result.rounds.iter().all(|r| r.player1_choice == Choice::Cooperate));
            assert_eq!(result.player1_total, 3 * n as u64);
            assert_eq!(result.player2_total, 3 * n as u64);
        }
    }

    #[test]
    fn test_tft_vs_always_defect() {
        let n = 25;
        let result = play(StrategyKind::TitForTat, StrategyKind::AlwaysDefect, n);

        assert_eq!(result.rounds[0].player1_choice, Choice::Cooperate);
        assert_eq!((result.player1_scores[0], result.player2_scores[0]), (0, 5));
        for round in result.rounds.iter().skip(1) {
            assert_eq!(round.player1_choice, Choice::Defect);
            assert_eq!(round.player2_choice, Choice::Defect);
        }
        assert_eq!(result.player1_total, (n - 1) as u64);
        assert_eq!(result.player2_total, 5 + (n - 1) as u64);
        assert_eq!(result.outcome, Outcome::Player2Wins);
    }

    #[test]
    fn test_tft_as_player2_retaliates() {
        let result = play(StrategyKind::AlwaysDefect, StrategyKind::TitForTat, 5);
        assert_eq!(result.rounds[0].player2_choice, Choice::Cooperate);
        assert!(result.rounds[1..].iter().all(|r| r.player2_choice == Choice::Defect));
    }

    #[test]
    fn test_memory_one_matches_unconditional() {
        let all_c = StrategyKind::MemoryOne(MemoryOneParams { p: 1.0, q: 1.0, r: 1.0, s: 1.0 });
        let all_d = StrategyKind::MemoryOne(MemoryOneParams { p: 0.0, q: 0.0, r: 0.0, s: 0.0 });
        for opponent in [StrategyKind::Random, StrategyKind::TitForTat, StrategyKind::Pavlov] {
            let a = play(all_c, opponent, 40);
            let b = play(StrategyKind::AlwaysCooperate, opponent, 40);
            assert_eq!(a.rounds, b.rounds);

            let a = play(all_d, opponent, 40);
            let b = play(StrategyKind::AlwaysDefect, opponent, 40);
            assert_eq!(a.rounds, b.rounds);
        }
    }

    #[test]
    fn test_cumulative_scores() {
        let result = play(StrategyKind::TitForTat, StrategyKind::Random, 50);
        let cumulative = result.cumulative(Seat::Player1);
        assert_eq!(cumulative.len(), 50);
        assert_eq!(*cumulative.last().unwrap(), result.player1_total);
        let mut expected = 0;
        for (i, r) in result.rounds.iter().enumerate() {
            expected += r.player1_payoff as u64;
            assert_eq!(cumulative[i], expected);
        }
    }

    #[test]
    fn test_state_machine() {
        let config = GameConfig::new(2);
        let mut game = Game::new(
            Strategy::new(StrategyKind::TitForTat),
            Strategy::new(StrategyKind::AlwaysDefect),
            &config,
            0,
        )
        .unwrap();

        assert_eq!(game.state(), GameState::NotStarted);
        assert_eq!(game.step(), Err(DilemmaError::InvalidState));

        game.start().unwrap();
        assert_eq!(game.start(), Err(DilemmaError::InvalidState));
        assert_eq!(game.state(), GameState::InProgress { round: 0 });

        let first = game.step().unwrap();
        assert_eq!(first.round, 0);
        assert_eq!(game.state(), GameState::InProgress { round: 1 });
        assert_eq!(game.totals(), (0, 5));

        game.step().unwrap();
        assert_eq!(game.state(), GameState::Completed);
        assert_eq!(game.step(), Err(DilemmaError::InvalidState));
        assert_eq!(game.history().len(), 2);

        let result = game.finish().unwrap();
        assert_eq!((result.player1_total, result.player2_total), (1, 6));
    }

    #[test]
    fn test_finish_before_complete_fails() {
        let game = Game::new(
            Strategy::new(StrategyKind::TitForTat),
            Strategy::new(StrategyKind::TitForTat),
            &GameConfig::new(3),
            0,
        )
        .unwrap();
        assert_eq!(game.finish().unwrap_err(), DilemmaError::InvalidState);
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let err = run_game(
            Strategy::new(StrategyKind::TitForTat),
            Strategy::new(StrategyKind::TitForTat),
            &GameConfig::new(0),
            0,
        )
        .unwrap_err();
        assert_eq!(err, DilemmaError::InvalidRounds(0));
    }

    #[test]
    fn test_seat_conflict_rejected() {
        let wrong = Strategy::seated(StrategyKind::TitForTat, Seat::Player2);
        let err = Game::new(wrong, Strategy::new(StrategyKind::TitForTat), &GameConfig::new(3), 0).unwrap_err();
        assert_eq!(err, DilemmaError::SeatConflict(Seat::Player2));
    }

    #[test]
    fn test_custom_payoffs_used() {
        let payoffs = PayoffTable::new(4, 0, 7, 2).unwrap();
        let config = GameConfig::new(3).with_payoffs(payoffs);
        let result = run_game(
            Strategy::new(StrategyKind::AlwaysCooperate),
            Strategy::new(StrategyKind::AlwaysCooperate),
            &config,
            0,
        )
        .unwrap();
        assert_eq!(result.player1_total, 12);
    }

    #[test]
    fn test_large_payoffs_accumulate_without_overflow() {
        // Five rounds of R = 1e9 exceed u32::MAX
        let payoffs = PayoffTable::new(1_000_000_000, 0, 1_500_000_000, 1).unwrap();
        let config = GameConfig::new(5).with_payoffs(payoffs);
        let result = run_game(
            Strategy::new(StrategyKind::AlwaysCooperate),
            Strategy::new(StrategyKind::AlwaysCooperate),
            &config,
            0,
        )
        .unwrap();
        assert_eq!(result.player1_total, 5_000_000_000);
        assert_eq!(result.cumulative(Seat::Player2).last(), Some(&5_000_000_000));
        assert_eq!(result.outcome, Outcome::Draw);
    }

    #[test]
    fn test_equalizer_handles_large_payoffs() {
        let payoffs = PayoffTable::new(1_000_000_000, 0, 1_500_000_000, 1).unwrap();
        let config = GameConfig::new(10).with_payoffs(payoffs);
        let result = run_game(
            Strategy::new(StrategyKind::Equalizer { target: 500_000_000.0 }),
            Strategy::new(StrategyKind::AlwaysCooperate),
            &config,
            0,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_outcome_from_totals() {
        assert_eq!(Outcome::from_totals(3, 1), Outcome::Player1Wins);
        assert_eq!(Outcome::from_totals(1, 3), Outcome::Player2Wins);
        assert_eq!(Outcome::from_totals(2, 2), Outcome::Draw);
        assert_eq!(Outcome::Player2Wins.winner(), Some(Seat::Player2));
    }
}
