//! Error codes for game and tournament execution

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DilemmaError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DilemmaError {
    /// A strategy read a round that has not been recorded yet.
    #[error("invalid round index {requested}: only {recorded} rounds recorded")]
    InvalidRoundIndex { requested: usize, recorded: usize },

    /// A strategy was asked to decide a round other than the next one.
    #[error("strategy asked to decide round {requested}, but the next round is {expected}")]
    RoundMismatch { expected: usize, requested: usize },

    #[error("invalid game state for this action")]
    InvalidState,

    #[error("a game needs at least one round (got {0})")]
    InvalidRounds(usize),

    #[error("strategy is already seated as {0:?}")]
    SeatConflict(crate::history::Seat),

    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("invalid strategy arguments: {0}")]
    InvalidStrategyArgs(String),

    /// Payoffs must satisfy T > R > P > S and 2R > T + S.
    #[error("payoff table is not a prisoner's dilemma: {0}")]
    InvalidPayoffTable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
