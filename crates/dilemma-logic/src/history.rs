//! Per-game record of choices and payoffs

use serde::{Deserialize, Serialize};

use crate::error::{DilemmaError, Result};

/// A choice in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Cooperate,
    Defect,
}

impl Choice {
    /// Cooperate when `cooperate` is true
    pub fn from_cooperation(cooperate: bool) -> Self {
        if cooperate {
            Choice::Cooperate
        } else {
            Choice::Defect
        }
    }

    pub fn is_defect(self) -> bool {
        self == Choice::Defect
    }

    pub fn flipped(self) -> Self {
        match self {
            Choice::Cooperate => Choice::Defect,
            Choice::Defect => Choice::Cooperate,
        }
    }
}

/// Which side of the table a strategy sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Player1,
    Player2,
}

impl Seat {
    pub fn opponent(self) -> Self {
        match self {
            Seat::Player1 => Seat::Player2,
            Seat::Player2 => Seat::Player1,
        }
    }

    pub(crate) fn lane(self) -> u8 {
        match self {
            Seat::Player1 => 0,
            Seat::Player2 => 1,
        }
    }
}

/// One completed round. Never modified once appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: usize,
    pub player1_choice: Choice,
    pub player2_choice: Choice,
    pub player1_payoff: u32,
    pub player2_payoff: u32,
}

impl RoundRecord {
    pub fn choice(&self, seat: Seat) -> Choice {
        match seat {
            Seat::Player1 => self.player1_choice,
            Seat::Player2 => self.player2_choice,
        }
    }

    pub fn payoff(&self, seat: Seat) -> u32 {
        match seat {
            Seat::Player1 => self.player1_payoff,
            Seat::Player2 => self.player2_payoff,
        }
    }
}

/// Append-only log of the rounds played so far, indexed by round number
///
/// Serialize only: a log is built through `push`, which checks round order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HistoryLog {
    records: Vec<RoundRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rounds: usize) -> Self {
        Self { records: Vec::with_capacity(rounds) }
    }

    /// Number of rounds recorded
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for `round`, failing if it has not been played yet
    pub fn get(&self, round: usize) -> Result<&RoundRecord> {
        self.records.get(round).ok_or(DilemmaError::InvalidRoundIndex {
            requested: round,
            recorded: self.records.len(),
        })
    }

    pub fn last(&self) -> Option<&RoundRecord> {
        self.records.last()
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundRecord> {
        self.records.iter()
    }

    /// Read-only view from one seat's perspective
    pub fn view(&self, seat: Seat) -> SeatView<'_> {
        SeatView { log: self, seat }
    }

    /// Sum of payoffs for `seat`
    pub fn total(&self, seat: Seat) -> u64 {
        self.records.iter().map(|r| r.payoff(seat) as u64).sum()
    }

    /// Append the next round. The round index must equal the current length.
    pub(crate) fn push(&mut self, record: RoundRecord) -> Result<()> {
        if record.round != self.records.len() {
            return Err(DilemmaError::RoundMismatch {
                expected: self.records.len(),
                requested: record.round,
            });
        }
        self.records.push(record);
        Ok(())
    }
}

/// A seat's window onto the history: "own" and "opponent" resolved once
#[derive(Clone, Copy, Debug)]
pub struct SeatView<'a> {
    log: &'a HistoryLog,
    seat: Seat,
}

impl<'a> SeatView<'a> {
    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn log(&self) -> &'a HistoryLog {
        self.log
    }

    pub fn own(&self, round: usize) -> Result<Choice> {
        Ok(self.log.get(round)?.choice(self.seat))
    }

    pub fn opponent(&self, round: usize) -> Result<Choice> {
        Ok(self.log.get(round)?.choice(self.seat.opponent()))
    }

    pub fn own_payoff(&self, round: usize) -> Result<u32> {
        Ok(self.log.get(round)?.payoff(self.seat))
    }

    pub fn opponent_payoff(&self, round: usize) -> Result<u32> {
        Ok(self.log.get(round)?.payoff(self.seat.opponent()))
    }
}
