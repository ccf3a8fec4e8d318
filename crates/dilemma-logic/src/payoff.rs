//! Payoff resolution for one round

use serde::{Deserialize, Serialize};

use crate::error::{DilemmaError, Result};
use crate::history::Choice;

/// Scores awarded for the four joint outcomes of a round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffTable {
    /// Both cooperate
    pub reward: u32,
    /// Cooperated against a defector
    pub sucker: u32,
    /// Defected against a cooperator
    pub temptation: u32,
    /// Both defect
    pub punishment: u32,
}

impl PayoffTable {
    /// R=3, S=0, T=5, P=1
    pub const CANONICAL: PayoffTable = PayoffTable {
        reward: 3,
        sucker: 0,
        temptation: 5,
        punishment: 1,
    };

    /// Build a custom table, rejecting anything that is not a dilemma
    pub fn new(reward: u32, sucker: u32, temptation: u32, punishment: u32) -> Result<Self> {
        let table = Self { reward, sucker, temptation, punishment };
        table.validate()?;
        Ok(table)
    }

    /// Check T > R > P > S and 2R > T + S
    pub fn validate(&self) -> Result<()> {
        let Self { reward, sucker, temptation, punishment } = *self;
        if !(temptation > reward && reward > punishment && punishment > sucker) {
            return Err(DilemmaError::InvalidPayoffTable(format!(
                "expected T > R > P > S, got T={} R={} P={} S={}",
                temptation, reward, punishment, sucker
            )));
        }
        if 2 * reward as u64 <= temptation as u64 + sucker as u64 {
            return Err(DilemmaError::InvalidPayoffTable(format!(
                "expected 2R > T + S, got 2*{} <= {} + {}",
                reward, temptation, sucker
            )));
        }
        Ok(())
    }

    /// Resolve simultaneous choices into (player1, player2) scores
    pub fn resolve(&self, player1: Choice, player2: Choice) -> (u32, u32) {
        match (player1, player2) {
            (Choice::Cooperate, Choice::Cooperate) => (self.reward, self.reward),
            (Choice::Cooperate, Choice::Defect) => (self.sucker, self.temptation),
            (Choice::Defect, Choice::Cooperate) => (self.temptation, self.sucker),
            (Choice::Defect, Choice::Defect) => (self.punishment, self.punishment),
        }
    }
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self::CANONICAL
    }
}
