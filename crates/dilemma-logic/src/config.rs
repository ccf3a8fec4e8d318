//! Configuration for games and tournaments

use serde::{Deserialize, Serialize};

use crate::error::{DilemmaError, Result};
use crate::payoff::PayoffTable;
use crate::strategy::StrategyKind;

/// Settings for a single game
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of rounds, fixed and known to both players
    pub rounds: usize,
    /// Seed for probabilistic strategies
    pub seed: u64,
    pub payoffs: PayoffTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: 200,
            seed: 0,
            payoffs: PayoffTable::CANONICAL,
        }
    }
}

impl GameConfig {
    pub fn new(rounds: usize) -> Self {
        Self { rounds, ..Default::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_payoffs(mut self, payoffs: PayoffTable) -> Self {
        self.payoffs = payoffs;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(DilemmaError::InvalidRounds(self.rounds));
        }
        self.payoffs.validate()
    }
}

/// A named participant in a tournament
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub name: String,
    pub strategy: StrategyKind,
}

impl Entrant {
    pub fn new(name: impl Into<String>, strategy: StrategyKind) -> Self {
        Self { name: name.into(), strategy }
    }

    /// Entrant named after its strategy
    pub fn from_kind(strategy: StrategyKind) -> Self {
        Self::new(strategy.name(), strategy)
    }
}

/// Settings for a round-robin tournament
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Rounds per game
    pub rounds: usize,
    /// Tournament seed; each game derives its own stream from it
    pub seed: u64,
    pub payoffs: PayoffTable,
    pub entrants: Vec<Entrant>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds: 200,
            seed: 0,
            payoffs: PayoffTable::CANONICAL,
            entrants: Vec::new(),
        }
    }
}

impl TournamentConfig {
    pub fn new(rounds: usize) -> Self {
        Self { rounds, ..Default::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_payoffs(mut self, payoffs: PayoffTable) -> Self {
        self.payoffs = payoffs;
        self
    }

    pub fn with_entrants(mut self, entrants: Vec<Entrant>) -> Self {
        self.entrants = entrants;
        self
    }

    /// Add one entrant per strategy, named after the strategy
    pub fn with_strategies(mut self, kinds: impl IntoIterator<Item = StrategyKind>) -> Self {
        self.entrants.extend(kinds.into_iter().map(Entrant::from_kind));
        self
    }

    /// Game settings shared by every pairing
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            rounds: self.rounds,
            seed: self.seed,
            payoffs: self.payoffs,
        }
    }

    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DilemmaError::InvalidConfig(e.to_string()))?;
        config.game_config().validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| DilemmaError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.rounds, 200);
        assert_eq!(config.payoffs, PayoffTable::CANONICAL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        assert_eq!(GameConfig::new(0).validate(), Err(DilemmaError::InvalidRounds(0)));
    }

    #[test]
    fn test_builder() {
        let config = TournamentConfig::new(50)
            .with_seed(9)
            .with_strategies([StrategyKind::TitForTat, StrategyKind::AlwaysDefect]);
        assert_eq!(config.entrants.len(), 2);
        assert_eq!(config.entrants[0].name, "Tit for Tat");
        assert_eq!(config.game_config(), GameConfig::new(50).with_seed(9));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "rounds": 10,
            "entrants": [
                { "name": "tft", "strategy": "TitForTat" },
                { "name": "zd", "strategy": { "Equalizer": { "target": 2.5 } } },
                { "name": "m1", "strategy": { "MemoryOne": { "p": 1.0, "q": 0.0, "r": 0.0, "s": 1.0 } } }
            ]
        }"#;
        let config = TournamentConfig::from_json(json).unwrap();
        assert_eq!(config.rounds, 10);
        assert_eq!(config.seed, 0);
        assert_eq!(config.entrants[1].strategy, StrategyKind::Equalizer { target: 2.5 });
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            TournamentConfig::from_json("{ not json"),
            Err(DilemmaError::InvalidConfig(_))
        ));
        assert_eq!(
            TournamentConfig::from_json(r#"{ "rounds": 0 }"#),
            Err(DilemmaError::InvalidRounds(0))
        );
        let bad_payoffs = r#"{ "payoffs": { "reward": 3, "sucker": 5, "temptation": 5, "punishment": 1 } }"#;
        assert!(matches!(
            TournamentConfig::from_json(bad_payoffs),
            Err(DilemmaError::InvalidPayoffTable(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_huge_payoffs() {
        let json = r#"{ "payoffs": { "reward": 3000000000, "sucker": 0, "temptation": 4000000000, "punishment": 1 } }"#;
        assert!(matches!(
            TournamentConfig::from_json(json),
            Err(DilemmaError::InvalidPayoffTable(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = TournamentConfig::new(5).with_strategies(StrategyKind::catalog());
        let parsed = TournamentConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
