use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, EngineError, EngineResult},
    symbols::{Alphabet, Symbol},
};

pub const SPIN_COST: u64 = 10;
pub const WIN_PAYOUT: u64 = 50;
pub const WILD_PROBABILITY: f64 = 0.10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub alphabet: Alphabet,
    pub wild_probability: f64,
    pub spin_cost: u64,
    pub win_payout: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::classic(),
            wild_probability: WILD_PROBABILITY,
            spin_cost: SPIN_COST,
            win_payout: WIN_PAYOUT,
        }
    }
}

impl EngineConfig {
    pub fn extended() -> Self {
        Self {
            alphabet: Alphabet::extended(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        let fruits = self.alphabet.fruits();
        if self.alphabet.size() < 2 {
            return Err(EngineError::InvalidConfiguration(format!(
                "alphabet needs at least 2 symbols, has {}",
                self.alphabet.size()
            )));
        }
        if fruits.contains(&Symbol::Joker) {
            return Err(EngineError::InvalidConfiguration(
                "the wildcard cannot be listed as a regular symbol".into(),
            ));
        }
        for (i, s) in fruits.iter().enumerate() {
            if fruits[..i].contains(s) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "symbol {s} listed twice"
                )));
            }
        }
        // negated so NaN fails too
        if !(0.0..1.0).contains(&self.wild_probability) {
            return Err(EngineError::InvalidConfiguration(format!(
                "wild probability {} outside [0, 1)",
                self.wild_probability
            )));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
