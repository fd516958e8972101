use crate::{
    config::EngineConfig,
    grid::{Grid, REELS, ROWS},
    rng::RandomSource,
    symbols::{Alphabet, Symbol},
};

/// Draws symbols with a fixed wildcard chance and a uniform pick among the fruits.
#[derive(Debug, Clone)]
pub struct SymbolGenerator {
    alphabet: Alphabet,
    wild_probability: f64,
}

impl SymbolGenerator {
    /// Assumes `config` has been validated.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            alphabet: config.alphabet.clone(),
            wild_probability: config.wild_probability,
        }
    }

    /// Consumes exactly one value from `rng`.
    pub fn draw(&self, rng: &mut impl RandomSource) -> Symbol {
        let u = rng.next_unit();
        if u < self.wild_probability {
            return Symbol::Joker;
        }
        let fruits = self.alphabet.fruits();
        let Some(last) = fruits.len().checked_sub(1) else {
            return Symbol::Joker;
        };
        let scaled = (u - self.wild_probability) / (1.0 - self.wild_probability);
        let idx = ((scaled * fruits.len() as f64).floor() as usize).min(last);
        fruits[idx]
    }

    /// 16 draws, reel by reel, top row first within a reel.
    pub fn fill_grid(&self, rng: &mut impl RandomSource) -> Grid {
        let mut reels = [[Symbol::Joker; ROWS]; REELS];
        for reel in reels.iter_mut() {
            for cell in reel.iter_mut() {
                *cell = self.draw(rng);
            }
        }
        Grid::from_reels(reels)
    }
}
