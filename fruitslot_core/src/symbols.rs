use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Symbol {
    Apple,
    Banana,
    Orange,
    Cucumber,
    Grape,
    Joker,
}

impl Symbol {
    pub const ALL: [Symbol; 6] = [
        Symbol::Apple,
        Symbol::Banana,
        Symbol::Orange,
        Symbol::Cucumber,
        Symbol::Grape,
        Symbol::Joker,
    ];

    pub fn from_index(i: u8) -> Result<Self, ParseError> {
        Self::ALL
            .get(i as usize)
            .copied()
            .ok_or(ParseError::SymbolIndex(i))
    }

    pub fn to_index(self) -> u8 {
        match self {
            Symbol::Apple => 0,
            Symbol::Banana => 1,
            Symbol::Orange => 2,
            Symbol::Cucumber => 3,
            Symbol::Grape => 4,
            Symbol::Joker => 5,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Apple => "🍎",
            Symbol::Banana => "🍌",
            Symbol::Orange => "🍊",
            Symbol::Cucumber => "🥒",
            Symbol::Grape => "🍇",
            Symbol::Joker => "🃏",
        }
    }

    pub fn from_glyph(glyph: &str) -> Result<Self, ParseError> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.glyph() == glyph)
            .ok_or_else(|| ParseError::Glyph(glyph.to_string()))
    }

    pub fn is_wild(self) -> bool {
        self == Symbol::Joker
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// The non-wild symbols a machine draws from. JOKER is always implied on top.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alphabet(pub Vec<Symbol>);

impl Alphabet {
    pub fn classic() -> Self {
        Self(vec![
            Symbol::Apple,
            Symbol::Banana,
            Symbol::Orange,
            Symbol::Cucumber,
        ])
    }

    pub fn extended() -> Self {
        let mut fruits = Self::classic().0;
        fruits.push(Symbol::Grape);
        Self(fruits)
    }

    pub fn fruits(&self) -> &[Symbol] {
        &self.0
    }

    /// Alphabet size including the wildcard.
    pub fn size(&self) -> usize {
        self.0.len() + 1
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::classic()
    }
}
