use serde::{Deserialize, Serialize};

use crate::{
    grid::{Grid, Line, Position, REELS},
    symbols::Symbol,
};

/// How a single line's four symbols score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Four identical symbols, four jokers included.
    AllMatch(Symbol),
    OneWild(Symbol),
    TwoWild(Symbol),
    NoWin,
}

impl LineClass {
    pub fn matched(self) -> Option<Symbol> {
        match self {
            LineClass::AllMatch(s) | LineClass::OneWild(s) | LineClass::TwoWild(s) => Some(s),
            LineClass::NoWin => None,
        }
    }

    pub fn is_wildcard(self) -> bool {
        matches!(self, LineClass::OneWild(_) | LineClass::TwoWild(_))
    }
}

pub fn classify(symbols: [Symbol; REELS]) -> LineClass {
    let first = symbols[0];
    if symbols.iter().all(|&s| s == first) {
        return LineClass::AllMatch(first);
    }
    let jokers = symbols.iter().filter(|s| s.is_wild()).count();
    let mut fruits = symbols.iter().copied().filter(|s| !s.is_wild());
    let Some(fruit) = fruits.next() else {
        return LineClass::NoWin;
    };
    if !fruits.all(|s| s == fruit) {
        return LineClass::NoWin;
    }
    match jokers {
        1 => LineClass::OneWild(fruit),
        2 => LineClass::TwoWild(fruit),
        _ => LineClass::NoWin,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinResult {
    pub is_win: bool,
    pub matched_symbol: Option<Symbol>,
    pub is_wildcard_win: bool,
    pub line: Option<Line>,
    pub positions: Vec<Position>,
}

impl WinResult {
    pub fn none() -> Self {
        Self {
            is_win: false,
            matched_symbol: None,
            is_wildcard_win: false,
            line: None,
            positions: Vec::new(),
        }
    }

    fn from_line(line: Line, class: LineClass) -> Option<Self> {
        let matched = class.matched()?;
        Some(Self {
            is_win: true,
            matched_symbol: Some(matched),
            is_wildcard_win: class.is_wildcard(),
            line: Some(line),
            positions: line.positions().to_vec(),
        })
    }
}

/// Every winning line in evaluation order.
pub fn winning_lines(grid: &Grid) -> Vec<(Line, LineClass)> {
    Line::ALL
        .iter()
        .map(|&line| (line, classify(grid.line(line))))
        .filter(|(_, class)| *class != LineClass::NoWin)
        .collect()
}

/// Reports the first winning line only.
pub fn evaluate(grid: &Grid) -> WinResult {
    Line::ALL
        .iter()
        .find_map(|&line| WinResult::from_line(line, classify(grid.line(line))))
        .unwrap_or_else(WinResult::none)
}
