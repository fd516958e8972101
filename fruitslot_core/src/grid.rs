use serde::{Deserialize, Serialize};

use crate::{error::ParseError, symbols::Symbol};

pub const REELS: usize = 4;
pub const ROWS: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Position {
    pub reel: usize,
    pub row: usize,
}

impl Position {
    pub const fn new(reel: usize, row: usize) -> Self {
        Self { reel, row }
    }
}

/// The six paylines, in evaluation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Line {
    #[serde(rename = "top")]
    Top,
    #[serde(rename = "upper-middle")]
    UpperMiddle,
    #[serde(rename = "lower-middle")]
    LowerMiddle,
    #[serde(rename = "bottom")]
    Bottom,
    /// Top-left to bottom-right.
    #[serde(rename = "diagonal1")]
    DiagonalDown,
    /// Bottom-left to top-right.
    #[serde(rename = "diagonal2")]
    DiagonalUp,
}

impl Line {
    pub const ALL: [Line; 6] = [
        Line::Top,
        Line::UpperMiddle,
        Line::LowerMiddle,
        Line::Bottom,
        Line::DiagonalDown,
        Line::DiagonalUp,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Line::Top => "top",
            Line::UpperMiddle => "upper-middle",
            Line::LowerMiddle => "lower-middle",
            Line::Bottom => "bottom",
            Line::DiagonalDown => "diagonal1",
            Line::DiagonalUp => "diagonal2",
        }
    }

    /// Positions covered by the line, in reel order.
    pub fn positions(self) -> [Position; REELS] {
        let row_of = |reel: usize| match self {
            Line::Top => 0,
            Line::UpperMiddle => 1,
            Line::LowerMiddle => 2,
            Line::Bottom => 3,
            Line::DiagonalDown => reel,
            Line::DiagonalUp => ROWS - 1 - reel,
        };
        std::array::from_fn(|reel| Position::new(reel, row_of(reel)))
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A 4x4 window addressed as `grid[reel][row]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Grid([[Symbol; ROWS]; REELS]);

impl Grid {
    pub fn from_reels(reels: [[Symbol; ROWS]; REELS]) -> Self {
        Self(reels)
    }

    /// Builds a grid from rows as a player reads them, top row first.
    pub fn from_rows(rows: [[Symbol; REELS]; ROWS]) -> Self {
        Self(std::array::from_fn(|reel| {
            std::array::from_fn(|row| rows[row][reel])
        }))
    }

    pub fn reels(&self) -> &[[Symbol; ROWS]; REELS] {
        &self.0
    }

    /// # Panics
    ///
    /// If `pos` lies outside the 4x4 window; see [`Grid::checked_get`].
    pub fn get(&self, pos: Position) -> Symbol {
        self.0[pos.reel][pos.row]
    }

    pub fn checked_get(&self, pos: Position) -> Option<Symbol> {
        self.0.get(pos.reel)?.get(pos.row).copied()
    }

    pub fn line(&self, line: Line) -> [Symbol; REELS] {
        line.positions().map(|p| self.get(p))
    }

    /// Rows top to bottom separated by `/`, e.g. `🍎🍌🍊🥒/...`.
    pub fn to_glyphs(&self) -> String {
        (0..ROWS)
            .map(|row| {
                (0..REELS)
                    .map(|reel| self.0[reel][row].glyph())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn parse_glyphs(s: &str) -> Result<Self, ParseError> {
        let rows: Vec<&str> = s.trim().split('/').collect();
        if rows.len() != ROWS {
            return Err(ParseError::Shape(format!("{} rows", rows.len())));
        }
        let mut parsed = [[Symbol::Apple; REELS]; ROWS];
        for (row, text) in rows.iter().enumerate() {
            let symbols = split_glyphs(text)?;
            if symbols.len() != REELS {
                return Err(ParseError::Shape(format!(
                    "{} symbols in row {}",
                    symbols.len(),
                    row
                )));
            }
            parsed[row].copy_from_slice(&symbols);
        }
        Ok(Self::from_rows(parsed))
    }
}

fn split_glyphs(mut text: &str) -> Result<Vec<Symbol>, ParseError> {
    let mut out = Vec::with_capacity(REELS);
    while !text.is_empty() {
        let sym = Symbol::ALL
            .iter()
            .copied()
            .find(|s| text.starts_with(s.glyph()))
            .ok_or_else(|| ParseError::Glyph(text.chars().take(1).collect()))?;
        out.push(sym);
        text = &text[sym.glyph().len()..];
    }
    Ok(out)
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..ROWS {
            let cells: Vec<&str> = (0..REELS).map(|reel| self.0[reel][row].glyph()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
