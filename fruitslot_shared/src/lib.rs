use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fruitslot_core::{winning_lines, Grid, Line, ParseError, SpinOutcome, Symbol};
use serde::{Deserialize, Serialize};

/// What a renderer needs to draw one spin and highlight the winning line.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpinReport {
    /// `reels[reel][row]` as glyphs.
    pub reels: Vec<Vec<String>>,
    pub balance_before: u64,
    pub balance: u64,
    pub payout: u64,
    pub win: bool,
    pub wildcard_win: bool,
    pub matched_symbol: Option<String>,
    pub line: Option<Line>,
    /// `[reel, row]` pairs.
    pub positions: Vec<[usize; 2]>,
}

impl From<&SpinOutcome> for SpinReport {
    fn from(outcome: &SpinOutcome) -> Self {
        let result = &outcome.result;
        Self {
            reels: outcome
                .grid
                .reels()
                .iter()
                .map(|reel| reel.iter().map(|s| s.glyph().to_string()).collect())
                .collect(),
            balance_before: outcome.balance_before,
            balance: outcome.balance,
            payout: outcome.payout,
            win: result.is_win,
            wildcard_win: result.is_wildcard_win,
            matched_symbol: result.matched_symbol.map(|s| s.glyph().to_string()),
            line: result.line,
            positions: result.positions.iter().map(|p| [p.reel, p.row]).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpinLogEntry {
    pub id: u64,
    pub ts: DateTime<Utc>,
    pub client_seed: String,
    pub nonce: u64,
    pub server_seed_hash: String,
    pub grid: String,
    pub line: Option<Line>,
    pub balance: u64,
}

impl SpinLogEntry {
    pub fn grid(&self) -> ReportResult<Grid> {
        Ok(Grid::parse_glyphs(&self.grid)?)
    }
}

/// Aggregate numbers over many spins.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SimulationReport {
    pub spins: u64,
    pub wagered: u64,
    pub paid: u64,
    pub wins: u64,
    pub wildcard_wins: u64,
    /// Spins where more than one line would have paid.
    pub multi_line_grids: u64,
    pub jokers_drawn: u64,
    pub cells_drawn: u64,
    pub line_hits: BTreeMap<String, u64>,
}

impl SimulationReport {
    pub fn record(&mut self, outcome: &SpinOutcome) {
        self.spins += 1;
        self.wagered += outcome.cost;
        self.paid += outcome.payout;
        if outcome.result.is_win {
            self.wins += 1;
        }
        if outcome.result.is_wildcard_win {
            self.wildcard_wins += 1;
        }
        if let Some(line) = outcome.result.line {
            *self.line_hits.entry(line.id().to_string()).or_default() += 1;
        }
        if winning_lines(&outcome.grid).len() > 1 {
            self.multi_line_grids += 1;
        }
        for reel in outcome.grid.reels() {
            self.cells_drawn += reel.len() as u64;
            self.jokers_drawn += reel.iter().filter(|s| **s == Symbol::Joker).count() as u64;
        }
    }

    pub fn rtp(&self) -> f64 {
        if self.wagered == 0 {
            return 0.0;
        }
        self.paid as f64 / self.wagered as f64
    }

    pub fn hit_rate(&self) -> f64 {
        if self.spins == 0 {
            return 0.0;
        }
        self.wins as f64 / self.spins as f64
    }

    pub fn joker_frequency(&self) -> f64 {
        if self.cells_drawn == 0 {
            return 0.0;
        }
        self.jokers_drawn as f64 / self.cells_drawn as f64
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("invalid grid: {0}")]
    Grid(#[from] ParseError),
}

pub type ReportResult<T> = Result<T, ReportError>;
