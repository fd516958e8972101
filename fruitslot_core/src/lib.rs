pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod grid;
pub mod ledger;
pub mod rng;
pub mod symbols;

pub use crate::config::{EngineConfig, SPIN_COST, WILD_PROBABILITY, WIN_PAYOUT};
pub use crate::engine::{SlotEngine, SpinOutcome};
pub use crate::error::{ConfigError, EngineError, EngineResult, LedgerError, ParseError};
pub use crate::evaluator::{classify, evaluate, winning_lines, LineClass, WinResult};
pub use crate::generator::SymbolGenerator;
pub use crate::grid::{Grid, Line, Position, REELS, ROWS};
pub use crate::ledger::{BalanceStore, CreditLedger};
pub use crate::rng::{derive_floats, derive_hash_hex, ProvablyFairRng, RandSource, RandomSource};
pub use crate::symbols::{Alphabet, Symbol};
