#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("insufficient balance: {balance} credits, spin costs {cost}")]
    InsufficientBalance { balance: u64, cost: u64 },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown symbol index {0}")]
    SymbolIndex(u8),
    #[error("unknown symbol glyph {0:?}")]
    Glyph(String),
    #[error("grid needs 4 rows of 4 symbols, got {0}")]
    Shape(String),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] EngineError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("unknown user {0:?}")]
    UnknownUser(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type EngineResult<T> = Result<T, EngineError>;
