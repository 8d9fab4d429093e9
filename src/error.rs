//! Error types for the solver

use thiserror::Error;

use crate::puzzle::StateKey;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("tile {value} not found on board")]
    TileNotFound { value: u8 },

    #[error("internal consistency error: ancestor {key} missing from closed set")]
    MissingAncestor { key: StateKey },

    #[error("search budget exhausted after {expanded} expansions")]
    BudgetExhausted { expanded: usize },

    #[error("invalid board '{input}': {reason}")]
    InvalidBoard { input: String, reason: String },

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
