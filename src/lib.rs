//! Best-first (A*) solver for the 3x3 sliding tile puzzle.

pub mod animate;
pub mod config;
pub mod error;
pub mod heuristic;
pub mod puzzle;
pub mod search;

pub use error::{Error, Result};
pub use heuristic::{heuristic, Heuristic};
pub use puzzle::{Board, Move, Position, StateKey, GOAL};
pub use search::{build_path, expand, solve_puzzle, Node, Solution, Solver};
