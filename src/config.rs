use std::time::Duration;

use crate::heuristic::Heuristic;
use crate::puzzle::Board;
use crate::search::Solver;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

pub const DEFAULT_PUZZLE: Board = Board::from_cells_unchecked([[3, 8, 0], [1, 7, 6], [5, 4, 2]]);

#[derive(Debug, Clone)]
pub struct Config {
    pub puzzle: Board,
    pub heuristic: Heuristic,
    pub max_expansions: Option<usize>,
    pub delay: Duration,
    pub animate: bool,
}

impl Config {
    pub fn solver(&self) -> Solver {
        let solver = Solver::new().with_heuristic(self.heuristic);
        match self.max_expansions {
            Some(limit) => solver.with_max_expansions(limit),
            None => solver,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            puzzle: DEFAULT_PUZZLE,
            heuristic: Heuristic::default(),
            max_expansions: None,
            delay: DEFAULT_DELAY,
            animate: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.puzzle.key().to_string(), "380176542");
        assert!(config.puzzle.validate().is_ok());
        assert_eq!(config.delay, Duration::from_millis(300));
        assert!(config.animate);
        assert_eq!(config.solver().heuristic(), Heuristic::ManhattanWithBlank);
    }

    #[test]
    fn solver_carries_budget() {
        let config = Config {
            max_expansions: Some(5),
            ..Config::default()
        };
        assert!(config.solver().solve(&config.puzzle).is_err());
    }
}
