//! Distance estimates from a board to [`GOAL`](crate::puzzle::GOAL).

use crate::puzzle::{Board, Position, BLANK, SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Manhattan distance summed over all nine cells, blank included.
    ///
    /// Each move shifts the estimate by 0 or 2, so it can overestimate by up to
    /// a factor of two. Kept as the default because it reproduces the reference paths.
    #[default]
    ManhattanWithBlank,
    /// Manhattan distance over the eight numbered tiles. Admissible and consistent.
    Manhattan,
}

impl Heuristic {
    pub fn estimate(&self, board: &Board) -> u32 {
        let include_blank = matches!(self, Heuristic::ManhattanWithBlank);
        let mut h = 0;
        for (row, cells) in board.cells().iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value == BLANK && !include_blank {
                    continue;
                }
                h += Position::new(row, col).manhattan(goal_position(value));
            }
        }
        h
    }
}

/// Where `value` sits in the goal arrangement.
fn goal_position(value: u8) -> Position {
    let index = if value == BLANK {
        SIZE * SIZE - 1
    } else {
        value as usize - 1
    };
    Position::new(index / SIZE, index % SIZE)
}

pub fn heuristic(board: &Board) -> u32 {
    Heuristic::default().estimate(board)
}
