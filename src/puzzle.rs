use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const SIZE: usize = 3;
pub const BLANK: u8 = 0;

pub const GOAL: Board = Board::from_cells_unchecked([[1, 2, 3], [4, 5, 6], [7, 8, 0]]);

/// Direction the blank slides in. The order of `Move::ALL` is the expansion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn label(&self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(&self, other: Position) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }

    /// The neighbouring position in direction `movement`, if it is still on the grid.
    pub fn step(&self, movement: Move) -> Option<Position> {
        let (dr, dc) = movement.as_offset();
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;

        if row >= 0 && row < SIZE as isize && col >= 0 && col < SIZE as isize {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

/// Canonical lookup key for a board: one nibble per cell in row-major order.
///
/// Printed in hex this reads back as the nine tiles, e.g. `380176542`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(u64);

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:09x}", self.0)
    }
}

/// An immutable 3x3 arrangement of the tiles 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[u8; SIZE]; SIZE],
}

impl Board {
    pub fn new(cells: [[u8; SIZE]; SIZE]) -> Result<Self> {
        let board = Self { cells };
        board.validate()?;
        Ok(board)
    }

    /// For boards known valid at compile time.
    pub(crate) const fn from_cells_unchecked(cells: [[u8; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[[u8; SIZE]; SIZE] {
        &self.cells
    }

    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.row][pos.col]
    }

    /// Checks that every tile 0..=8 appears exactly once.
    pub fn validate(&self) -> Result<()> {
        let mut seen = [false; SIZE * SIZE];
        for &value in self.cells.iter().flatten() {
            let slot = seen.get_mut(value as usize).ok_or_else(|| Error::InvalidBoard {
                input: self.key().to_string(),
                reason: format!("tile {} out of range 0..=8", value),
            })?;
            if *slot {
                return Err(Error::InvalidBoard {
                    input: self.key().to_string(),
                    reason: format!("tile {} appears more than once", value),
                });
            }
            *slot = true;
        }
        Ok(())
    }

    pub fn locate(&self, value: u8) -> Result<Position> {
        for (row, cells) in self.cells.iter().enumerate() {
            if let Some(col) = cells.iter().position(|&v| v == value) {
                return Ok(Position::new(row, col));
            }
        }
        Err(Error::TileNotFound { value })
    }

    pub fn blank(&self) -> Result<Position> {
        self.locate(BLANK)
    }

    pub fn key(&self) -> StateKey {
        let packed = self
            .cells
            .iter()
            .flatten()
            .fold(0u64, |acc, &v| (acc << 4) | u64::from(v));
        StateKey(packed)
    }

    pub fn is_goal(&self) -> bool {
        *self == GOAL
    }

    /// Slides the blank at `blank` one step in `movement`, returning the new board.
    pub fn slide(&self, blank: Position, movement: Move) -> Option<Board> {
        let target = blank.step(movement)?;
        let mut cells = self.cells;
        cells[blank.row][blank.col] = cells[target.row][target.col];
        cells[target.row][target.col] = BLANK;
        Some(Board { cells })
    }

    /// Returns `Ok(None)` when the blank cannot move in that direction.
    pub fn apply_move(&self, movement: Move) -> Result<Option<Board>> {
        let blank = self.blank()?;
        Ok(self.slide(blank, movement))
    }

    pub fn is_solvable(&self) -> bool {
        let flattened: Vec<u8> = self.cells.iter().flatten().copied().collect();
        // Odd width: solvable iff the inversion count is even
        count_inversions(&flattened) % 2 == 0
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut flattened: Vec<u8> = GOAL.cells.iter().flatten().copied().collect();

        loop {
            flattened.shuffle(rng);

            let mut cells = [[BLANK; SIZE]; SIZE];
            for i in 0..SIZE {
                for j in 0..SIZE {
                    cells[i][j] = flattened[i * SIZE + j];
                }
            }

            let board = Board { cells };
            if board.is_solvable() {
                return board;
            }
        }
    }
}

fn count_inversions(flattened: &[u8]) -> usize {
    flattened
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != BLANK)
        .map(|(i, &val)| {
            flattened[i + 1..]
                .iter()
                .filter(|&&next| next != BLANK && next < val)
                .count()
        })
        .sum()
}

impl FromStr for Board {
    type Err = Error;

    /// Accepts the nine digits with optional `,` `/` `[` `]` or whitespace separators,
    /// so `3,8,0,1,7,6,5,4,2`, `380/176/542` and `[[3,8,0],[1,7,6],[5,4,2]]` all parse.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidBoard {
            input: s.to_string(),
            reason,
        };

        let mut digits = Vec::with_capacity(SIZE * SIZE);
        for c in s.chars() {
            match c {
                ',' | '/' | '[' | ']' => {}
                c if c.is_whitespace() => {}
                c => {
                    let d = c
                        .to_digit(10)
                        .ok_or_else(|| invalid(format!("unexpected character '{}'", c)))?;
                    digits.push(d as u8);
                }
            }
        }

        if digits.len() != SIZE * SIZE {
            return Err(invalid(format!(
                "expected {} tiles, got {}",
                SIZE * SIZE,
                digits.len()
            )));
        }

        let mut cells = [[BLANK; SIZE]; SIZE];
        for (i, d) in digits.into_iter().enumerate() {
            cells[i / SIZE][i % SIZE] = d;
        }

        let board = Board { cells };
        board.validate().map_err(|e| match e {
            Error::InvalidBoard { reason, .. } => invalid(reason),
            other => other,
        })?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Board {
        Board::new([[3, 8, 0], [1, 7, 6], [5, 4, 2]]).unwrap()
    }

    #[test]
    fn locate_finds_each_tile() {
        let board = sample();
        assert_eq!(board.locate(0).unwrap(), Position::new(0, 2));
        assert_eq!(board.locate(3).unwrap(), Position::new(0, 0));
        assert_eq!(board.locate(2).unwrap(), Position::new(2, 2));
    }

    #[test]
    fn locate_missing_tile_is_an_error() {
        // Bypasses validation to build a corrupted board
        let broken = Board {
            cells: [[1, 1, 3], [4, 5, 6], [7, 8, 2]],
        };
        assert!(matches!(
            broken.blank(),
            Err(Error::TileNotFound { value: 0 })
        ));
    }

    #[test]
    fn key_reads_back_as_tiles() {
        assert_eq!(sample().key().to_string(), "380176542");
        assert_eq!(GOAL.key().to_string(), "123456780");
    }

    #[test]
    fn key_equality_matches_board_equality() {
        let a = sample();
        let b = a.apply_move(Move::Down).unwrap().unwrap();
        let back = b.apply_move(Move::Down.opposite()).unwrap().unwrap();
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), back.key());
        assert_eq!(a, back);
    }

    #[test]
    fn apply_move_off_grid_is_none() {
        let board = sample();
        assert_eq!(board.apply_move(Move::Up).unwrap(), None);
        assert_eq!(board.apply_move(Move::Right).unwrap(), None);
    }

    #[test]
    fn apply_move_leaves_original_untouched() {
        let board = sample();
        let moved = board.apply_move(Move::Left).unwrap().unwrap();
        assert_eq!(moved.cells(), &[[3, 0, 8], [1, 7, 6], [5, 4, 2]]);
        assert_eq!(moved.get(Position::new(0, 2)), 8);
        assert_eq!(board, sample());
    }

    #[test]
    fn parse_accepts_several_layouts() {
        let expected = sample();
        for input in ["3,8,0,1,7,6,5,4,2", "380/176/542", "[[3,8,0],[1,7,6],[5,4,2]]", "3 8 0\n1 7 6\n5 4 2"] {
            assert_eq!(input.parse::<Board>().unwrap(), expected, "input {:?}", input);
        }
    }

    #[test]
    fn parse_rejects_bad_boards() {
        assert!(matches!("12345678".parse::<Board>(), Err(Error::InvalidBoard { .. })));
        assert!(matches!("1,2,3,4,5,6,7,8,8".parse::<Board>(), Err(Error::InvalidBoard { .. })));
        assert!(matches!("1,2,3,4,5,6,7,9,0".parse::<Board>(), Err(Error::InvalidBoard { .. })));
        assert!(matches!("1,2,3,4,x,6,7,8,0".parse::<Board>(), Err(Error::InvalidBoard { .. })));
    }

    #[test]
    fn solvability_parity() {
        assert!(GOAL.is_solvable());
        assert!(sample().is_solvable());
        let swapped = Board::new([[2, 1, 3], [4, 5, 6], [7, 8, 0]]).unwrap();
        assert!(!swapped.is_solvable());
    }

    #[test]
    fn shuffled_boards_are_valid_and_solvable() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let board = Board::shuffled(&mut rng);
            assert!(board.validate().is_ok());
            assert!(board.is_solvable());
        }
    }
}
