//! Terminal playback of a solved path.

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::puzzle::{Board, BLANK};
use crate::search::Node;

const TILE_COLOR: Color = Color::Cyan;
const BLANK_COLOR: Color = Color::Red;
const TEXT_COLOR: Color = Color::Black;

pub struct Animator<W: Write> {
    out: W,
    delay: Duration,
}

impl<W: Write> Animator<W> {
    pub fn new(out: W, delay: Duration) -> Self {
        Self { out, delay }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draws one board with the step counter beside it.
    pub fn draw(&mut self, board: &Board, steps: usize) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

        for (row, cells) in board.cells().iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            for &value in cells {
                let (background, label) = if value == BLANK {
                    (BLANK_COLOR, "   ".to_string())
                } else {
                    (TILE_COLOR, format!(" {} ", value))
                };
                queue!(
                    self.out,
                    SetBackgroundColor(background),
                    SetForegroundColor(TEXT_COLOR),
                    Print(label),
                    ResetColor,
                    Print(" ")
                )?;
            }
        }

        queue!(
            self.out,
            cursor::MoveTo(16, 1),
            Print(format!("Steps: {}", steps)),
            cursor::MoveTo(0, 4)
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Shows `start`, then each step of the path with a pause before it.
    /// An empty path leaves the start on screen and returns.
    pub fn play(&mut self, start: &Board, path: &[Node]) -> Result<()> {
        self.draw(start, 0)?;
        for (i, node) in path.iter().enumerate() {
            thread::sleep(self.delay);
            self.draw(&node.board, i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::GOAL;
    use crate::search::solve_puzzle;

    fn rendered(animator: Animator<Vec<u8>>) -> String {
        String::from_utf8(animator.into_inner()).unwrap()
    }

    #[test]
    fn draw_shows_tiles_and_counter() {
        let mut animator = Animator::new(Vec::new(), Duration::ZERO);
        animator.draw(&GOAL, 7).unwrap();
        let out = rendered(animator);

        for value in 1..=8 {
            assert!(out.contains(&format!(" {} ", value)), "missing tile {}", value);
        }
        assert!(out.contains("Steps: 7"));
        assert!(!out.contains(" 0 "));
    }

    #[test]
    fn play_draws_every_step() {
        let start = Board::new([[1, 2, 3], [4, 5, 6], [0, 7, 8]]).unwrap();
        let path = solve_puzzle(&start).unwrap();
        assert_eq!(path.len(), 2);

        let mut animator = Animator::new(Vec::new(), Duration::ZERO);
        animator.play(&start, &path).unwrap();
        let out = rendered(animator);
        assert!(out.contains("Steps: 0"));
        assert!(out.contains("Steps: 1"));
        assert!(out.contains("Steps: 2"));
        assert!(!out.contains("Steps: 3"));
    }

    #[test]
    fn play_empty_path_only_draws_start() {
        let mut animator = Animator::new(Vec::new(), Duration::ZERO);
        animator.play(&GOAL, &[]).unwrap();
        let out = rendered(animator);
        assert!(out.contains("Steps: 0"));
        assert!(!out.contains("Steps: 1"));
    }
}
