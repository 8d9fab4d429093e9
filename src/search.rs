//! A* over board states.
//!
//! Nodes are keyed by [`StateKey`]. A state is admitted to the open set the first
//! time it is discovered and never again: later, possibly cheaper, routes to a
//! state already in the open or closed set are dropped. Parents are recorded as
//! keys into the closed set rather than as links.

use log::{debug, trace, warn};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::error::{Error, Result};
use crate::heuristic::Heuristic;
use crate::puzzle::{Board, Move, StateKey, GOAL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub board: Board,
    /// Moves taken from the start.
    pub g: u32,
    pub h: u32,
    /// Key of the node this one was expanded from. The start node is its own parent.
    pub parent: StateKey,
    /// `None` only for the start node.
    pub movement: Option<Move>,
}

impl Node {
    pub fn start(board: Board, heuristic: Heuristic) -> Self {
        Self {
            board,
            g: 0,
            h: heuristic.estimate(&board),
            parent: board.key(),
            movement: None,
        }
    }

    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    pub fn key(&self) -> StateKey {
        self.board.key()
    }
}

/// Every node one blank slide away from `node`, in `Move::ALL` order.
pub fn expand(node: &Node, heuristic: Heuristic) -> Result<Vec<Node>> {
    let blank = node.board.blank()?;
    let parent = node.key();

    let children: Vec<Node> = Move::ALL
        .iter()
        .filter_map(|&movement| {
            node.board.slide(blank, movement).map(|board| Node {
                board,
                g: node.g + 1,
                h: heuristic.estimate(&board),
                parent,
                movement: Some(movement),
            })
        })
        .collect();
    Ok(children)
}

/// Discovered but unexpanded nodes.
///
/// `pop_best` returns the lowest `f`; among equal `f` the node inserted first wins.
#[derive(Debug, Default)]
pub struct OpenSet {
    nodes: HashMap<StateKey, Node>,
    queue: BinaryHeap<Reverse<(u32, u64, StateKey)>>,
    next_seq: u64,
}

impl OpenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, leaving the set unchanged, if the state is already present.
    pub fn insert(&mut self, node: Node) -> bool {
        let key = node.key();
        if self.nodes.contains_key(&key) {
            return false;
        }
        self.queue.push(Reverse((node.f(), self.next_seq, key)));
        self.next_seq += 1;
        self.nodes.insert(key, node);
        true
    }

    pub fn pop_best(&mut self) -> Option<Node> {
        // Entries are never updated in place, so every queued key is live
        let Reverse((_, _, key)) = self.queue.pop()?;
        self.nodes.remove(&key)
    }

    pub fn contains(&self, key: &StateKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Expanded nodes.
#[derive(Debug, Default)]
pub struct ClosedSet {
    nodes: HashMap<StateKey, Node>,
}

impl ClosedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: Node) {
        self.nodes.insert(node.key(), node);
    }

    pub fn get(&self, key: &StateKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn contains(&self, key: &StateKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Walks parent keys back from `target` and returns the nodes reached by a move,
/// start first. The start node itself is not included.
pub fn build_path(closed: &ClosedSet, target: &Board) -> Result<Vec<Node>> {
    let lookup = |key: StateKey| {
        closed
            .get(&key)
            .copied()
            .ok_or(Error::MissingAncestor { key })
    };

    let mut node = lookup(target.key())?;
    let mut path = Vec::new();
    while node.movement.is_some() {
        path.push(node);
        node = lookup(node.parent)?;
    }
    path.reverse();
    Ok(path)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// One node per move. Empty when the start is already solved or no path exists.
    pub steps: Vec<Node>,
    pub expanded: usize,
    pub peak_open: usize,
}

impl Solution {
    pub fn move_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn moves(&self) -> Vec<Move> {
        self.steps.iter().filter_map(|node| node.movement).collect()
    }

    pub fn boards(&self) -> Vec<Board> {
        self.steps.iter().map(|node| node.board).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Solver {
    heuristic: Heuristic,
    max_expansions: Option<usize>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn solve(&self, start: &Board) -> Result<Solution> {
        start.validate()?;

        let mut open = OpenSet::new();
        let mut closed = ClosedSet::new();
        open.insert(Node::start(*start, self.heuristic));

        let mut expanded = 0;
        let mut peak_open = open.len();
        debug!("solving from {} with {:?}", start.key(), self.heuristic);

        while let Some(current) = open.pop_best() {
            if let Some(limit) = self.max_expansions {
                if expanded >= limit {
                    return Err(Error::BudgetExhausted { expanded });
                }
            }
            expanded += 1;
            closed.insert(current);

            if current.board == GOAL {
                let steps = build_path(&closed, &GOAL)?;
                debug!(
                    "solved in {} moves, {} expanded, peak open {}",
                    steps.len(),
                    expanded,
                    peak_open
                );
                return Ok(Solution {
                    steps,
                    expanded,
                    peak_open,
                });
            }

            trace!("expand {} g={} h={}", current.key(), current.g, current.h);
            for child in expand(&current, self.heuristic)? {
                let key = child.key();
                if closed.contains(&key) || open.contains(&key) {
                    continue;
                }
                open.insert(child);
            }
            peak_open = peak_open.max(open.len());
        }

        warn!(
            "open set exhausted after {} expansions; {} has no solution",
            expanded,
            start.key()
        );
        Ok(Solution {
            steps: Vec::new(),
            expanded,
            peak_open,
        })
    }
}

/// Solves with the default heuristic and no budget.
pub fn solve_puzzle(start: &Board) -> Result<Vec<Node>> {
    Solver::new().solve(start).map(|solution| solution.steps)
}
