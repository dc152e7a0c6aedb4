use crate::engine::{Board, Cell, Color, Tile};
use std::time::Duration;

/// Represents a solution found by a solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<C = Tile> {
    /// Colors to play, in order. Each recolors the anchor region.
    pub moves: Vec<C>,
}

impl<C: Color> Solution<C> {
    pub fn new(moves: Vec<C>) -> Self {
        Solution { moves }
    }

    /// Number of moves. Solutions are ranked by this, ascending.
    pub fn cost(&self) -> usize {
        self.moves.len()
    }

    /// Plays every move on a copy of `board` and returns the resulting board.
    pub fn replay(&self, board: &Board<C>, anchor: Cell) -> Board<C> {
        let mut board = board.clone();
        for color in &self.moves {
            let region = board.connected_region(anchor);
            board.apply_move(&region, color.clone());
        }
        board
    }

    /// Returns `true` if playing the moves on `board` leaves it filled.
    pub fn solves(&self, board: &Board<C>, anchor: Cell) -> bool {
        self.replay(board, anchor).is_filled()
    }
}

/// Why a best-first search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Every reachable state was expanded.
    QueueExhausted,
    /// The wall-clock budget ran out.
    TimeBudget,
    /// The requested number of solutions was collected.
    SolutionLimit,
    /// The cap on generated nodes was reached.
    NodeLimit,
}

/// Outcome of an anytime search.
///
/// An empty `solutions` list is a normal result: the budget was too small for the
/// state space, not an error.
#[derive(Clone, Debug)]
pub struct SearchReport<C = Tile> {
    /// Found solutions sorted by ascending cost.
    pub solutions: Vec<Solution<C>>,
    pub termination: Termination,
    /// Nodes popped from the queue.
    pub expanded: usize,
    /// Nodes pushed onto the queue, including the root.
    pub generated: usize,
    pub elapsed: Duration,
}

impl<C: Color> SearchReport<C> {
    /// The cheapest solution found, if any.
    pub fn best(&self) -> Option<&Solution<C>> {
        self.solutions.first()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}
