//! Anytime best-first search.
//!
//! Nodes are ordered by `f = g + h` with `g` the moves played so far and `h` the
//! cells still outside the anchor region. Equal `f` prefers lower `g`, then the
//! node pushed first. States are deduplicated on their canonical key when they
//! are pushed: each key remembers the fewest moves it was reached with, and a
//! child is queued only if it beats that. `h` can overestimate, so a state may be
//! reached again by a shorter path after it was queued; it is then queued anew
//! and the older, longer node is skipped when popped. Run to exhaustion, the
//! search therefore always finds the minimum-cost solution.
//!
//! Filled boards are goals: they are queued without the duplicate check so that
//! different move sequences reaching a fill each count as a separate solution.
use crate::engine::{Board, Cell, Color, DEFAULT_ANCHOR};
use crate::error::Result;
use crate::heuristics::remaining_cells_for;
use crate::solver::{SearchReport, Solution, Termination};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Limits for one anytime search.
#[derive(Clone, Debug, PartialEq)]
pub struct AnytimeOptions {
    /// Wall-clock budget. `None` searches until another limit is hit.
    pub time_budget: Option<Duration>,
    /// Stop once this many solutions are collected. Zero returns immediately.
    pub max_solutions: usize,
    /// Stop once this many nodes have been generated. Bounds memory use.
    pub node_limit: Option<usize>,
    pub anchor: Cell,
}

impl Default for AnytimeOptions {
    fn default() -> Self {
        AnytimeOptions {
            time_budget: Some(Duration::from_secs(5)),
            max_solutions: 5,
            node_limit: None,
            anchor: DEFAULT_ANCHOR,
        }
    }
}

struct Node<C> {
    f: usize,
    g: usize,
    seq: u64,
    board: Board<C>,
    moves: Vec<C>,
}

impl<C> Node<C> {
    fn key(&self) -> (usize, usize, u64) {
        (self.f, self.g, self.seq)
    }
}

impl<C> PartialEq for Node<C> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<C> Eq for Node<C> {}

// Reversed so that `BinaryHeap` pops the smallest (f, g, seq) first.
impl<C> Ord for Node<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl<C> PartialOrd for Node<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first solver that collects several ranked solutions within its limits.
#[derive(Clone, Debug, Default)]
pub struct AnytimeSolver {
    options: AnytimeOptions,
}

impl AnytimeSolver {
    pub fn new(options: AnytimeOptions) -> Self {
        AnytimeSolver { options }
    }

    pub fn options(&self) -> &AnytimeOptions {
        &self.options
    }

    /// Runs the search on `board`.
    ///
    /// Fails only if the anchor lies outside the board. Running out of time or
    /// nodes is reported through [`SearchReport::termination`]; the report then
    /// holds whatever solutions were found, sorted by ascending cost.
    pub fn solve<C: Color>(&self, board: &Board<C>) -> Result<SearchReport<C>> {
        let AnytimeOptions {
            time_budget,
            max_solutions,
            node_limit,
            anchor,
        } = self.options;
        board.check_anchor(anchor)?;

        let start = Instant::now();
        info!(
            event = "solve_start",
            solver = "anytime",
            rows = board.rows(),
            cols = board.cols(),
            time_budget_ms = time_budget.map(|d| d.as_millis() as u64),
            max_solutions,
        );

        let mut solutions: Vec<Solution<C>> = Vec::new();
        let mut best_g = HashMap::new();
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;
        let mut expanded = 0usize;

        let root_region = board.connected_region(anchor);
        best_g.insert(board.canonical_key_with(&root_region), 0);
        heap.push(Node {
            f: remaining_cells_for(board, &root_region),
            g: 0,
            seq,
            board: board.clone(),
            moves: Vec::new(),
        });
        let mut generated = 1usize;

        let termination = loop {
            if solutions.len() >= max_solutions {
                break Termination::SolutionLimit;
            }
            if time_budget.is_some_and(|budget| start.elapsed() >= budget) {
                break Termination::TimeBudget;
            }
            if node_limit.is_some_and(|limit| generated >= limit) {
                break Termination::NodeLimit;
            }
            let Some(node) = heap.pop() else {
                break Termination::QueueExhausted;
            };

            if node.board.is_filled() {
                expanded += 1;
                info!(
                    event = "solution_found",
                    cost = node.moves.len(),
                    moves = ?node.moves,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                );
                solutions.push(Solution::new(node.moves));
                continue;
            }

            let region = node.board.connected_region(anchor);
            assert!(!region.is_empty(), "anchor region must contain the anchor");
            let key = node.board.canonical_key_with(&region);
            if best_g.get(&key).is_some_and(|&g| g < node.g) {
                trace!(g = node.g, "skip superseded node");
                continue;
            }
            expanded += 1;
            trace!(f = node.f, g = node.g, region = region.len(), "expand");

            for color in node.board.neighboring_colors(&region) {
                let child = node.board.with_move(&region, color.clone());
                let child_region = child.connected_region(anchor);
                let h = remaining_cells_for(&child, &child_region);
                let g = node.g + 1;
                if h > 0 {
                    let child_key = child.canonical_key_with(&child_region);
                    if best_g.get(&child_key).is_some_and(|&seen| seen <= g) {
                        continue;
                    }
                    best_g.insert(child_key, g);
                }

                let mut moves = Vec::with_capacity(node.moves.len() + 1);
                moves.extend(node.moves.iter().cloned());
                moves.push(color.clone());

                seq += 1;
                generated += 1;
                heap.push(Node {
                    f: g + h,
                    g,
                    seq,
                    board: child,
                    moves,
                });
            }
        };

        solutions.sort_by_key(Solution::cost);
        solutions.truncate(max_solutions);

        let elapsed = start.elapsed();
        info!(
            event = "solve_end",
            solver = "anytime",
            termination = ?termination,
            solutions = solutions.len(),
            best_cost = solutions.first().map(Solution::cost),
            expanded,
            generated,
            duration_ms = elapsed.as_millis() as u64,
        );
        if solutions.is_empty() {
            debug!("no solution found within limits");
        }

        Ok(SearchReport {
            solutions,
            termination,
            expanded,
            generated,
            elapsed,
        })
    }
}

/// Runs an anytime search from the top-left anchor.
pub fn solve_anytime<C: Color>(
    board: &Board<C>,
    time_budget: Option<Duration>,
    max_solutions: usize,
) -> Result<SearchReport<C>> {
    AnytimeSolver::new(AnytimeOptions {
        time_budget,
        max_solutions,
        ..AnytimeOptions::default()
    })
    .solve(board)
}
