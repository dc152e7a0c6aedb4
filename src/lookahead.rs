//! Bounded-depth lookahead solver.
//!
//! Each decision simulates every move sequence up to `max_depth` plies, scores the
//! leaves by anchor region size and keeps the best scoring sequence. That whole
//! sequence is then played before the next decision. Sub-results are memoized on
//! `(canonical state, depth, max_depth)` in a table owned by the solver, so they
//! are shared between decisions of the same solve but never across solves.
use crate::engine::{Board, Cell, Color, StateKey, DEFAULT_ANCHOR};
use crate::error::{Result, SolveError};
use crate::heuristics::region_score;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info, trace};

/// A candidate color with the best score reachable after playing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoredColor<C> {
    pub color: C,
    /// Anchor region size at the end of `path`.
    pub score: usize,
    /// The best move sequence, starting with `color`. Empty at the depth limit.
    pub path: Vec<C>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct MemoKey<C> {
    state: StateKey<C>,
    depth: usize,
    max_depth: usize,
}

/// Cache of per-state lookahead results.
#[derive(Debug)]
pub struct MemoTable<C> {
    entries: HashMap<MemoKey<C>, Vec<ScoredColor<C>>>,
    hits: usize,
    misses: usize,
}

impl<C> Default for MemoTable<C> {
    fn default() -> Self {
        MemoTable {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<C> MemoTable<C> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of states actually evaluated (cache misses).
    pub fn misses(&self) -> usize {
        self.misses
    }
}

/// Scores every candidate color of `board`.
///
/// At `depth == max_depth`, or once the board is filled, the result is a single entry
/// for the anchor's current color scored by its region size with an empty path.
/// Otherwise there is one entry per neighboring color, in enumeration order, each
/// carrying the best score found beneath it.
pub fn score_paths<C: Color>(
    board: &Board<C>,
    anchor: Cell,
    depth: usize,
    max_depth: usize,
    memo: &mut MemoTable<C>,
) -> Vec<ScoredColor<C>> {
    let region = board.connected_region(anchor);
    assert!(!region.is_empty(), "anchor region must contain the anchor");

    let key = MemoKey {
        state: board.canonical_key_with(&region),
        depth,
        max_depth,
    };
    if let Some(cached) = memo.entries.get(&key) {
        memo.hits += 1;
        return cached.clone();
    }
    memo.misses += 1;

    let scored = if depth >= max_depth || board.is_filled() {
        vec![ScoredColor {
            color: board.get(anchor.0, anchor.1).clone(),
            score: region_score(&region),
            path: Vec::new(),
        }]
    } else {
        board
            .neighboring_colors(&region)
            .map(|color| {
                let child = board.with_move(&region, color.clone());
                let best = best_entry(score_paths(&child, anchor, depth + 1, max_depth, memo));
                let mut path = Vec::with_capacity(best.path.len() + 1);
                path.push(color.clone());
                path.extend(best.path);
                ScoredColor {
                    color: color.clone(),
                    score: best.score,
                    path,
                }
            })
            .collect()
    };

    memo.entries.insert(key, scored.clone());
    scored
}

// First entry with the highest score wins ties.
fn best_entry<C>(entries: Vec<ScoredColor<C>>) -> ScoredColor<C> {
    match entries
        .into_iter()
        .reduce(|best, entry| if entry.score > best.score { entry } else { best })
    {
        Some(best) => best,
        None => unreachable!("an unfilled board always has a neighboring color"),
    }
}

/// Picks the best first move and the full path behind it.
///
/// Returns `None` if the board is already filled.
pub fn best_color_and_path<C: Color>(
    board: &Board<C>,
    anchor: Cell,
    max_depth: usize,
    memo: &mut MemoTable<C>,
) -> Option<ScoredColor<C>> {
    if board.is_filled() {
        return None;
    }
    Some(best_entry(score_paths(board, anchor, 0, max_depth, memo)))
}

/// Move-by-move solver session.
///
/// Iterating yields the chosen colors until the working board is filled. The solver
/// owns its board, so callers can stop consuming at any point.
///
/// # Examples
/// ```
/// use colorfill_solver::lookahead::LookaheadSolver;
/// use colorfill_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["RR", "BR"]).unwrap();
/// let moves: Vec<_> = LookaheadSolver::new(board, 4, (0, 0)).unwrap().collect();
/// assert_eq!(moves.len(), 1);
/// ```
#[derive(Debug)]
pub struct LookaheadSolver<C> {
    board: Board<C>,
    anchor: Cell,
    max_depth: usize,
    memo: MemoTable<C>,
    plan: VecDeque<C>,
    plans: usize,
    moves_played: usize,
}

impl<C: Color> LookaheadSolver<C> {
    /// Starts a session on `board`.
    ///
    /// Fails if `max_depth` is zero or `anchor` is outside the board.
    pub fn new(board: Board<C>, max_depth: usize, anchor: Cell) -> Result<Self> {
        if max_depth == 0 {
            return Err(SolveError::InvalidDepth(max_depth));
        }
        board.check_anchor(anchor)?;
        info!(
            event = "solve_start",
            solver = "lookahead",
            rows = board.rows(),
            cols = board.cols(),
            max_depth,
        );
        Ok(LookaheadSolver {
            board,
            anchor,
            max_depth,
            memo: MemoTable::default(),
            plan: VecDeque::new(),
            plans: 0,
            moves_played: 0,
        })
    }

    /// The working board, with every move yielded so far applied.
    pub fn board(&self) -> &Board<C> {
        &self.board
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn memo(&self) -> &MemoTable<C> {
        &self.memo
    }

    /// Number of full lookahead evaluations run so far.
    pub fn plans(&self) -> usize {
        self.plans
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }
}

impl<C: Color> Iterator for LookaheadSolver<C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        if self.board.is_filled() {
            self.plan.clear();
            return None;
        }

        if self.plan.is_empty() {
            let best =
                best_color_and_path(&self.board, self.anchor, self.max_depth, &mut self.memo)?;
            self.plans += 1;
            debug!(
                event = "plan",
                score = best.score,
                path = ?best.path,
                memo_entries = self.memo.len(),
                memo_hits = self.memo.hits(),
            );
            self.plan.extend(best.path);
        }

        let color = self.plan.pop_front()?;
        let region = self.board.connected_region(self.anchor);
        self.board.apply_move(&region, color.clone());
        self.moves_played += 1;
        trace!(event = "move", index = self.moves_played, color = ?color);

        if self.board.is_filled() {
            info!(
                event = "solve_end",
                solver = "lookahead",
                cost = self.moves_played,
                plans = self.plans,
                memo_entries = self.memo.len(),
            );
        }
        Some(color)
    }
}

/// Starts a lookahead session from the top-left anchor.
pub fn solve_lookahead<C: Color>(board: &Board<C>, max_depth: usize) -> Result<LookaheadSolver<C>> {
    LookaheadSolver::new(board.clone(), max_depth, DEFAULT_ANCHOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Tile;
    use crate::error::BoardError;
    use crate::solver::Solution;
    use crate::utils::board_from_str_array;

    fn solve(rows: &[&str], depth: usize) -> Vec<Tile> {
        let board = board_from_str_array(rows).unwrap();
        solve_lookahead(&board, depth).unwrap().collect()
    }

    #[test]
    fn test_lookahead_one_move_board() {
        assert_eq!(solve(&["RR", "BR"], 1), vec![Tile::Blue]);
        assert_eq!(solve(&["RR", "BR"], 4), vec![Tile::Blue]);
    }

    #[test]
    fn test_lookahead_filled_board_yields_nothing() {
        assert!(solve(&["YY", "YY"], 3).is_empty());
        assert!(solve(&["Y"], 1).is_empty());
    }

    #[test]
    fn test_lookahead_checkerboard() {
        let board = board_from_str_array(&["RBR", "BRB", "RBR"]).unwrap();
        for depth in 1..=4 {
            let moves: Vec<Tile> = solve_lookahead(&board, depth).unwrap().collect();
            assert_eq!(moves.len(), 4, "depth {depth}");
            assert!(Solution::new(moves).solves(&board, (0, 0)));
        }
    }

    #[test]
    fn test_lookahead_greedy_tie_break_is_first_candidate() {
        // Blue and green both grow the region to 2; blue is enumerated first.
        assert_eq!(solve(&["RG", "BY"], 1), vec![Tile::Blue, Tile::Green, Tile::Yellow]);
    }

    #[test]
    fn test_lookahead_replays_whole_path() {
        let board = board_from_str_array(&["RG", "BY"]).unwrap();
        let mut solver = solve_lookahead(&board, 3).unwrap();
        let moves: Vec<Tile> = solver.by_ref().collect();
        assert_eq!(moves.len(), 3);
        assert_eq!(solver.plans(), 1);
        assert_eq!(solver.moves_played(), 3);
        assert!(solver.board().is_filled());
    }

    #[test]
    fn test_lookahead_prefers_deeper_payoff() {
        // Greedy takes the 2-cell green group; looking two plies ahead shows that
        // the single blue cell opens onto the large yellow area behind it.
        let board = board_from_str_array(&["RGGK", "BKKK", "YYYY", "YYYY"]).unwrap();
        let greedy: Vec<Tile> = solve_lookahead(&board, 1).unwrap().collect();
        assert_eq!(greedy[0], Tile::Green);

        let deep: Vec<Tile> = solve_lookahead(&board, 2).unwrap().collect();
        assert_eq!(deep[0], Tile::Blue);
        assert!(Solution::new(deep).solves(&board, (0, 0)));
    }

    #[test]
    fn test_score_paths_base_case() {
        let board = board_from_str_array(&["RRG", "BGG"]).unwrap();
        let mut memo = MemoTable::default();
        let scored = score_paths(&board, (0, 0), 2, 2, &mut memo);
        assert_eq!(
            scored,
            vec![ScoredColor {
                color: Tile::Red,
                score: 2,
                path: Vec::new()
            }]
        );
    }

    #[test]
    fn test_score_paths_one_entry_per_neighbor() {
        let board = board_from_str_array(&["RRG", "BGG"]).unwrap();
        let mut memo = MemoTable::default();
        let scored = score_paths(&board, (0, 0), 0, 1, &mut memo);
        let colors: Vec<Tile> = scored.iter().map(|entry| entry.color).collect();
        assert_eq!(colors, vec![Tile::Blue, Tile::Green]);
        assert_eq!(scored[0].score, 3);
        assert_eq!(scored[1].score, 5);
        assert_eq!(scored[1].path, vec![Tile::Green]);
    }

    #[test]
    fn test_best_color_and_path() {
        let board = board_from_str_array(&["RRG", "BGG"]).unwrap();
        let mut memo = MemoTable::default();
        let best = best_color_and_path(&board, (0, 0), 3, &mut memo).unwrap();
        // Both candidates fill the board in two moves; blue is enumerated first.
        assert_eq!(best.color, Tile::Blue);
        assert_eq!(best.path, vec![Tile::Blue, Tile::Green]);
        assert_eq!(best.score, 6);
        assert!(Solution::new(best.path).solves(&board, (0, 0)));

        let filled = board_from_str_array(&["GG"]).unwrap();
        assert!(best_color_and_path(&filled, (0, 0), 3, &mut memo).is_none());
    }

    #[test]
    fn test_memo_reuses_equivalent_states() {
        // Playing G then B and B then G reach the same canonical state.
        let board = board_from_str_array(&["RG", "BY"]).unwrap();
        let mut memo = MemoTable::default();
        score_paths(&board, (0, 0), 0, 3, &mut memo);
        assert!(memo.hits() > 0);
        assert_eq!(memo.len(), memo.misses());
    }

    #[test]
    fn test_memo_partitions_by_max_depth() {
        let board = board_from_str_array(&["RGB", "BRG", "GBR"]).unwrap();
        let mut memo = MemoTable::default();
        let shallow = score_paths(&board, (0, 0), 1, 1, &mut memo);
        let deep = score_paths(&board, (0, 0), 1, 3, &mut memo);
        assert_eq!(shallow.len(), 1);
        assert_eq!(deep.len(), 2);
    }

    #[test]
    fn test_lookahead_rejects_zero_depth() {
        let board = board_from_str_array(&["RG"]).unwrap();
        assert_eq!(solve_lookahead(&board, 0).unwrap_err(), SolveError::InvalidDepth(0));
    }

    #[test]
    fn test_lookahead_rejects_bad_anchor() {
        let board = board_from_str_array(&["RG"]).unwrap();
        assert_eq!(
            LookaheadSolver::new(board, 2, (0, 5)).unwrap_err(),
            SolveError::Board(BoardError::AnchorOutOfBounds {
                row: 0,
                col: 5,
                rows: 1,
                cols: 2
            })
        );
    }

    #[test]
    fn test_lookahead_stops_when_consumer_stops() {
        let board = board_from_str_array(&["RGBY"]).unwrap();
        let mut solver = solve_lookahead(&board, 1).unwrap();
        assert_eq!(solver.next(), Some(Tile::Green));
        assert_eq!(solver.board().to_text(), "GGBY");
    }

    #[test]
    fn test_lookahead_random_boards_terminate_and_fill() {
        for seed in 0..10 {
            let board = Board::random(7, 7, 4, seed).unwrap();
            for depth in 1..=3 {
                let moves: Vec<Tile> = solve_lookahead(&board, depth).unwrap().collect();
                assert!(
                    Solution::new(moves).solves(&board, (0, 0)),
                    "seed {seed} depth {depth}"
                );
            }
        }
    }

    #[test]
    fn test_lookahead_with_custom_anchor() {
        let board = board_from_str_array(&["RGG", "BBG", "BBB"]).unwrap();
        let moves: Vec<Tile> = LookaheadSolver::new(board.clone(), 2, (2, 2)).unwrap().collect();
        assert!(Solution::new(moves).solves(&board, (2, 2)));
    }
}
