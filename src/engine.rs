//! Core board model for the color-fill puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Color`: The bound every cell token satisfies (equality and hashing, nothing more).
//! - `Tile`: The concrete palette used by the binaries and text boards.
//! - `Board`: A rectangular grid of tokens with region finding, recoloring,
//!   fill testing and canonicalization.
//! - `Region`: The connected same-colored area containing the anchor cell.
//! - `StateKey`: A hashable board form with the anchor region neutralized.
use crate::error::BoardError;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

/// A `(row, column)` coordinate on the board.
pub type Cell = (usize, usize);

/// The default anchor: the top-left corner.
pub const DEFAULT_ANCHOR: Cell = (0, 0);

/// Anything that can sit in a board cell.
///
/// The solvers only ever compare tokens for equality and hash them, so any
/// cloneable, hashable type works: palette enums, chars, packed RGB values.
pub trait Color: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Color for T {}

/// Represents the palette of a color-fill board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tile {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    White,
    Black,
}

impl Tile {
    /// Every palette entry, in a fixed order.
    pub const ALL: [Tile; 8] = [
        Tile::Red,
        Tile::Green,
        Tile::Blue,
        Tile::Yellow,
        Tile::Orange,
        Tile::Purple,
        Tile::White,
        Tile::Black,
    ];

    /// Converts the tile to its character representation.
    ///
    /// This is the format used by text board files and by solution output.
    ///
    /// # Examples
    ///
    /// ```
    /// use colorfill_solver::engine::Tile;
    /// assert_eq!(Tile::Red.to_char(), 'R');
    /// assert_eq!(Tile::Black.to_char(), 'K');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Tile::Red => 'R',
            Tile::Green => 'G',
            Tile::Blue => 'B',
            Tile::Yellow => 'Y',
            Tile::Orange => 'O',
            Tile::Purple => 'P',
            Tile::White => 'W',
            Tile::Black => 'K',
        }
    }

    /// Parses a tile from its character representation, if it names one.
    pub fn from_char(ch: char) -> Option<Tile> {
        Tile::ALL.into_iter().find(|tile| tile.to_char() == ch)
    }

    /// Returns the ANSI background color code string for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Tile::Red => "41",
            Tile::Green => "42",
            Tile::Yellow => "43",
            Tile::Blue => "44",
            Tile::Purple => "45",
            Tile::Orange => "48;5;208",
            Tile::White => "47",
            Tile::Black => "40",
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// The maximal 4-connected set of same-colored cells containing an anchor.
///
/// A region is always derived from a specific board state and is only meaningful
/// for that state. Cells are kept sorted row-major so iteration order is stable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    anchor: Cell,
    cells: Vec<Cell>,
}

impl Region {
    /// The anchor cell this region was grown from.
    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    /// The member cells, sorted row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of member cells. Never zero.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a region built by `Board::connected_region`.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks membership by binary search over the sorted cells.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }
}

/// Canonical search state of a board.
///
/// Cells of the anchor region are stored as `None`, every other cell as
/// `Some(color)`. Two boards that differ only in the color currently held by the
/// anchor region therefore share a key. The `None` sentinel can never collide with
/// a real palette entry, whatever the color type is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey<C> {
    cells: Box<[Option<C>]>,
}

/// Represents the game board as a rectangular grid of color tokens.
///
/// Cloning a board produces a fully independent copy; solvers clone before
/// applying a move on any branch so siblings never share state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board<C = Tile> {
    rows: usize,
    cols: usize,
    cells: Vec<C>,
}

impl<C: Color> Board<C> {
    /// Creates a board from a list of rows.
    ///
    /// # Arguments
    /// * `grid`: The rows of the board, top to bottom.
    ///
    /// # Returns
    /// * `Ok(Board)` if the grid has at least one row and one column and every row
    ///   has the same length as the first.
    /// * `Err(BoardError::Empty)` if there are no rows or the first row is empty.
    /// * `Err(BoardError::Ragged { .. })` for the first row whose length differs.
    ///
    /// # Examples
    /// ```
    /// use colorfill_solver::engine::Board;
    /// let board = Board::new(vec![vec!['R', 'R'], vec!['B', 'R']]).unwrap();
    /// assert_eq!(board.rows(), 2);
    /// assert_eq!(board.cols(), 2);
    ///
    /// assert!(Board::new(vec![vec!['R', 'R'], vec!['B']]).is_err());
    /// assert!(Board::<char>::new(vec![]).is_err());
    /// ```
    pub fn new(grid: Vec<Vec<C>>) -> Result<Self, BoardError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (r, row) in grid.into_iter().enumerate() {
            if row.len() != cols {
                return Err(BoardError::Ragged {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Board { rows, cols, cells })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (`rows * cols`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the token at the specified row (`r`) and column (`c`).
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board dimensions.
    pub fn get(&self, r: usize, c: usize) -> &C {
        assert!(r < self.rows && c < self.cols, "cell ({r}, {c}) out of bounds");
        &self.cells[r * self.cols + c]
    }

    /// Iterates over the rows of the board as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[C]> + '_ {
        self.cells.chunks(self.cols)
    }

    /// Checks that `anchor` lies inside the grid.
    pub fn check_anchor(&self, anchor: Cell) -> Result<(), BoardError> {
        if anchor.0 < self.rows && anchor.1 < self.cols {
            Ok(())
        } else {
            Err(BoardError::AnchorOutOfBounds {
                row: anchor.0,
                col: anchor.1,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Orthogonal neighbors of `cell` that lie inside the grid (up, down, left, right).
    fn orthogonal_neighbors(&self, (r, c): Cell) -> impl Iterator<Item = Cell> {
        let (rows, cols) = (self.rows, self.cols);
        let dr = [-1isize, 1, 0, 0];
        let dc = [0isize, 0, -1, 1];
        (0..4).filter_map(move |i| {
            let nr = r as isize + dr[i];
            let nc = c as isize + dc[i];
            if nr >= 0 && nr < rows as isize && nc >= 0 && nc < cols as isize {
                Some((nr as usize, nc as usize))
            } else {
                None
            }
        })
    }

    /// Finds the connected region of cells sharing the anchor's color.
    ///
    /// Cells are connected if they are adjacent horizontally or vertically (not
    /// diagonally). This method uses a Breadth-First Search (BFS) and visits every
    /// cell at most once.
    ///
    /// # Arguments
    /// * `anchor`: The `(row, column)` the region is grown from.
    ///
    /// # Returns
    /// A `Region` whose cells are sorted row-major. It always contains the anchor.
    ///
    /// # Panics
    /// Panics if `anchor` is outside the board.
    ///
    /// # Examples
    /// ```
    /// use colorfill_solver::engine::Board;
    /// let board = Board::new(vec![vec!['R', 'R'], vec!['B', 'R']]).unwrap();
    /// let region = board.connected_region((0, 0));
    /// assert_eq!(region.cells(), &[(0, 0), (0, 1), (1, 1)]);
    /// ```
    pub fn connected_region(&self, anchor: Cell) -> Region {
        let color = self.get(anchor.0, anchor.1);

        let mut cells = Vec::new();
        let mut q = VecDeque::new();
        let mut visited = vec![false; self.cells.len()];

        q.push_back(anchor);
        visited[anchor.0 * self.cols + anchor.1] = true;

        while let Some(cell) = q.pop_front() {
            cells.push(cell);
            for (nr, nc) in self.orthogonal_neighbors(cell) {
                let idx = nr * self.cols + nc;
                if !visited[idx] && self.cells[idx] == *color {
                    visited[idx] = true;
                    q.push_back((nr, nc));
                }
            }
        }

        cells.sort_unstable();
        Region { anchor, cells }
    }

    /// Lazily enumerates the distinct colors bordering `region`.
    ///
    /// Every color found on a cell orthogonally adjacent to, but outside of, the
    /// region is yielded exactly once. The region's own color is never yielded.
    /// Order follows the region's sorted cells and then up, down, left, right,
    /// so it is deterministic for a given board.
    ///
    /// # Examples
    /// ```
    /// use colorfill_solver::engine::Board;
    /// let board = Board::new(vec![vec!['R', 'G'], vec!['B', 'G']]).unwrap();
    /// let region = board.connected_region((0, 0));
    /// let colors: Vec<char> = board.neighboring_colors(&region).copied().collect();
    /// assert_eq!(colors, vec!['B', 'G']);
    /// ```
    pub fn neighboring_colors<'a>(&'a self, region: &'a Region) -> NeighboringColors<'a, C> {
        let mut in_region = vec![false; self.cells.len()];
        for &(r, c) in region.cells() {
            in_region[r * self.cols + c] = true;
        }
        let (ar, ac) = region.anchor();
        let mut seen = HashSet::new();
        seen.insert(self.get(ar, ac));

        NeighboringColors {
            board: self,
            region,
            in_region,
            seen,
            next_cell: 0,
            pending: VecDeque::new(),
        }
    }

    /// Returns `true` iff every cell holds the same token.
    pub fn is_filled(&self) -> bool {
        let first = &self.cells[0];
        self.cells.iter().all(|cell| cell == first)
    }

    /// Overwrites every cell of `region` with `color`, in place.
    ///
    /// The region is not updated: merging with newly adjacent cells shows up
    /// when the region is next recomputed.
    pub fn apply_move(&mut self, region: &Region, color: C) {
        for &(r, c) in region.cells() {
            self.cells[r * self.cols + c] = color.clone();
        }
    }

    /// Returns an independent copy of the board with `color` applied to `region`.
    pub fn with_move(&self, region: &Region, color: C) -> Board<C> {
        let mut next = self.clone();
        next.apply_move(region, color);
        next
    }

    /// Computes the canonical key of this board for the given anchor.
    pub fn canonical_key(&self, anchor: Cell) -> StateKey<C> {
        self.canonical_key_with(&self.connected_region(anchor))
    }

    /// Computes the canonical key using an already computed anchor region.
    ///
    /// `region` must be the current anchor region of this board.
    pub fn canonical_key_with(&self, region: &Region) -> StateKey<C> {
        let mut cells: Box<[Option<C>]> = self.cells.iter().cloned().map(Some).collect();
        for &(r, c) in region.cells() {
            cells[r * self.cols + c] = None;
        }
        StateKey { cells }
    }

    /// Counts the distinct tokens on the board.
    pub fn distinct_colors(&self) -> usize {
        self.cells.iter().collect::<HashSet<_>>().len()
    }
}

/// Iterator returned by [`Board::neighboring_colors`].
pub struct NeighboringColors<'a, C> {
    board: &'a Board<C>,
    region: &'a Region,
    in_region: Vec<bool>,
    seen: HashSet<&'a C>,
    next_cell: usize,
    pending: VecDeque<&'a C>,
}

impl<'a, C: Color> Iterator for NeighboringColors<'a, C> {
    type Item = &'a C;

    fn next(&mut self) -> Option<&'a C> {
        loop {
            if let Some(color) = self.pending.pop_front() {
                return Some(color);
            }

            let &cell = self.region.cells().get(self.next_cell)?;
            self.next_cell += 1;

            let board = self.board;
            for (nr, nc) in board.orthogonal_neighbors(cell) {
                let idx = nr * board.cols + nc;
                if !self.in_region[idx] && self.seen.insert(&board.cells[idx]) {
                    self.pending.push_back(&board.cells[idx]);
                }
            }
        }
    }
}

impl Board<Tile> {
    /// Creates a board with random tiles drawn from the first `colors` palette entries.
    ///
    /// Boards are reproducible: the same arguments always produce the same board.
    /// `colors` is clamped to `1..=Tile::ALL.len()`.
    ///
    /// # Returns
    /// `Err(BoardError::Empty)` if `rows` or `cols` is zero.
    pub fn random(rows: usize, cols: usize, colors: usize, seed: u64) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::Empty);
        }
        let colors = colors.clamp(1, Tile::ALL.len());
        let mut rng = SmallRng::seed_from_u64(seed);
        let cells = (0..rows * cols)
            .map(|_| Tile::ALL[rng.gen_range(0..colors)])
            .collect();
        Ok(Board { rows, cols, cells })
    }

    /// Renders the board as text, one character per cell and one line per row.
    pub fn to_text(&self) -> String {
        self.iter_rows()
            .map(|row| row.iter().map(Tile::to_char).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Generates a terminal rendering of the board with an optional highlighted region.
    ///
    /// Each cell is drawn as a two-character block using ANSI background colors.
    /// Cells belonging to `highlight` are drawn as `..` instead of blanks.
    pub fn to_string_with_highlight(&self, highlight: Option<&Region>) -> String {
        let mut output = String::new();
        for (r, row) in self.iter_rows().enumerate() {
            for (c, tile) in row.iter().enumerate() {
                let is_highlight = highlight.map_or(false, |region| region.contains((r, c)));
                let content = if is_highlight { ".." } else { "  " };
                output.push_str(&format!("\x1b[{}m{}\x1b[m", tile.to_ansi_color_code(), content));
            }
            if r < self.rows - 1 {
                output.push('\n');
            }
        }
        output
    }
}

impl fmt::Display for Board<Tile> {
    /// Formats the board for display using `to_string_with_highlight(None)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn board(rows: &[&str]) -> Board {
        board_from_str_array(rows).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_and_ragged() {
        assert_eq!(Board::<char>::new(vec![]), Err(BoardError::Empty));
        assert_eq!(Board::<char>::new(vec![vec![]]), Err(BoardError::Empty));
        assert_eq!(
            Board::new(vec![vec!['R', 'G'], vec!['B']]),
            Err(BoardError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_tile_char_round_trip_covers_palette() {
        for tile in Tile::ALL {
            assert_eq!(Tile::from_char(tile.to_char()), Some(tile));
        }
        assert_eq!(Tile::from_char('x'), None);
    }

    #[test]
    fn test_single_cell_board() {
        let b = board(&["R"]);
        assert!(b.is_filled());
        let region = b.connected_region((0, 0));
        assert_eq!(region.len(), 1);
        assert_eq!(b.neighboring_colors(&region).count(), 0);
    }

    #[test]
    fn test_connected_region_simple() {
        let b = board(&["RR", "BR"]);
        let region = b.connected_region((0, 0));
        assert_eq!(region.cells(), &[(0, 0), (0, 1), (1, 1)]);
        assert!(region.contains((1, 1)));
        assert!(!region.contains((1, 0)));
    }

    #[test]
    fn test_connected_region_ignores_diagonals() {
        let b = board(&["RB", "BR"]);
        let region = b.connected_region((0, 0));
        assert_eq!(region.cells(), &[(0, 0)]);
    }

    #[test]
    fn test_connected_region_is_idempotent_and_uniform() {
        let b = board(&["RRGB", "GRRB", "BBRG", "RGRR"]);
        let first = b.connected_region((0, 0));
        let second = b.connected_region((0, 0));
        assert_eq!(first, second);
        for &(r, c) in first.cells() {
            assert_eq!(*b.get(r, c), Tile::Red);
        }
        assert_eq!(first.cells(), &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2), (3, 2), (3, 3)]);
    }

    #[test]
    fn test_connected_region_from_other_anchor() {
        let b = board(&["RRG", "GGG"]);
        let region = b.connected_region((1, 2));
        assert_eq!(region.cells(), &[(0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_neighboring_colors_distinct_and_excludes_own() {
        let b = board(&["RGB", "GRY", "BYR"]);
        let region = b.connected_region((0, 0));
        let colors: Vec<Tile> = b.neighboring_colors(&region).copied().collect();
        assert_eq!(colors, vec![Tile::Green]);

        let b = board(&["RRB", "RGY", "BYR"]);
        let region = b.connected_region((0, 0));
        let colors: Vec<Tile> = b.neighboring_colors(&region).copied().collect();
        assert_eq!(colors, vec![Tile::Green, Tile::Blue]);
    }

    #[test]
    fn test_neighboring_colors_is_restartable() {
        let b = board(&["RGB", "YRR", "BPR"]);
        let region = b.connected_region((0, 0));
        let first: Vec<Tile> = b.neighboring_colors(&region).copied().collect();
        let second: Vec<Tile> = b.neighboring_colors(&region).copied().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![Tile::Yellow, Tile::Green]);
    }

    #[test]
    fn test_is_filled_matches_distinct_colors() {
        for rows in [&["RR", "RR"][..], &["RR", "RB"][..], &["GGG"][..], &["G", "B"][..]] {
            let b = board(rows);
            assert_eq!(b.is_filled(), b.distinct_colors() == 1);
        }
    }

    #[test]
    fn test_apply_move_merges_region() {
        let mut b = board(&["RR", "BR"]);
        let before = b.connected_region((0, 0));
        b.apply_move(&before, Tile::Blue);
        let after = b.connected_region((0, 0));
        assert!(before.cells().iter().all(|&cell| after.contains(cell)));
        assert_eq!(after.len(), 4);
        assert!(b.is_filled());
    }

    #[test]
    fn test_with_move_leaves_original_untouched() {
        let b = board(&["RG", "GG"]);
        let region = b.connected_region((0, 0));
        let next = b.with_move(&region, Tile::Green);
        assert!(next.is_filled());
        assert_eq!(*b.get(0, 0), Tile::Red);
    }

    #[test]
    fn test_canonical_key_ignores_anchor_color() {
        let a = board(&["RRG", "BGG", "YYB"]);
        let b = board(&["PPG", "BGG", "YYB"]);
        assert_eq!(a.canonical_key((0, 0)), b.canonical_key((0, 0)));

        let c = board(&["RRG", "BGG", "YYR"]);
        assert_ne!(a.canonical_key((0, 0)), c.canonical_key((0, 0)));
    }

    #[test]
    fn test_canonical_key_distinguishes_region_shape() {
        let a = board(&["RRG", "GGG"]);
        let b = board(&["RGG", "GGG"]);
        assert_ne!(a.canonical_key((0, 0)), b.canonical_key((0, 0)));
    }

    #[test]
    fn test_check_anchor() {
        let b = board(&["RG", "GG"]);
        assert!(b.check_anchor((1, 1)).is_ok());
        assert_eq!(
            b.check_anchor((2, 0)),
            Err(BoardError::AnchorOutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 2
            })
        );
    }

    #[test]
    fn test_random_board_determinism() {
        let a = Board::random(6, 7, 4, 42).unwrap();
        let b = Board::random(6, 7, 4, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rows(), 6);
        assert_eq!(a.cols(), 7);
        assert!(a.distinct_colors() <= 4);
        assert!(Board::random(0, 3, 4, 1).is_err());
    }

    #[test]
    fn test_to_text() {
        let b = board(&["RGB", "YOK"]);
        assert_eq!(b.to_text(), "RGB\nYOK");
    }

    #[test]
    fn test_display_highlights_region() {
        let b = board(&["RR", "BR"]);
        let region = b.connected_region((0, 0));
        let rendered = b.to_string_with_highlight(Some(&region));
        assert_eq!(rendered.matches("..").count(), 3);
        assert_eq!(rendered.lines().count(), 2);
        assert_eq!(format!("{}", b).matches("..").count(), 0);
    }
}
