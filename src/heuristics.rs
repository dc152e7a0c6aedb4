use crate::engine::{Board, Cell, Color, Region};

/// Estimates the work left on a board: the number of cells outside the anchor region.
///
/// A larger anchor region means a smaller estimate. This is the ordering heuristic
/// for the best-first solver; it is not admissible (one move can absorb many cells),
/// so it only gives a reasonably well-ordered exploration, not an optimality proof.
///
/// # Examples
/// ```
/// use colorfill_solver::engine::Board;
/// use colorfill_solver::heuristics::remaining_cells;
/// let board = Board::new(vec![vec!['R', 'R'], vec!['B', 'R']]).unwrap();
/// assert_eq!(remaining_cells(&board, (0, 0)), 1);
/// ```
pub fn remaining_cells<C: Color>(board: &Board<C>, anchor: Cell) -> usize {
    remaining_cells_for(board, &board.connected_region(anchor))
}

/// Same as [`remaining_cells`] with the anchor region already computed.
pub fn remaining_cells_for<C: Color>(board: &Board<C>, region: &Region) -> usize {
    board.cell_count() - region.len()
}

/// Payoff of a board state for the lookahead solver: the size of the anchor region.
pub fn region_score(region: &Region) -> usize {
    region.len()
}

/// Calculates the number of distinct colors outside the anchor region.
///
/// Every one of them needs at least one more move, so this is a lower bound on the
/// moves still required.
pub fn count_unabsorbed_colors<C: Color>(board: &Board<C>, region: &Region) -> usize {
    let mut colors: Vec<&C> = Vec::new();
    for (r, row) in board.iter_rows().enumerate() {
        for (c, color) in row.iter().enumerate() {
            if !colors.contains(&color) && !region.contains((r, c)) {
                colors.push(color);
            }
        }
    }
    colors.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    #[test]
    fn test_remaining_cells() {
        let board = board_from_str_array(&["RRG", "BRG", "BBB"]).unwrap();
        assert_eq!(remaining_cells(&board, (0, 0)), 6);
        assert_eq!(remaining_cells(&board, (2, 2)), 5);
    }

    #[test]
    fn test_remaining_cells_filled_board_is_zero() {
        let board = board_from_str_array(&["GG", "GG"]).unwrap();
        assert_eq!(remaining_cells(&board, (0, 0)), 0);
    }

    #[test]
    fn test_region_score() {
        let board = board_from_str_array(&["RRG", "BRG"]).unwrap();
        assert_eq!(region_score(&board.connected_region((0, 0))), 3);
    }

    #[test]
    fn test_count_unabsorbed_colors() {
        let board = board_from_str_array(&["RRG", "BRG", "BBY"]).unwrap();
        let region = board.connected_region((0, 0));
        assert_eq!(count_unabsorbed_colors(&board, &region), 3);

        let filled = board_from_str_array(&["YY"]).unwrap();
        let region = filled.connected_region((0, 0));
        assert_eq!(count_unabsorbed_colors(&filled, &region), 0);
    }

    #[test]
    fn test_count_unabsorbed_colors_includes_detached_anchor_color() {
        // The red cell at (2, 2) is outside the region, so red is needed again later.
        let board = board_from_str_array(&["RGB", "GBG", "BGR"]).unwrap();
        let region = board.connected_region((0, 0));
        assert_eq!(count_unabsorbed_colors(&board, &region), 3);
    }
}
