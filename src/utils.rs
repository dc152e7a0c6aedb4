use crate::engine::{Board, Tile};
use crate::error::BoardError;

/// Parses an array of string slices into a `Board` of palette tiles.
///
/// Each string slice in the input array represents a row on the board, starting from row 0.
/// Every row must have the same number of characters.
///
/// Valid characters for tiles are:
/// - 'R': `Tile::Red`
/// - 'G': `Tile::Green`
/// - 'B': `Tile::Blue`
/// - 'Y': `Tile::Yellow`
/// - 'O': `Tile::Orange`
/// - 'P': `Tile::Purple`
/// - 'W': `Tile::White`
/// - 'K': `Tile::Black`
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(BoardError::UnknownColor { .. })` for the first unrecognized character.
/// * `Err(BoardError::Empty)` or `Err(BoardError::Ragged { .. })` if the rows do not
///   form a non-empty rectangle.
///
/// # Examples
/// ```
/// use colorfill_solver::utils::board_from_str_array;
/// use colorfill_solver::engine::Tile;
///
/// let board = board_from_str_array(&["RGY", "BOP"]).unwrap();
/// assert_eq!(*board.get(0, 2), Tile::Yellow);
/// assert_eq!(*board.get(1, 1), Tile::Orange);
///
/// assert!(board_from_str_array(&["RXB"]).is_err());
/// assert!(board_from_str_array(&["RG", "B"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, BoardError> {
    let grid = s
        .iter()
        .enumerate()
        .map(|(r, row_str)| {
            row_str
                .chars()
                .enumerate()
                .map(|(c, ch)| {
                    Tile::from_char(ch).ok_or(BoardError::UnknownColor { ch, row: r, col: c })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    Board::new(grid)
}

/// Parses a board from file contents.
///
/// Lines are trimmed and blank lines are skipped, so trailing newlines and
/// indentation in hand-written board files are harmless.
pub fn board_from_text(text: &str) -> Result<Board, BoardError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    board_from_str_array(&lines)
}

/// Joins a move sequence into its compact letter form, e.g. `"BGR"`.
pub fn moves_to_string(moves: &[Tile]) -> String {
    moves.iter().map(Tile::to_char).collect()
}
