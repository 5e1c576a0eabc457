//! Game board representation and collision detection

use crate::tetromino::{Matrix, PieceId};

/// Pixel size of one grid cell in the original canvas layout
pub const GRID_SIZE: usize = 20;
/// Canvas dimensions the board geometry derives from
pub const CANVAS_WIDTH: usize = 240;
pub const CANVAS_HEIGHT: usize = 400;

/// Standard board dimensions in cells
pub const BOARD_WIDTH: usize = CANVAS_WIDTH / GRID_SIZE;
pub const BOARD_HEIGHT: usize = CANVAS_HEIGHT / GRID_SIZE;

/// The grid of settled cells.
///
/// Stored as `[row][col]` with row 0 at the top; dimensions are fixed at
/// creation and only cell contents mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Vec<PieceId>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// Create an empty board with the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![PieceId::EMPTY; width]; height],
        }
    }

    /// Create an empty board with the standard dimensions
    pub fn standard() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at (x, y).
    ///
    /// Returns None out of bounds. Normal flow never reaches that branch:
    /// every placement is validated through `collides` first.
    pub fn get(&self, x: i32, y: i32) -> Option<PieceId> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get(y as usize)?.get(x as usize).copied()
    }

    /// Set a cell. Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, id: PieceId) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.cells[y as usize][x as usize] = id;
        true
    }

    /// True iff every cell in row y is filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.cells[y].iter().all(|cell| cell.is_filled())
    }

    /// Remove row y, shift every row above it down by one, and insert a
    /// fresh empty row at the top
    pub fn clear_row(&mut self, y: usize) {
        self.cells.remove(y);
        self.cells.insert(0, vec![PieceId::EMPTY; self.width]);
    }

    /// Clear every full row and return how many were removed.
    ///
    /// Scans bottom-up. After a clear the same index is re-examined: the row
    /// that shifted down may itself be full, so one lock can clear several
    /// non-adjacent rows.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.height - 1;
        loop {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared += 1;
            } else if y == 0 {
                break;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Write a shape's occupied cells onto the board at offset (x, y).
    ///
    /// Merged cells are indistinguishable from any other settled cell.
    pub fn merge(&mut self, shape: &Matrix, x: i32, y: i32) {
        for (sy, row) in shape.iter().enumerate() {
            for (sx, &cell) in row.iter().enumerate() {
                if cell.is_filled() {
                    self.set(x + sx as i32, y + sy as i32, cell);
                }
            }
        }
    }

    /// Check a shape placed at offset (x, y) against bounds and settled
    /// cells.
    ///
    /// Collision means some occupied sub-cell breaches a side wall, the
    /// floor, or overlaps a filled cell. Rows above the top are legal on
    /// purpose: pieces may carry cells above the ceiling while spawning or
    /// rotating near it, and only the overlap check is skipped for them.
    pub fn collides(&self, shape: &Matrix, x: i32, y: i32) -> bool {
        for (sy, row) in shape.iter().enumerate() {
            for (sx, &cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let bx = x + sx as i32;
                let by = y + sy as i32;
                if bx < 0 || bx >= self.width as i32 || by >= self.height as i32 {
                    return true;
                }
                if by >= 0 && self.cells[by as usize][bx as usize].is_filled() {
                    return true;
                }
            }
        }
        false
    }

    /// True iff no cell is filled
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Rows from top to bottom, for rendering
    pub fn rows(&self) -> impl Iterator<Item = &[PieceId]> {
        self.cells.iter().map(|row| row.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::PieceType;

    fn fill_row(board: &mut Board, y: usize, skip: Option<usize>) {
        for x in 0..board.width() {
            if Some(x) != skip {
                board.set(x as i32, y as i32, PieceType::O.id());
            }
        }
    }

    fn occupied_count(board: &Board) -> usize {
        board
            .rows()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_filled())
            .count()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::standard();
        assert!(board.is_empty());
        assert_eq!(board.width(), 12);
        assert_eq!(board.height(), 20);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::standard();
        assert!(board.set(5, 5, PieceType::T.id()));
        assert_eq!(board.get(5, 5), Some(PieceType::T.id()));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::standard();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(board.width() as i32, 0), None);
        assert_eq!(board.get(0, board.height() as i32), None);
    }

    #[test]
    fn test_is_row_full() {
        let mut board = Board::new(4, 3);
        fill_row(&mut board, 2, Some(1));
        assert!(!board.is_row_full(2));
        board.set(1, 2, PieceType::I.id());
        assert!(board.is_row_full(2));
        assert!(!board.is_row_full(0));
    }

    #[test]
    fn test_clear_row_shifts_down() {
        let mut board = Board::new(4, 3);
        fill_row(&mut board, 2, None);
        board.set(0, 1, PieceType::Z.id());

        let before = occupied_count(&board);
        board.clear_row(2);
        assert_eq!(occupied_count(&board), before - 4);
        // The lone block from row 1 lands on row 2, top row is empty
        assert_eq!(board.get(0, 2), Some(PieceType::Z.id()));
        assert!(board.rows().next().unwrap().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_clear_full_rows_rechecks_shifted_index() {
        let mut board = Board::new(4, 4);
        // Two full rows separated by a partial one; after clearing row 3 the
        // partial row shifts into index 3 and row 1's full line must still
        // be caught at its new index
        fill_row(&mut board, 1, None);
        fill_row(&mut board, 2, Some(0));
        fill_row(&mut board, 3, None);

        assert_eq!(board.clear_full_rows(), 2);
        // Only the partial row survives, at the bottom
        assert_eq!(occupied_count(&board), 3);
        assert!(!board.is_row_full(3));
        assert_eq!(board.get(0, 3), Some(PieceId::EMPTY));
    }

    #[test]
    fn test_merge_writes_exactly_occupied_cells() {
        let mut board = Board::standard();
        let shape = PieceType::T.matrix();
        board.merge(&shape, 3, 4);

        // T canonical: row 1 full, row 2 center only
        assert_eq!(board.get(3, 5), Some(PieceType::T.id()));
        assert_eq!(board.get(4, 5), Some(PieceType::T.id()));
        assert_eq!(board.get(5, 5), Some(PieceType::T.id()));
        assert_eq!(board.get(4, 6), Some(PieceType::T.id()));
        assert_eq!(occupied_count(&board), 4);
        // Empty sub-cells did not touch the board
        assert_eq!(board.get(3, 4), Some(PieceId::EMPTY));
    }

    #[test]
    fn test_collides_side_and_floor_breaches() {
        let board = Board::standard();
        let shape = PieceType::O.matrix();

        assert!(board.collides(&shape, -1, 0));
        assert!(board.collides(&shape, board.width() as i32 - 1, 0));
        assert!(board.collides(&shape, 0, board.height() as i32 - 1));
        assert!(!board.collides(&shape, 0, 0));
        assert!(!board.collides(&shape, board.width() as i32 - 2, 0));
    }

    #[test]
    fn test_collides_stack_overlap() {
        let mut board = Board::standard();
        board.set(1, 1, PieceType::S.id());
        let shape = PieceType::O.matrix();
        assert!(board.collides(&shape, 0, 0));
        assert!(!board.collides(&shape, 2, 0));
    }

    #[test]
    fn test_cells_above_top_are_legal() {
        let board = Board::standard();
        let shape = PieceType::O.matrix();
        // Partially above the ceiling: no collision as long as the columns
        // and the in-board cells are clear
        assert!(!board.collides(&shape, 0, -1));
        assert!(!board.collides(&shape, 0, -2));
    }
}
