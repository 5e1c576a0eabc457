//! Active falling piece logic

use crate::board::Board;
use crate::tetromino::{rotate_cw, Matrix, PieceType};
use rand::Rng;

/// The player-controlled falling piece: its current (possibly rotated)
/// matrix and the top-left offset of that matrix on the board.
#[derive(Debug, Clone)]
pub struct ActivePiece {
    pub piece_type: PieceType,
    pub shape: Matrix,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Spawn a random piece in canonical orientation at the top-left corner
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        Self::new(PieceType::random(rng))
    }

    /// Create a piece of a given type at the spawn position
    pub fn new(piece_type: PieceType) -> Self {
        Self {
            piece_type,
            shape: piece_type.matrix(),
            x: 0,
            y: 0,
        }
    }

    /// Try to translate by (dx, dy), reverting on collision.
    ///
    /// Used for horizontal nudges and for the gravity tick.
    pub fn try_move(&mut self, dx: i32, dy: i32, board: &Board) -> bool {
        self.x += dx;
        self.y += dy;
        if board.collides(&self.shape, self.x, self.y) {
            self.x -= dx;
            self.y -= dy;
            false
        } else {
            true
        }
    }

    /// Try a 90-degree clockwise rotation at the current offset.
    ///
    /// No kick search: the rotated matrix either fits exactly here or the
    /// rotation is rejected and the shape is left unchanged.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotated = rotate_cw(&self.shape);
        if board.collides(&rotated, self.x, self.y) {
            false
        } else {
            self.shape = rotated;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_spawn_position_is_top_left() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let piece = ActivePiece::spawn(&mut rng);
        assert_eq!((piece.x, piece.y), (0, 0));
        assert_eq!(piece.shape, piece.piece_type.matrix());
    }

    #[test]
    fn test_move_down_on_empty_board() {
        let board = Board::standard();
        let mut piece = ActivePiece::new(PieceType::T);
        assert!(piece.try_move(0, 1, &board));
        assert_eq!((piece.x, piece.y), (0, 1));
    }

    #[test]
    fn test_move_left_at_wall_is_rejected() {
        let board = Board::standard();
        // O occupies its matrix columns 0..2, so at x=0 it touches the wall
        let mut piece = ActivePiece::new(PieceType::O);
        assert!(!piece.try_move(-1, 0, &board));
        assert_eq!((piece.x, piece.y), (0, 0));
    }

    #[test]
    fn test_rejected_gravity_leaves_offset_unchanged() {
        let board = Board::new(6, 4);
        let mut piece = ActivePiece::new(PieceType::O);
        piece.y = 2; // resting on the floor
        assert!(!piece.try_move(0, 1, &board));
        assert_eq!(piece.y, 2);
    }

    #[test]
    fn test_rotate_on_open_board() {
        let board = Board::standard();
        let mut piece = ActivePiece::new(PieceType::I);
        assert!(piece.try_rotate(&board));
        // Horizontal bar now sits on matrix row 1
        assert!(piece.shape[1].iter().all(|cell| cell.is_filled()));
    }

    #[test]
    fn test_blocked_rotation_keeps_shape() {
        let mut board = Board::standard();
        // Wall off cells the horizontal bar would need but the vertical
        // bar does not occupy
        board.set(2, 1, PieceType::Z.id());
        board.set(3, 1, PieceType::Z.id());
        let mut piece = ActivePiece::new(PieceType::I);
        let before = piece.shape.clone();
        assert!(!board.collides(&piece.shape, piece.x, piece.y));
        assert!(!piece.try_rotate(&board));
        assert_eq!(piece.shape, before);
    }
}
