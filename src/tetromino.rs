//! Tetromino definitions and matrix rotation
//!
//! Pieces are small occupancy matrices. Every filled cell carries the piece
//! type's identifier, which doubles as the index into the color table.

use rand::Rng;
use ratatui::style::Color;

/// A single cell of the board or of a piece matrix.
///
/// 0 is the empty sentinel; 1..=7 tag a piece type and select its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceId(u8);

impl PieceId {
    pub const EMPTY: PieceId = PieceId(0);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_filled(self) -> bool {
        self.0 != 0
    }

    /// Color for a filled cell, None for the empty sentinel
    pub fn color(self) -> Option<Color> {
        match self.0 {
            1 => Some(Color::Rgb(0xFF, 0x0D, 0x72)), // T
            2 => Some(Color::Rgb(0x0D, 0xC2, 0xFF)), // I
            3 => Some(Color::Rgb(0x0D, 0xFF, 0x72)), // J
            4 => Some(Color::Rgb(0xF5, 0x38, 0xFF)), // L
            5 => Some(Color::Rgb(0xFF, 0x8E, 0x0D)), // O
            6 => Some(Color::Rgb(0xFF, 0xE1, 0x38)), // S
            7 => Some(Color::Rgb(0x38, 0xFF, 0xE1)), // Z
            _ => None,
        }
    }
}

/// A rectangular occupancy matrix, indexed `[row][col]` from the top-left
pub type Matrix = Vec<Vec<PieceId>>;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    T,
    I,
    J,
    L,
    O,
    S,
    Z,
}

impl PieceType {
    /// All types, in identifier order
    pub fn all() -> [PieceType; 7] {
        [
            PieceType::T,
            PieceType::I,
            PieceType::J,
            PieceType::L,
            PieceType::O,
            PieceType::S,
            PieceType::Z,
        ]
    }

    /// The fixed cell identifier for this type (1..=7)
    pub fn id(self) -> PieceId {
        match self {
            PieceType::T => PieceId(1),
            PieceType::I => PieceId(2),
            PieceType::J => PieceId(3),
            PieceType::L => PieceId(4),
            PieceType::O => PieceId(5),
            PieceType::S => PieceId(6),
            PieceType::Z => PieceId(7),
        }
    }

    pub fn color(self) -> Color {
        self.id().color().unwrap_or(Color::White)
    }

    /// Pick a type uniformly at random
    pub fn random<R: Rng>(rng: &mut R) -> PieceType {
        Self::all()[rng.gen_range(0..7)]
    }

    /// The canonical (spawn orientation) matrix for this type
    pub fn matrix(self) -> Matrix {
        let rows: &[&[u8]] = match self {
            PieceType::T => &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]],
            PieceType::I => &[&[0, 2, 0, 0], &[0, 2, 0, 0], &[0, 2, 0, 0], &[0, 2, 0, 0]],
            PieceType::J => &[&[0, 0, 0], &[3, 3, 3], &[0, 0, 3]],
            PieceType::L => &[&[0, 0, 0], &[4, 4, 4], &[4, 0, 0]],
            PieceType::O => &[&[5, 5], &[5, 5]],
            PieceType::S => &[&[0, 6, 6], &[6, 6, 0], &[0, 0, 0]],
            PieceType::Z => &[&[7, 7, 0], &[0, 7, 7], &[0, 0, 0]],
        };
        rows.iter()
            .map(|row| row.iter().map(|&v| PieceId(v)).collect())
            .collect()
    }
}

/// Rotate a matrix 90 degrees clockwise.
///
/// For an RxC input, output row `j` is input column `j` read bottom to top.
/// Returns a new matrix; the input is never mutated.
pub fn rotate_cw(shape: &Matrix) -> Matrix {
    let rows = shape.len();
    let cols = shape.first().map_or(0, |row| row.len());
    (0..cols)
        .map(|col| (0..rows).rev().map(|row| shape[row][col]).collect())
        .collect()
}
