use std::ops::{Index, IndexMut};

use crate::{
    color::Color,
    piece::{Piece, PieceKind},
    square::Square,
};

/// The 64 squares and whatever stands on them. The board knows nothing about
/// turns or rights; see [`crate::position::Position`] for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([Option<Piece>; 64]);

impl Board {
    pub fn empty() -> Self {
        Board([None; 64])
    }
    pub fn starting_position() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (column, kind) in (0..).zip(PieceKind::STARTING_CONFIGURATION) {
                board[Square::new(color.home_row(), column)] = Some(Piece::new(color, kind));
                board[Square::new(color.pawn_start_row(), column)] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        board
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self[square].map(|piece| (square, piece)))
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }
    /// Full scan for the kings of `color`. Positions normally cache the king
    /// square; this is the slow path used to (re)build and verify that cache.
    pub fn kings(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, piece)| piece.is(color, PieceKind::King))
            .map(|(square, _)| square)
    }
    pub fn is_empty(&self, square: Square) -> bool {
        self[square].is_none()
    }
    /// Moves whatever stands on `origin` to `destination`, returning what was
    /// on `destination` before.
    pub fn relocate(&mut self, origin: Square, destination: Square) -> Option<Piece> {
        let piece = self[origin].take();
        debug_assert!(piece.is_some(), "nothing to move on {origin}");
        std::mem::replace(&mut self[destination], piece)
    }
}
impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.index()]
    }
}
impl IndexMut<Square> for Board {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}
