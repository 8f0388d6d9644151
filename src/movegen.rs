//! Geometric move generation.
//!
//! Everything here is pseudo-legal: destinations respect movement geometry,
//! obstruction and capture rules, but whether the mover's king ends up in
//! check is left to [`crate::attacks`]. Castling and en passant are handled by
//! [`crate::special`].

use crate::{
    board::Board,
    color::Color,
    piece::PieceKind,
    position::Position,
    square::{Square, Vector},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Squares the piece may move to.
    Moves,
    /// Squares the piece could capture on if an enemy stood there. Pawns
    /// attack both forward diagonals whatever occupies them and never attack
    /// by pushing; squares held by friendly pieces count as attacked
    /// (defended).
    Attacks,
}

/// Squares the piece on `origin` can geometrically reach.
///
/// # Panics
///
/// Panics if `origin` is empty.
pub fn pseudo_legal_destinations(
    position: &Position,
    origin: Square,
) -> impl Iterator<Item = Square> + '_ {
    destinations(position.board(), origin, Mode::Moves)
}

pub fn destinations(
    board: &Board,
    origin: Square,
    mode: Mode,
) -> Box<dyn Iterator<Item = Square> + '_> {
    let piece = board[origin].unwrap_or_else(|| panic!("no piece on {origin}"));
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => match mode {
            Mode::Moves => Box::new(pawn_moves(board, origin, color)),
            Mode::Attacks => Box::new(pawn_attacks(origin, color)),
        },
        PieceKind::Knight => Box::new(step_moves(
            board,
            origin,
            color,
            &Vector::KNIGHT_MOVES,
            mode,
        )),
        PieceKind::Bishop => Box::new(all_directional_moves(
            board,
            origin,
            color,
            &Vector::BISHOP_DIRECTIONS,
            mode,
        )),
        PieceKind::Rook => Box::new(all_directional_moves(
            board,
            origin,
            color,
            &Vector::ROOK_DIRECTIONS,
            mode,
        )),
        PieceKind::Queen => Box::new(all_directional_moves(
            board,
            origin,
            color,
            &Vector::QUEEN_DIRECTIONS,
            mode,
        )),
        PieceKind::King => Box::new(step_moves(
            board,
            origin,
            color,
            &Vector::KING_MOVES,
            mode,
        )),
    }
}
fn can_land(board: &Board, destination: Square, color: Color, mode: Mode) -> bool {
    mode == Mode::Attacks || board[destination].is_none_or(|piece| piece.color != color)
}
fn step_moves<'a>(
    board: &'a Board,
    origin: Square,
    color: Color,
    moves: &'static [Vector],
    mode: Mode,
) -> impl Iterator<Item = Square> + 'a {
    moves
        .iter()
        .copied()
        .filter_map(move |movement| origin.move_by(movement))
        .filter(move |destination| can_land(board, *destination, color, mode))
}
fn directional_moves(
    board: &Board,
    origin: Square,
    color: Color,
    direction: Vector,
    mode: Mode,
) -> impl Iterator<Item = Square> + '_ {
    let mut resume = true;
    origin.line_exclusive(direction).map_while(move |destination| {
        if resume {
            if board[destination].is_some() {
                resume = false;
                can_land(board, destination, color, mode).then_some(destination)
            } else {
                Some(destination)
            }
        } else {
            None
        }
    })
}
fn all_directional_moves<'a>(
    board: &'a Board,
    origin: Square,
    color: Color,
    directions: &'static [Vector],
    mode: Mode,
) -> impl Iterator<Item = Square> + 'a {
    directions
        .iter()
        .copied()
        .flat_map(move |direction| directional_moves(board, origin, color, direction, mode))
}
fn pawn_moves(board: &Board, origin: Square, color: Color) -> impl Iterator<Item = Square> + '_ {
    let forward_jumps = if origin.row() == color.pawn_start_row() {
        2
    } else {
        1
    };
    origin
        .line_exclusive(Vector::pawn_single_move(color))
        .take(forward_jumps)
        .take_while(|destination| board.is_empty(*destination))
        .chain(pawn_attacks(origin, color).filter(move |destination| {
            board[*destination].is_some_and(|piece| piece.color != color)
        }))
}
fn pawn_attacks(origin: Square, color: Color) -> impl Iterator<Item = Square> {
    Vector::pawn_attacks(color)
        .into_iter()
        .filter_map(move |movement| origin.move_by(movement))
}
