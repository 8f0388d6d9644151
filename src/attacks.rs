//! Attack oracle and check evaluation.

use crate::{
    color::Color,
    movegen::{Mode, destinations},
    position::{Move, Position},
    square::Square,
};

/// Whether any piece of `by` could capture on `square`.
///
/// Reuses the move generator in attack mode, which never asks about king
/// safety, so this cannot recurse into itself.
pub fn is_attacked(position: &Position, square: Square, by: Color) -> bool {
    attackers(position, square, by).next().is_some()
}
/// Squares of the pieces of `by` attacking `square`.
pub fn attackers(
    position: &Position,
    square: Square,
    by: Color,
) -> impl Iterator<Item = Square> + '_ {
    let board = position.board();
    board
        .pieces_of(by)
        .map(|(origin, _)| origin)
        .filter(move |origin| {
            destinations(board, *origin, Mode::Attacks).any(|attacked| attacked == square)
        })
}
pub fn in_check(position: &Position, color: Color) -> bool {
    is_attacked(position, position.king_square(color), !color)
}
/// Plays the piece on `origin` to `destination` on a scratch copy and reports
/// whether the mover's king is attacked afterwards. Captures, including en
/// passant, are inferred from the board.
///
/// # Panics
///
/// Panics if `origin` is empty.
pub fn leaves_king_in_check(position: &Position, origin: Square, destination: Square) -> bool {
    leaves_king_in_check_after(position, &Move::infer(position.board(), origin, destination))
}
/// Same as [`leaves_king_in_check`] for an already resolved move.
///
/// # Panics
///
/// Panics if the origin of `movement` is empty.
pub fn leaves_king_in_check_after(position: &Position, movement: &Move) -> bool {
    let mover = position
        .piece_at(movement.origin)
        .unwrap_or_else(|| panic!("no piece on {}", movement.origin))
        .color;
    in_check(&position.clone_and_play(movement), mover)
}
