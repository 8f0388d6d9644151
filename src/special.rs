//! Castling and en passant.
//!
//! Both are recognized by their pattern (a king stepping two columns from its
//! original square, a pawn capturing diagonally onto an empty square) and then
//! validated against the position's auxiliary state.

use crate::{
    attacks::is_attacked,
    castling::CastlingSide,
    error::{CastlingFailure, MoveError},
    piece::{Piece, PieceKind},
    position::{Move, Position},
    square::Square,
};

/// The castling side a king move from `origin` to `destination` asks for, if
/// it has the castling pattern.
pub fn castling_side(
    position: &Position,
    origin: Square,
    destination: Square,
) -> Option<CastlingSide> {
    let color = position.side_to_move();
    let is_home_king = origin == CastlingSide::king_origin(color)
        && position.piece_at(origin) == Some(Piece::new(color, PieceKind::King));
    if is_home_king && destination.row() == origin.row() {
        CastlingSide::from_king_destination(destination.column())
    } else {
        None
    }
}
/// Validates every castling precondition for the side to move. The returned
/// move carries the rook relocation.
///
/// King safety is fully covered here: the king's origin, the square it passes
/// over and its destination must all be unattacked.
pub fn castle(position: &Position, side: CastlingSide) -> Result<Move, CastlingFailure> {
    let color = position.side_to_move();
    let board = position.board();
    let king = CastlingSide::king_origin(color);
    let rook = side.rook_origin(color);
    if !position.castling_rights().get(color, side)
        || board[rook] != Some(Piece::new(color, PieceKind::Rook))
    {
        return Err(CastlingFailure::RightLost);
    }
    if let Some(square) = king
        .line_exclusive_exclusive(rook, side.direction())
        .find(|square| !board.is_empty(*square))
    {
        return Err(CastlingFailure::PathOccupied(square));
    }
    let destination = side.king_destination(color);
    if let Some(square) = king
        .line_inclusive_inclusive(destination, side.direction())
        .find(|square| is_attacked(position, *square, !color))
    {
        return Err(CastlingFailure::KingAttacked(square));
    }
    Ok(Move::infer(board, king, destination))
}
/// Resolves a pawn moving diagonally onto an empty square.
///
/// Returns `Ok(None)` when the move does not have that pattern, the en passant
/// capture when `destination` is the current target, and
/// [`MoveError::StaleEnPassant`] when the geometry would allow the capture
/// but the double step was not the last move.
pub fn en_passant(
    position: &Position,
    origin: Square,
    destination: Square,
) -> Result<Option<Move>, MoveError> {
    let color = position.side_to_move();
    let board = position.board();
    if board[origin] != Some(Piece::new(color, PieceKind::Pawn))
        || !(destination - origin).is_pawn_attack(color)
        || !board.is_empty(destination)
    {
        return Ok(None);
    }
    if position.en_passant_target() == Some(destination) {
        return Ok(Some(Move::infer(board, origin, destination)));
    }
    let beside = Square::new(origin.row(), destination.column());
    if origin.row() == color.en_passant_row()
        && board[beside] == Some(Piece::new(!color, PieceKind::Pawn))
    {
        Err(MoveError::StaleEnPassant)
    } else {
        Err(MoveError::IllegalDestination)
    }
}
/// Castling and en passant moves currently available to the piece on
/// `origin`. En passant captures still need the king-safety filter.
pub fn special_moves(position: &Position, origin: Square) -> impl Iterator<Item = Move> + '_ {
    let color = position.side_to_move();
    let castling = (position.piece_at(origin) == Some(Piece::new(color, PieceKind::King)))
        .then(|| position.castling_rights().sides(color))
        .into_iter()
        .flatten()
        .filter_map(move |side| castle(position, side).ok())
        .filter(move |movement| movement.origin == origin);
    let capture = position
        .en_passant_target()
        .and_then(move |target| en_passant(position, origin, target).ok().flatten());
    castling.chain(capture)
}
#[cfg(test)]
mod test {
    use crate::{
        castling::CastlingSide,
        color::Color,
        error::{CastlingFailure, MoveError},
        fen::Fen,
        position::Position,
        special::{castle, castling_side, en_passant, special_moves},
        square,
    };

    fn position(fen: &str) -> Position {
        fen.parse::<Fen>().unwrap().0
    }

    #[test]
    fn castling_pattern() {
        let position = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(
            castling_side(&position, square!("e1"), square!("g1")),
            Some(CastlingSide::King)
        );
        assert_eq!(
            castling_side(&position, square!("e1"), square!("c1")),
            Some(CastlingSide::Queen)
        );
        assert_eq!(castling_side(&position, square!("e1"), square!("f1")), None);
        assert_eq!(castling_side(&position, square!("e8"), square!("g8")), None);
        assert_eq!(castling_side(&position, square!("h1"), square!("g1")), None);
    }
    #[test]
    fn castling_moves_the_rook() {
        let position = position("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        let movement = castle(&position, CastlingSide::King).unwrap();
        assert_eq!(movement.destination, square!("g1"));
        let rook = movement.castling_rook.unwrap();
        assert_eq!(rook.origin, square!("h1"));
        assert_eq!(rook.destination, square!("f1"));
        let after = position.clone_and_play(&movement);
        assert_eq!(after.king_square(Color::White), square!("g1"));
        assert_eq!(after.castling_rights().to_string(), "-");
    }
    #[test]
    fn castling_requires_the_right() {
        let position = position("4k3/8/8/8/8/8/8/R3K2R w K - 0 1");
        assert_eq!(
            castle(&position, CastlingSide::Queen),
            Err(CastlingFailure::RightLost)
        );
    }
    #[test]
    fn castling_requires_an_empty_path() {
        let position = position("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
        assert_eq!(
            castle(&position, CastlingSide::Queen),
            Err(CastlingFailure::PathOccupied(square!("b1")))
        );
        assert_eq!(
            castle(&position, CastlingSide::King),
            Err(CastlingFailure::PathOccupied(square!("g1")))
        );
    }
    #[test]
    fn castling_rejects_attacked_squares() {
        // transit square f1 attacked by the bishop on c4
        let through = position("4k3/8/8/8/2b5/8/8/4K2R w K - 0 1");
        assert_eq!(
            castle(&through, CastlingSide::King),
            Err(CastlingFailure::KingAttacked(square!("f1")))
        );
        let out_of = position("4k3/8/8/8/8/8/8/r3K2R w K - 0 1");
        assert_eq!(
            castle(&out_of, CastlingSide::King),
            Err(CastlingFailure::KingAttacked(square!("e1")))
        );
        let into = position("4k3/8/8/8/8/7n/8/4K2R w K - 0 1");
        assert_eq!(
            castle(&into, CastlingSide::King),
            Err(CastlingFailure::KingAttacked(square!("g1")))
        );
    }
    #[test]
    fn queenside_castling_ignores_attacks_on_b_file() {
        let position = position("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        let movement = castle(&position, CastlingSide::Queen).unwrap();
        assert_eq!(movement.destination, square!("c1"));
        assert_eq!(movement.castling_rook.unwrap().destination, square!("d1"));
    }
    #[test]
    fn en_passant_captures_beside() {
        let position = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let movement = en_passant(&position, square!("e5"), square!("d6"))
            .unwrap()
            .unwrap();
        assert_eq!(movement.capture, Some(square!("d5")));
        let after = position.clone_and_play(&movement);
        assert!(after.board().is_empty(square!("d5")));
        assert!(after.board()[square!("d6")].is_some());
    }
    #[test]
    fn en_passant_without_target_is_stale() {
        let position = position("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2");
        assert_eq!(
            en_passant(&position, square!("e5"), square!("d6")),
            Err(MoveError::StaleEnPassant)
        );
        assert_eq!(
            en_passant(&position, square!("e5"), square!("f6")),
            Err(MoveError::IllegalDestination)
        );
        assert_eq!(en_passant(&position, square!("e5"), square!("e6")), Ok(None));
    }
    #[test]
    fn special_moves_lists_available_specials() {
        let position = position("4k3/8/8/3pP3/8/8/8/R3K2R w KQ d6 0 2");
        let king: Vec<_> = special_moves(&position, square!("e1"))
            .map(|movement| movement.destination)
            .collect();
        assert_eq!(king, [square!("g1"), square!("c1")]);
        let pawn: Vec<_> = special_moves(&position, square!("e5"))
            .map(|movement| movement.destination)
            .collect();
        assert_eq!(pawn, [square!("d6")]);
        assert_eq!(special_moves(&position, square!("a1")).count(), 0);
    }
}
