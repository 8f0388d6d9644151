use std::fmt::{self, Display, Formatter};

use crate::{
    attacks::in_check,
    board::Board,
    castling::{CastlingRights, CastlingSide},
    color::Color,
    error::InvalidPosition,
    piece::{Piece, PieceKind},
    square::{Square, Vector},
};

/// A fully resolved move: everything needed to apply it without looking at
/// the board again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Square,
    pub destination: Square,
    /// Where the captured piece stands. Differs from `destination` only for
    /// en passant.
    pub capture: Option<Square>,
    pub castling_rook: Option<RookMove>,
    pub promotion: Option<PieceKind>,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RookMove {
    pub origin: Square,
    pub destination: Square,
}
impl Move {
    /// Derives the side effects of moving the piece on `origin` to
    /// `destination`: a diagonal pawn step onto an empty square captures en
    /// passant, a two-column king step from its original square castles, and
    /// a pawn reaching the last row promotes to a queen.
    ///
    /// No legality is checked here.
    ///
    /// # Panics
    ///
    /// Panics if `origin` is empty.
    pub fn infer(board: &Board, origin: Square, destination: Square) -> Self {
        let piece = board[origin].unwrap_or_else(|| panic!("no piece on {origin}"));
        let capture = if board[destination].is_some() {
            Some(destination)
        } else if piece.kind == PieceKind::Pawn && origin.column() != destination.column() {
            Some(Square::new(origin.row(), destination.column()))
        } else {
            None
        };
        let castling_rook = (piece.kind == PieceKind::King
            && origin == CastlingSide::king_origin(piece.color)
            && destination.row() == origin.row())
        .then(|| CastlingSide::from_king_destination(destination.column()))
        .flatten()
        .map(|side| RookMove {
            origin: side.rook_origin(piece.color),
            destination: side.rook_destination(piece.color),
        });
        let promotion = (piece.kind == PieceKind::Pawn
            && destination.row() == piece.color.promotion_row())
        .then_some(PieceKind::Queen);
        Move {
            origin,
            destination,
            capture,
            castling_rook,
            promotion,
        }
    }
}
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, " {}", promotion.lowercase())?;
        }
        Ok(())
    }
}

/// Loose description of a position, checked when converted into a
/// [`Position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Setup {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// The board plus everything else the rules depend on.
///
/// A position is only mutated through [`Position::play`]; every other state
/// change happens on a clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    king_squares: [Square; 2],
    en_passant_target: Option<Square>,
    castling_rights: CastlingRights,
    halfmove_clock: u32,
    fullmove_number: u32,
}
impl Position {
    pub fn starting_position() -> Self {
        Position {
            board: Board::starting_position(),
            side_to_move: Color::White,
            king_squares: Color::ALL.map(CastlingSide::king_origin),
            en_passant_target: None,
            castling_rights: CastlingRights::all(),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square]
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }
    /// Applies a resolved move and returns the captured piece. Legality is the
    /// caller's business; see [`crate::game::Game::submit_move`].
    ///
    /// The clocks saturate instead of overflowing.
    ///
    /// # Panics
    ///
    /// Panics if the origin of `movement` is empty.
    pub fn play(&mut self, movement: &Move) -> Option<Piece> {
        let piece = self.board[movement.origin]
            .unwrap_or_else(|| panic!("no piece on {}", movement.origin));
        let captured = movement
            .capture
            .and_then(|square| self.board[square].take());
        let replaced = self.board.relocate(movement.origin, movement.destination);
        debug_assert_eq!(replaced, None);

        if let Some(promotion) = movement.promotion {
            self.board[movement.destination] = Some(Piece::new(piece.color, promotion));
        }
        if let Some(rook) = movement.castling_rook {
            self.board.relocate(rook.origin, rook.destination);
        }
        if piece.kind == PieceKind::King {
            self.castling_rights.clear(piece.color);
            self.king_squares[piece.color.index()] = movement.destination;
        }
        self.castling_rights.remove_for_corner(movement.origin);
        self.castling_rights.remove_for_corner(movement.destination);

        self.en_passant_target = (piece.kind == PieceKind::Pawn
            && movement.destination - movement.origin == Vector::pawn_double_move(piece.color))
        .then(|| movement.origin.move_by(Vector::pawn_single_move(piece.color)))
        .flatten();

        if piece.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if piece.color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = !piece.color;

        if cfg!(debug_assertions)
            && let Err(err) = self.validate_structure()
        {
            panic!("{movement} broke the position: {err}");
        }
        captured
    }
    pub fn clone_and_play(&self, movement: &Move) -> Self {
        let mut new = self.clone();
        new.play(movement);
        new
    }
    /// Checks every invariant, including that the side that just moved did
    /// not leave its king attacked.
    pub fn validate(&self) -> Result<(), InvalidPosition> {
        self.validate_structure()?;
        if in_check(self, !self.side_to_move) {
            return Err(InvalidPosition::OpponentInCheck);
        }
        Ok(())
    }
    /// Invariants that hold even for the scratch positions used to test king
    /// safety.
    fn validate_structure(&self) -> Result<(), InvalidPosition> {
        for color in Color::ALL {
            let mut kings = self.board.kings(color);
            let Some(king) = kings.next() else {
                return Err(InvalidPosition::NoKing(color));
            };
            if kings.next().is_some() {
                return Err(InvalidPosition::TooManyKings(color));
            }
            if king != self.king_square(color) {
                return Err(InvalidPosition::KingSquareMismatch(color));
            }
        }
        if let Some((square, _)) = self.board.pieces().find(|(square, piece)| {
            piece.kind == PieceKind::Pawn && (square.row() == 0 || square.row() == 7)
        }) {
            return Err(InvalidPosition::PawnOnBackRank(square));
        }
        for color in Color::ALL {
            let king_home = self.board[CastlingSide::king_origin(color)]
                == Some(Piece::new(color, PieceKind::King));
            if !self.castling_rights.sides(color).all(|side| {
                king_home
                    && self.board[side.rook_origin(color)]
                        == Some(Piece::new(color, PieceKind::Rook))
            }) {
                return Err(InvalidPosition::InvalidCastlingRights);
            }
        }
        if let Some(target) = self.en_passant_target {
            let mover = !self.side_to_move;
            let single = Vector::pawn_single_move(mover);
            let valid = mover
                .pawn_start_row()
                .checked_add_signed(mover.pawn_direction())
                == Some(target.row())
                && self.board.is_empty(target)
                && target
                    .move_by(-single)
                    .is_some_and(|origin| self.board.is_empty(origin))
                && target.move_by(single).is_some_and(|pawn| {
                    self.board[pawn] == Some(Piece::new(mover, PieceKind::Pawn))
                });
            if !valid {
                return Err(InvalidPosition::InvalidEnPassantTarget);
            }
        }
        Ok(())
    }
}
impl Default for Position {
    fn default() -> Self {
        Position::starting_position()
    }
}
impl TryFrom<Setup> for Position {
    type Error = InvalidPosition;

    fn try_from(value: Setup) -> Result<Self, Self::Error> {
        let mut king_squares = [None; 2];
        for color in Color::ALL {
            king_squares[color.index()] = value.board.kings(color).next();
        }
        let [Some(white), Some(black)] = king_squares else {
            let color = if king_squares[0].is_none() {
                Color::White
            } else {
                Color::Black
            };
            return Err(InvalidPosition::NoKing(color));
        };
        let position = Position {
            board: value.board,
            side_to_move: value.side_to_move,
            king_squares: [white, black],
            en_passant_target: value.en_passant_target,
            castling_rights: value.castling_rights,
            halfmove_clock: value.halfmove_clock,
            fullmove_number: value.fullmove_number,
        };
        position.validate()?;
        Ok(position)
    }
}
