use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{color::Color, piece::PieceKind, square::Square};

/// Why a submitted move was rejected. Rejected moves leave the position
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveError {
    InvalidSource(InvalidSource),
    IllegalDestination,
    SelfCheck,
    CastlingPreconditionFailed(CastlingFailure),
    StaleEnPassant,
    InvalidPromotion(PieceKind),
}
impl From<InvalidSource> for MoveError {
    fn from(value: InvalidSource) -> Self {
        MoveError::InvalidSource(value)
    }
}
impl From<CastlingFailure> for MoveError {
    fn from(value: CastlingFailure) -> Self {
        MoveError::CastlingPreconditionFailed(value)
    }
}
impl Display for MoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidSource(err) => write!(f, "{err}")?,
            MoveError::IllegalDestination => {
                write!(f, "the piece cannot reach the destination")?;
            }
            MoveError::SelfCheck => write!(f, "the move would leave the king in check")?,
            MoveError::CastlingPreconditionFailed(err) => write!(f, "cannot castle: {err}")?,
            MoveError::StaleEnPassant => {
                write!(f, "en passant is only available right after the double step")?;
            }
            MoveError::InvalidPromotion(kind) => write!(f, "cannot promote to {kind}")?,
        }
        Ok(())
    }
}
impl Error for MoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MoveError::InvalidSource(err) => Some(err),
            MoveError::CastlingPreconditionFailed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidSource {
    Empty(Square),
    WrongColor(Square, Color),
}
impl Display for InvalidSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSource::Empty(square) => write!(f, "{square} is empty")?,
            InvalidSource::WrongColor(square, color) => {
                write!(f, "the piece on {square} belongs to {color}, who is not to move")?;
            }
        }
        Ok(())
    }
}
impl Error for InvalidSource {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingFailure {
    RightLost,
    PathOccupied(Square),
    KingAttacked(Square),
}
impl Display for CastlingFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CastlingFailure::RightLost => write!(f, "the castling right is lost")?,
            CastlingFailure::PathOccupied(square) => write!(f, "{square} is occupied")?,
            CastlingFailure::KingAttacked(square) => write!(f, "{square} is attacked")?,
        }
        Ok(())
    }
}
impl Error for CastlingFailure {}

/// A broken position invariant. Legal play never produces one; it shows up
/// when importing a position or when the engine itself is defective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidPosition {
    NoKing(Color),
    TooManyKings(Color),
    KingSquareMismatch(Color),
    PawnOnBackRank(Square),
    InvalidCastlingRights,
    InvalidEnPassantTarget,
    OpponentInCheck,
}
impl Display for InvalidPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPosition::NoKing(color) => write!(f, "no {color} king found")?,
            InvalidPosition::TooManyKings(color) => write!(f, "found more than 1 {color} king")?,
            InvalidPosition::KingSquareMismatch(color) => {
                write!(f, "cached {color} king square is out of date")?;
            }
            InvalidPosition::PawnOnBackRank(square) => write!(f, "pawn found on {square}")?,
            InvalidPosition::InvalidCastlingRights => write!(f, "invalid castling rights")?,
            InvalidPosition::InvalidEnPassantTarget => write!(f, "invalid en passant target")?,
            InvalidPosition::OpponentInCheck => {
                write!(f, "the side not to move is in check")?;
            }
        }
        Ok(())
    }
}
impl Error for InvalidPosition {}

#[cfg(test)]
mod test {
    use std::error::Error;

    use crate::{
        error::{CastlingFailure, InvalidSource, MoveError},
        square,
    };

    #[test]
    fn nested_causes_are_exposed() {
        let err: MoveError = CastlingFailure::KingAttacked(square!("f1")).into();
        assert_eq!(err.to_string(), "cannot castle: f1 is attacked");
        assert!(err.source().is_some());
        let err: MoveError = InvalidSource::Empty(square!("e4")).into();
        assert_eq!(err.to_string(), "e4 is empty");
        assert!(MoveError::SelfCheck.source().is_none());
    }
}
