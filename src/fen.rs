use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    iter::{once, repeat},
    num::ParseIntError,
    str::FromStr,
};

use crate::{
    board::Board,
    castling::InvalidCastlingCharacter,
    color::ParseColorError,
    error::InvalidPosition,
    piece::{InvalidFenPiece, Piece},
    position::{Position, Setup},
    square::{ParseSquareError, Square},
};

/// Forsyth–Edwards notation of a validated position.
///
/// The halfmove clock and fullmove number may be omitted when parsing, in
/// which case they default to `0` and `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fen(pub Position);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFenError {
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    NotEnoughRows,
    UnexpectedEol,
    Unexpected(String),
    InvalidFenPiece(InvalidFenPiece),
    ParseColorError(ParseColorError),
    InvalidCastlingCharacter(InvalidCastlingCharacter),
    ParseSquareError(ParseSquareError),
    ParseIntError(ParseIntError),
    InvalidPosition(InvalidPosition),
}
impl From<InvalidFenPiece> for ParseFenError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseFenError::InvalidFenPiece(value)
    }
}
impl From<ParseColorError> for ParseFenError {
    fn from(value: ParseColorError) -> Self {
        ParseFenError::ParseColorError(value)
    }
}
impl From<InvalidCastlingCharacter> for ParseFenError {
    fn from(value: InvalidCastlingCharacter) -> Self {
        ParseFenError::InvalidCastlingCharacter(value)
    }
}
impl From<ParseSquareError> for ParseFenError {
    fn from(value: ParseSquareError) -> Self {
        ParseFenError::ParseSquareError(value)
    }
}
impl From<ParseIntError> for ParseFenError {
    fn from(value: ParseIntError) -> Self {
        ParseFenError::ParseIntError(value)
    }
}
impl From<InvalidPosition> for ParseFenError {
    fn from(value: InvalidPosition) -> Self {
        ParseFenError::InvalidPosition(value)
    }
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::NotEnoughSquaresOnRow => write!(f, "not enough squares on a row")?,
            ParseFenError::ExceedingSquaresOnRow => write!(f, "too many squares on a row")?,
            ParseFenError::NotEnoughRows => write!(f, "8 rows were expected")?,
            ParseFenError::UnexpectedEol => write!(f, "unexpected end of input")?,
            ParseFenError::Unexpected(s) => write!(f, "unexpected `{s}`")?,
            ParseFenError::InvalidFenPiece(err) => write!(f, "{err}")?,
            ParseFenError::ParseColorError(err) => write!(f, "{err}")?,
            ParseFenError::InvalidCastlingCharacter(err) => write!(f, "{err}")?,
            ParseFenError::ParseSquareError(err) => write!(f, "{err}")?,
            ParseFenError::ParseIntError(err) => write!(f, "{err}")?,
            ParseFenError::InvalidPosition(err) => write!(f, "invalid position: {err}")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::InvalidFenPiece(err) => Some(err),
            ParseFenError::ParseColorError(err) => Some(err),
            ParseFenError::InvalidCastlingCharacter(err) => Some(err),
            ParseFenError::ParseSquareError(err) => Some(err),
            ParseFenError::ParseIntError(err) => Some(err),
            ParseFenError::InvalidPosition(err) => Some(err),
            _ => None,
        }
    }
}
fn parse_placement(s: &str) -> Result<Board, ParseFenError> {
    let mut board = Board::empty();
    let mut rows = s.split('/');
    for row in 0..8 {
        let Some(placement) = rows.next() else {
            return Err(ParseFenError::NotEnoughRows);
        };
        let mut column: u8 = 0;
        for c in placement.chars() {
            if let Some(space) = c.to_digit(10).filter(|space| (1..=8).contains(space)) {
                column += space as u8;
                if column > 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
            } else {
                if column >= 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
                board[Square::new(row, column)] = Some(Piece::from_fen(c)?);
                column += 1;
            }
        }
        if column < 8 {
            return Err(ParseFenError::NotEnoughSquaresOnRow);
        }
    }
    if let Some(rest) = rows.next() {
        return Err(ParseFenError::Unexpected(format!("/{rest}")));
    }
    Ok(board)
}
impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_ascii_whitespace();
        let board = parse_placement(fields.next().ok_or(ParseFenError::UnexpectedEol)?)?;
        let side_to_move = fields.next().ok_or(ParseFenError::UnexpectedEol)?.parse()?;
        let castling_rights = fields.next().ok_or(ParseFenError::UnexpectedEol)?.parse()?;
        let en_passant_target = match fields.next().ok_or(ParseFenError::UnexpectedEol)? {
            "-" => None,
            square => Some(square.parse()?),
        };
        let halfmove_clock = fields.next().map(str::parse::<u32>).transpose()?.unwrap_or(0);
        let fullmove_number = fields.next().map(str::parse::<u32>).transpose()?.unwrap_or(1);
        if let Some(field) = fields.next() {
            return Err(ParseFenError::Unexpected(field.to_string()));
        }
        let position = Position::try_from(Setup {
            board,
            side_to_move,
            castling_rights,
            en_passant_target,
            halfmove_clock,
            fullmove_number,
        })?;
        Ok(Fen(position))
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let position = &self.0;
        for (row, first) in (0..8).zip(once(true).chain(repeat(false))) {
            if !first {
                write!(f, "/")?;
            }
            let mut pieces = (0..8)
                .map(|column| position.piece_at(Square::new(row, column)))
                .peekable();
            while let Some(piece) = pieces.next() {
                if let Some(piece) = piece {
                    write!(f, "{}", piece.fen())?;
                } else {
                    let mut count = 1;
                    while pieces.peek().is_some_and(Option::is_none) {
                        pieces.next();
                        count += 1;
                    }
                    write!(f, "{count}")?;
                }
            }
        }
        write!(f, " {}", position.side_to_move().lowercase())?;
        write!(f, " {}", position.castling_rights())?;
        if let Some(square) = position.en_passant_target() {
            write!(f, " {square}")?;
        } else {
            write!(f, " -")?;
        }
        write!(
            f,
            " {} {}",
            position.halfmove_clock(),
            position.fullmove_number()
        )?;
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        error::InvalidPosition,
        fen::{Fen, ParseFenError},
        piece::InvalidFenPiece,
        position::Position,
        square,
    };

    const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn starting_position() {
        let fen: Fen = STARTING_FEN.parse().unwrap();
        assert_eq!(fen.0, Position::starting_position());
        assert_eq!(Fen(Position::starting_position()).to_string(), STARTING_FEN);
    }
    #[test]
    fn all_fields_survive() {
        let src = "r3k2r/8/8/3pP3/8/8/8/R3K2R w Kq d6 4 27";
        let fen: Fen = src.parse().unwrap();
        assert_eq!(fen.0.en_passant_target(), Some(square!("d6")));
        assert_eq!(fen.0.halfmove_clock(), 4);
        assert_eq!(fen.0.fullmove_number(), 27);
        assert_eq!(fen.to_string(), src);
    }
    #[test]
    fn clocks_are_optional() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3 b - -".parse().unwrap();
        assert_eq!(fen.0.side_to_move(), Color::Black);
        assert_eq!(fen.to_string(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    }
    #[test]
    fn malformed_placement() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::NotEnoughSquaresOnRow)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::ExceedingSquaresOnRow)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/4K3 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::NotEnoughRows)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidFenPiece(InvalidFenPiece('X')))
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3".parse::<Fen>(),
            Err(ParseFenError::UnexpectedEol)
        );
    }
    #[test]
    fn invalid_positions_are_rejected() {
        assert_eq!(
            "4k3/8/8/8/8/8/8/8 w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidPosition(InvalidPosition::NoKing(
                Color::White
            )))
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w - e3 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidPosition(
                InvalidPosition::InvalidEnPassantTarget
            ))
        );
    }
}
