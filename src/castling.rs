use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    color::Color,
    square::{Square, Vector},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidCastlingCharacter(pub char);

impl Display for InvalidCastlingCharacter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found {}, expected one of `K`, `Q`, `k`, `q`, or `-`",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidCastlingCharacter {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    King,
    Queen,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::King, CastlingSide::Queen];

    const KING_ORIGIN_COLUMN: u8 = 4;

    fn bit(self) -> u8 {
        match self {
            CastlingSide::King => 0b_01,
            CastlingSide::Queen => 0b_10,
        }
    }
    /// Side whose king destination is `column`, if any.
    pub fn from_king_destination(column: u8) -> Option<Self> {
        match column {
            6 => Some(CastlingSide::King),
            2 => Some(CastlingSide::Queen),
            _ => None,
        }
    }
    /// Side whose rook starts on `column`, if any.
    pub fn from_rook_origin(column: u8) -> Option<Self> {
        match column {
            7 => Some(CastlingSide::King),
            0 => Some(CastlingSide::Queen),
            _ => None,
        }
    }
    pub fn direction(self) -> Vector {
        match self {
            CastlingSide::King => Vector::EAST,
            CastlingSide::Queen => Vector::WEST,
        }
    }
    pub fn king_origin(color: Color) -> Square {
        Square::new(color.home_row(), Self::KING_ORIGIN_COLUMN)
    }
    pub fn king_destination(self, color: Color) -> Square {
        let column = match self {
            CastlingSide::King => 6,
            CastlingSide::Queen => 2,
        };
        Square::new(color.home_row(), column)
    }
    pub fn rook_origin(self, color: Color) -> Square {
        let column = match self {
            CastlingSide::King => 7,
            CastlingSide::Queen => 0,
        };
        Square::new(color.home_row(), column)
    }
    /// The rook lands next to the king, on the square the king passes over.
    pub fn rook_destination(self, color: Color) -> Square {
        let column = match self {
            CastlingSide::King => 5,
            CastlingSide::Queen => 3,
        };
        Square::new(color.home_row(), column)
    }
}
impl Display for CastlingSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CastlingSide::King => write!(f, "kingside")?,
            CastlingSide::Queen => write!(f, "queenside")?,
        }
        Ok(())
    }
}

/// Castling rights of both colors. A right, once removed, is never restored
/// by play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    white: u8,
    black: u8,
}
impl CastlingRights {
    pub fn none() -> Self {
        CastlingRights { white: 0, black: 0 }
    }
    pub fn all() -> Self {
        CastlingRights {
            white: 0b_11,
            black: 0b_11,
        }
    }
    fn byte(self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
    fn byte_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
    pub fn get(self, color: Color, side: CastlingSide) -> bool {
        self.byte(color) & side.bit() != 0
    }
    pub fn sides(self, color: Color) -> impl Iterator<Item = CastlingSide> {
        CastlingSide::ALL
            .into_iter()
            .filter(move |side| self.get(color, *side))
    }
    pub fn add(&mut self, color: Color, side: CastlingSide) {
        *self.byte_mut(color) |= side.bit();
    }
    pub fn remove(&mut self, color: Color, side: CastlingSide) {
        *self.byte_mut(color) &= !side.bit();
    }
    pub fn clear(&mut self, color: Color) {
        *self.byte_mut(color) = 0;
    }
    /// Removes the right tied to a rook corner when anything leaves or lands
    /// on it. Squares that are not rook corners leave the rights untouched.
    pub fn remove_for_corner(&mut self, square: Square) {
        for color in Color::ALL {
            if square.row() == color.home_row()
                && let Some(side) = CastlingSide::from_rook_origin(square.column())
            {
                self.remove(color, side);
            }
        }
    }
}
impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for color in Color::ALL {
            for side in self.sides(color) {
                let c = match (color, side) {
                    (Color::White, CastlingSide::King) => 'K',
                    (Color::White, CastlingSide::Queen) => 'Q',
                    (Color::Black, CastlingSide::King) => 'k',
                    (Color::Black, CastlingSide::Queen) => 'q',
                };
                written = true;
                write!(f, "{c}")?;
            }
        }
        if !written {
            write!(f, "-")?;
        }
        Ok(())
    }
}
impl FromStr for CastlingRights {
    type Err = InvalidCastlingCharacter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut castling_rights = CastlingRights::none();
        for c in s.chars() {
            match c {
                'K' => castling_rights.add(Color::White, CastlingSide::King),
                'Q' => castling_rights.add(Color::White, CastlingSide::Queen),
                'k' => castling_rights.add(Color::Black, CastlingSide::King),
                'q' => castling_rights.add(Color::Black, CastlingSide::Queen),
                '-' => (),
                c => return Err(InvalidCastlingCharacter(c)),
            }
        }
        Ok(castling_rights)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        castling::{CastlingRights, CastlingSide},
        color::Color,
        square,
    };

    #[test]
    fn fen_field() {
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
        assert_eq!(CastlingRights::none().to_string(), "-");
        let rights: CastlingRights = "Kq".parse().unwrap();
        assert!(rights.get(Color::White, CastlingSide::King));
        assert!(!rights.get(Color::White, CastlingSide::Queen));
        assert!(rights.get(Color::Black, CastlingSide::Queen));
        assert!("KX".parse::<CastlingRights>().is_err());
    }
    #[test]
    fn corners_map_to_one_right() {
        let mut rights = CastlingRights::all();
        rights.remove_for_corner(square!("h8"));
        assert_eq!(rights.to_string(), "KQq");
        rights.remove_for_corner(square!("e4"));
        rights.remove_for_corner(square!("a1"));
        assert_eq!(rights.to_string(), "Kq");
    }
    #[test]
    fn geometry() {
        assert_eq!(CastlingSide::king_origin(Color::White), square!("e1"));
        assert_eq!(
            CastlingSide::Queen.king_destination(Color::Black),
            square!("c8")
        );
        assert_eq!(CastlingSide::King.rook_origin(Color::White), square!("h1"));
        assert_eq!(
            CastlingSide::Queen.rook_destination(Color::White),
            square!("d1")
        );
    }
}
