use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    num::NonZero,
    ops::{Mul, Neg, Sub},
    str::FromStr,
};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseSquareError {
    InvalidFile(char),
    InvalidRank(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseSquareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseSquareError::InvalidFile(file) => write!(
                f,
                "found `{file}`, characters from `a` to `h` were expected instead"
            )?,
            ParseSquareError::InvalidRank(rank) => write!(
                f,
                "found `{rank}`, characters from `1` to `8` were expected instead"
            )?,
            ParseSquareError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseSquareError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseSquareError {}

/// A square of the board, addressed by row and column.
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's back rank
/// (rank 1). Column 0 is the `a` file.
// Bit structure: 01RRRCCC
// the set bit keeps the byte non-zero so `Option<Square>` fits in one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(NonZero<u8>);

impl Square {
    pub const fn new(row: u8, column: u8) -> Self {
        debug_assert!(row < 8);
        debug_assert!(column < 8);
        let byte = 0b0100_0000 | (row << 3) | column;
        Square(NonZero::new(byte).unwrap())
    }
    pub fn new_checked(row: u8, column: u8) -> Option<Self> {
        if row >= 8 || column >= 8 {
            None
        } else {
            Some(Self::new(row, column))
        }
    }
    /// Parses a square name such as `e4` in a const context. Panics on
    /// malformed names, which makes it a compile error inside `square!`.
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        assert!(bytes.len() == 2, "square names have exactly 2 characters");
        let file = bytes[0];
        let rank = bytes[1];
        assert!(file >= b'a' && file <= b'h', "file must be from `a` to `h`");
        assert!(rank >= b'1' && rank <= b'8', "rank must be from `1` to `8`");
        Square::new(7 - (rank - b'1'), file - b'a')
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseSquareError> {
        let column = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseSquareError::InvalidFile(file)),
        };
        let row = match rank {
            '1'..='8' => 7 - (rank as u8 - b'1'),
            _ => return Err(ParseSquareError::InvalidRank(rank)),
        };
        Ok(Square::new(row, column))
    }
    /// Inverse of [`Square::index`].
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < 64, "{index} should be < 64");
        Square::new((index / 8) as u8, (index % 8) as u8)
    }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (0..64).map(Square::from_index)
    }
    pub fn row(self) -> u8 {
        (self.0.get() >> 3) & 0b_111
    }
    pub fn column(self) -> u8 {
        self.0.get() & 0b_111
    }
    /// Row-major index in `0..64`, `a8` being 0 and `h1` being 63.
    pub fn index(self) -> usize {
        (self.0.get() & 0b_11_1111) as usize
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Self::new_checked(
            self.row().checked_add_signed(movement.row)?,
            self.column().checked_add_signed(movement.column)?,
        )
    }
    pub fn line(self, direction: Vector, start: i8) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        debug_assert_eq!(direction, direction.as_unit());
        (start..).map_while(move |distance| self.move_by(direction * distance))
    }
    pub fn line_inclusive(self, direction: Vector) -> impl Iterator<Item = Self> {
        self.line(direction, 0)
    }
    /// Ray from this square towards the board edge, this square excluded.
    pub fn line_exclusive(self, direction: Vector) -> impl Iterator<Item = Self> {
        self.line(direction, 1)
    }
    pub fn line_inclusive_exclusive(
        self,
        end: Square,
        direction: Vector,
    ) -> impl Iterator<Item = Self> {
        self.line_inclusive(direction)
            .take_while(move |square| *square != end)
    }
    pub fn line_exclusive_exclusive(
        self,
        end: Square,
        direction: Vector,
    ) -> impl Iterator<Item = Self> {
        self.line_inclusive_exclusive(end, direction).skip(1)
    }
    pub fn line_inclusive_inclusive(
        self,
        end: Square,
        direction: Vector,
    ) -> impl Iterator<Item = Self> {
        let mut resume = true;
        self.line_inclusive(direction).take_while(move |square| {
            resume && {
                resume = *square != end;
                true
            }
        })
    }
    /// Shade of the square on a physical board, `a1` being dark.
    pub fn shade(self) -> Color {
        match (self.row() + self.column()) % 2 {
            0 => Color::White,
            1 => Color::Black,
            _ => unreachable!(),
        }
    }
}
impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = (self.column() + b'a') as char;
        let rank = 8 - self.row();
        write!(f, "{file}{rank}")?;
        Ok(())
    }
}
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(0));
        };
        let Some(rank) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseSquareError::Unexpected(c));
        }
        Square::from_chars(file, rank)
    }
}
impl Sub<Self> for Square {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            row: self.row() as i8 - rhs.row() as i8,
            column: self.column() as i8 - rhs.column() as i8,
        }
    }
}

/// Builds a [`Square`] from its name at compile time.
///
/// ```
/// use chess_rules::{square, square::Square};
///
/// assert_eq!(square!("a8"), Square::new(0, 0));
/// assert_eq!(square!("e1"), Square::new(7, 4));
/// ```
#[macro_export]
macro_rules! square {
    ($name:literal) => {
        const { $crate::square::Square::from_name($name) }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub row: i8,
    pub column: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { row: 0, column: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { row: -2, column: -1 },
        Vector { row: -2, column: 1 },
        Vector { row: 2, column: -1 },
        Vector { row: 2, column: 1 },
        Vector { row: -1, column: -2 },
        Vector { row: -1, column: 2 },
        Vector { row: 1, column: -2 },
        Vector { row: 1, column: 2 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { row: -1, column: -1 },
        Vector { row: -1, column: 0 },
        Vector { row: -1, column: 1 },
        Vector { row: 0, column: -1 },
        Vector { row: 0, column: 1 },
        Vector { row: 1, column: -1 },
        Vector { row: 1, column: 0 },
        Vector { row: 1, column: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { row: -1, column: 0 },
        Vector { row: 1, column: 0 },
        Vector { row: 0, column: -1 },
        Vector { row: 0, column: 1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { row: -1, column: -1 },
        Vector { row: -1, column: 1 },
        Vector { row: 1, column: -1 },
        Vector { row: 1, column: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub const EAST: Self = Vector { row: 0, column: 1 };
    pub const WEST: Self = Vector { row: 0, column: -1 };

    pub fn pawn_single_move(color: Color) -> Self {
        Vector {
            row: color.pawn_direction(),
            column: 0,
        }
    }
    pub fn pawn_double_move(color: Color) -> Self {
        Vector::pawn_single_move(color) * 2
    }
    pub fn pawn_attacks(color: Color) -> [Self; 2] {
        [-1, 1].map(|column| Vector {
            row: color.pawn_direction(),
            column,
        })
    }
    pub fn is_pawn_attack(self, color: Color) -> bool {
        self.column.unsigned_abs() == 1 && self.row == color.pawn_direction()
    }
    pub fn as_unit(self) -> Self {
        Vector {
            row: self.row.signum(),
            column: self.column.signum(),
        }
    }
}
impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Vector {
            row: -self.row,
            column: -self.column,
        }
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            row: self.row * rhs,
            column: self.column * rhs,
        }
    }
}
