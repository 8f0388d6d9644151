use std::fmt::{self, Display, Formatter};

use crate::{board::Board, color::Color, piece::Piece, square::Square};

const LIGHT: &str = "\x1b[30;107m";
const DARK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

/// Terminal rendering of a board with figurines and ANSI square colors.
///
/// Lines of `info` are printed to the right of the board, one per rank.
pub struct BoardDisplay<'a> {
    pub board: &'a Board,
    pub view: Color,
    pub highlighted: &'a [Square],
    pub info: &'a str,
}
impl Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for row in 0..8 {
            let row = match self.view {
                Color::White => row,
                Color::Black => 7 - row,
            };
            for column in 0..8 {
                let column = match self.view {
                    Color::White => column,
                    Color::Black => 7 - column,
                };
                let square = Square::new(row, column);
                let color = if self.highlighted.contains(&square) {
                    HIGHLIGHTED
                } else {
                    match square.shade() {
                        Color::White => LIGHT,
                        Color::Black => DARK,
                    }
                };
                let figurine = self.board[square].map_or(' ', Piece::figurine);
                write!(f, "{color}{figurine} {RESET}")?;
            }
            write!(f, "{}", 8 - row)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{board::Board, board_display::BoardDisplay, color::Color, square};

    #[test]
    fn ranks_follow_the_view() {
        let board = Board::starting_position();
        let white = BoardDisplay {
            board: &board,
            view: Color::White,
            highlighted: &[],
            info: "white plays",
        }
        .to_string();
        let lines: Vec<_> = white.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].contains('♜'));
        assert!(lines[0].ends_with("8 white plays"));
        assert_eq!(lines[8], "a b c d e f g h");

        let black = BoardDisplay {
            board: &board,
            view: Color::Black,
            highlighted: &[square!("e2")],
            info: "",
        }
        .to_string();
        let lines: Vec<_> = black.lines().collect();
        assert!(lines[0].contains('♖'));
        assert!(lines[0].ends_with('1'));
        assert!(lines[1].contains("\x1b[30;103m"));
        assert_eq!(lines[8], "h g f e d c b a");
    }
}
