use std::{
    error::Error,
    fmt::{self, Display, Formatter, Write as _},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
};

use crate::{
    board_display::BoardDisplay,
    color::Color,
    fen::{Fen, ParseFenError},
    game::Game,
    piece::{InvalidFenPiece, PieceKind},
    square::{ParseSquareError, Square},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Help,
    Flip,
    Restart,
    Quit,
    Import(Fen),
    ExportFen,
    Square(Square),
    Move(Square, Square, Option<PieceKind>),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Restart => write!(f, "restart")?,
            Input::Quit => write!(f, "quit")?,
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::Square(square) => write!(f, "{square}")?,
            Input::Move(origin, destination, promotion) => {
                write!(f, "{origin} {destination}")?;
                if let Some(promotion) = promotion {
                    write!(f, " {}", promotion.lowercase())?;
                }
            }
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "quit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            s => {
                if let Some(s) = strip_prefix_token(s, "import") {
                    return Ok(Input::Import(s.parse()?));
                }
                let mut tokens = s.split_ascii_whitespace();
                let origin = tokens.next().ok_or(ParseInputError::Empty)?.parse()?;
                let Some(destination) = tokens.next() else {
                    return Ok(Input::Square(origin));
                };
                let promotion = tokens
                    .next()
                    .map(|token| {
                        let mut chars = token.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) => Ok(PieceKind::from_fen(c)?),
                            _ => Err(ParseInputError::Unexpected(token.to_string())),
                        }
                    })
                    .transpose()?;
                if let Some(token) = tokens.next() {
                    return Err(ParseInputError::Unexpected(token.to_string()));
                }
                Ok(Input::Move(origin, destination.parse()?, promotion))
            }
        }
    }
}
fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(<char>::is_whitespace))
        .map(<str>::trim_start)
}
pub fn repl() -> io::Result<()> {
    run(stdin().lock(), stdout().lock(), stderr().lock())
}
/// Drives a game from `input` until `quit` or end of input. Boards and
/// command results go to `output`, rejected commands to `error`.
pub fn run(input: impl BufRead, mut output: impl Write, mut error: impl Write) -> io::Result<()> {
    let mut lines = input.lines();

    let mut game = Game::new();
    let mut info = String::new();
    let mut highlighted = Vec::new();
    let mut update = true;
    let mut view = Color::White;
    let mut first_time = true;
    loop {
        if update {
            info.clear();
            let status = game.status();
            if status.is_over() {
                writeln!(&mut info, "{status}").unwrap();
            } else {
                writeln!(&mut info, "{} plays", game.position().side_to_move()).unwrap();
                if game.in_check() {
                    writeln!(&mut info, "{status}").unwrap();
                }
            }
        }
        if first_time {
            writeln!(&mut info, "type `help` for instructions").unwrap();
            first_time = false;
        }
        update = false;
        writeln!(
            output,
            "{}",
            BoardDisplay {
                board: game.position().board(),
                view,
                highlighted: &highlighted,
                info: &info,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let text = text?;
            let input = match text.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available command, enter `help`")?;
                    continue;
                }
            };
            match input {
                Input::Help => {
                    writeln!(output, "flip         - flip the board")?;
                    writeln!(output, "restart      - reset to starting position")?;
                    writeln!(output, "quit         - quit the game")?;
                    writeln!(output, "import <fen> - import a position")?;
                    writeln!(output, "fen          - export the position as fen")?;
                    writeln!(output, "e2           - view legal destinations")?;
                    writeln!(output, "e2 e4        - play the move")?;
                    writeln!(output, "e7 e8 n      - move and promote")?;
                    writeln!(output, "e1 g1        - perform castling")?;
                }
                Input::Flip => {
                    view = !view;
                }
                Input::Restart => {
                    game = Game::new();
                    update = true;
                    highlighted.clear();
                }
                Input::Quit => return Ok(()),
                Input::Import(Fen(position)) => {
                    game = Game::from_position(position);
                    update = true;
                    highlighted.clear();
                }
                Input::ExportFen => {
                    writeln!(output, "{}", Fen(game.position().clone()))?;
                    continue;
                }
                Input::Square(square) => {
                    let position = game.position();
                    if let Some(piece) = position.piece_at(square) {
                        if piece.color != position.side_to_move() {
                            writeln!(error, "Error: It is {}'s turn", position.side_to_move())?;
                            continue;
                        }
                        highlighted.clear();
                        highlighted.extend(game.legal_destinations(square));
                    } else {
                        writeln!(error, "Error: No piece found on {square}")?;
                        continue;
                    }
                }
                Input::Move(origin, destination, promotion) => {
                    let result = match promotion {
                        Some(promotion) => {
                            game.submit_move_with_promotion(origin, destination, promotion)
                        }
                        None => game.submit_move(origin, destination),
                    };
                    if let Err(err) = result {
                        writeln!(error, "Error: {err}")?;
                        continue;
                    }
                    highlighted.clear();
                    highlighted.push(origin);
                    highlighted.push(destination);
                    update = true;
                }
            }
            break;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseInputError {
    Empty,
    Unexpected(String),
    Fen(ParseFenError),
    Square(ParseSquareError),
    Promotion(InvalidFenPiece),
}
impl From<ParseFenError> for ParseInputError {
    fn from(value: ParseFenError) -> Self {
        ParseInputError::Fen(value)
    }
}
impl From<ParseSquareError> for ParseInputError {
    fn from(value: ParseSquareError) -> Self {
        ParseInputError::Square(value)
    }
}
impl From<InvalidFenPiece> for ParseInputError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseInputError::Promotion(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Empty => write!(f, "no command given")?,
            ParseInputError::Unexpected(token) => write!(f, "unexpected `{token}`")?,
            ParseInputError::Fen(err) => write!(f, "{err}")?,
            ParseInputError::Square(err) => write!(f, "{err}")?,
            ParseInputError::Promotion(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Fen(err) => Some(err),
            ParseInputError::Square(err) => Some(err),
            ParseInputError::Promotion(err) => Some(err),
            _ => None,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{
        piece::PieceKind,
        repl::{Input, ParseInputError, run},
        square,
        square::ParseSquareError,
    };

    #[test]
    fn parse_commands() {
        assert_eq!("flip".parse::<Input>(), Ok(Input::Flip));
        assert_eq!("e2".parse::<Input>(), Ok(Input::Square(square!("e2"))));
        assert_eq!(
            "e2 e4".parse::<Input>(),
            Ok(Input::Move(square!("e2"), square!("e4"), None))
        );
        assert_eq!(
            "b7  b8 n".parse::<Input>(),
            Ok(Input::Move(
                square!("b7"),
                square!("b8"),
                Some(PieceKind::Knight)
            ))
        );
        assert_eq!(
            "e9".parse::<Input>(),
            Err(ParseInputError::Square(ParseSquareError::InvalidRank('9')))
        );
        assert_eq!(
            "e2 e4 q q".parse::<Input>(),
            Err(ParseInputError::Unexpected("q".to_string()))
        );
        assert!(matches!(
            "import 4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Input>(),
            Ok(Input::Import(_))
        ));
        assert!("importe".parse::<Input>().is_err());
    }
    #[test]
    fn plays_a_session() {
        let input = "e2 e4\ne2 e4\nfen\nquit\ne7 e5\n";
        let mut output = Vec::new();
        let mut error = Vec::new();
        run(input.as_bytes(), &mut output, &mut error).unwrap();
        let output = String::from_utf8(output).unwrap();
        let error = String::from_utf8(error).unwrap();
        assert!(output.contains("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"));
        assert!(output.contains("black plays"));
        assert!(error.contains("Error: e2 is empty"));
    }
}
