use std::fmt::{self, Display, Formatter};

/// Situation of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}
impl GameStatus {
    pub fn new(in_check: bool, has_legal_move: bool) -> Self {
        match (in_check, has_legal_move) {
            (false, true) => GameStatus::Ongoing,
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
        }
    }
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}
impl Display for GameStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing")?,
            GameStatus::Check => write!(f, "check")?,
            GameStatus::Checkmate => write!(f, "checkmate")?,
            GameStatus::Stalemate => write!(f, "stalemate")?,
        }
        Ok(())
    }
}
