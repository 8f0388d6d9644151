use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::{
    attacks::{in_check, leaves_king_in_check_after},
    error::{InvalidSource, MoveError},
    fen::{Fen, ParseFenError},
    movegen::pseudo_legal_destinations,
    piece::{Piece, PieceKind},
    position::{Move, Position},
    special::{castle, castling_side, en_passant, special_moves},
    square::Square,
    status::GameStatus,
};

/// What an accepted move did, and where it leaves the side now to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveOutcome {
    pub movement: Move,
    pub captured: Option<Piece>,
    pub status: GameStatus,
}

/// Turn controller. Owns the position and is its only mutator; every
/// submission is either applied whole or rejected with the position left as
/// it was.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Game {
    position: Position,
}
impl Game {
    pub fn new() -> Self {
        Game::default()
    }
    pub fn from_position(position: Position) -> Self {
        Game { position }
    }
    pub fn from_fen(fen: &str) -> Result<Self, ParseFenError> {
        let Fen(position) = fen.parse()?;
        Ok(Game::from_position(position))
    }
    pub fn position(&self) -> &Position {
        &self.position
    }
    /// Submits a move, promoting to a queen if a pawn reaches the last row.
    pub fn submit_move(
        &mut self,
        origin: Square,
        destination: Square,
    ) -> Result<MoveOutcome, MoveError> {
        self.submit(origin, destination, None)
    }
    pub fn submit_move_with_promotion(
        &mut self,
        origin: Square,
        destination: Square,
        promotion: PieceKind,
    ) -> Result<MoveOutcome, MoveError> {
        self.submit(origin, destination, Some(promotion))
    }
    fn submit(
        &mut self,
        origin: Square,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome, MoveError> {
        let movement = match self.resolve(origin, destination, promotion) {
            Ok(movement) => movement,
            Err(err) => {
                debug!(%origin, %destination, %err, "move rejected");
                return Err(err);
            }
        };
        let captured = self.position.play(&movement);
        let status = self.status();
        debug!(%movement, captured = ?captured, %status, "move played");
        if status.is_over() {
            info!(
                fen = %Fen(self.position.clone()),
                "{status}, {} to move",
                self.position.side_to_move()
            );
        }
        Ok(MoveOutcome {
            movement,
            captured,
            status,
        })
    }
    /// Turns a square pair into a fully legal move without touching the
    /// position.
    pub fn resolve(
        &self,
        origin: Square,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, MoveError> {
        let position = &self.position;
        let piece = position
            .piece_at(origin)
            .ok_or(InvalidSource::Empty(origin))?;
        if piece.color != position.side_to_move() {
            return Err(InvalidSource::WrongColor(origin, piece.color).into());
        }
        let mut movement = if let Some(side) = castling_side(position, origin, destination) {
            castle(position, side)?
        } else if let Some(movement) = en_passant(position, origin, destination)? {
            movement
        } else if pseudo_legal_destinations(position, origin).any(|square| square == destination)
        {
            Move::infer(position.board(), origin, destination)
        } else {
            return Err(MoveError::IllegalDestination);
        };
        if let Some(kind) = promotion {
            if movement.promotion.is_none() || !PieceKind::PROMOTION_CHOICES.contains(&kind) {
                return Err(MoveError::InvalidPromotion(kind));
            }
            movement.promotion = Some(kind);
        }
        // castling already proved every square the king touches safe
        if movement.castling_rook.is_none() && leaves_king_in_check_after(position, &movement) {
            return Err(MoveError::SelfCheck);
        }
        Ok(movement)
    }
    /// Every legal move of the side to move. A promotion appears once, as a
    /// queen promotion.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        let position = &self.position;
        position
            .board()
            .pieces_of(position.side_to_move())
            .flat_map(move |(origin, _)| {
                pseudo_legal_destinations(position, origin)
                    .map(move |destination| Move::infer(position.board(), origin, destination))
                    .chain(special_moves(position, origin))
            })
            .filter(move |movement| {
                movement.castling_rook.is_some()
                    || !leaves_king_in_check_after(position, movement)
            })
    }
    /// Legal destinations of the piece on `origin`, castling and en passant
    /// included. Empty when `origin` does not hold a piece of the side to
    /// move.
    pub fn legal_destinations(&self, origin: Square) -> FxHashSet<Square> {
        if self
            .position
            .piece_at(origin)
            .is_none_or(|piece| piece.color != self.position.side_to_move())
        {
            return FxHashSet::default();
        }
        pseudo_legal_destinations(&self.position, origin)
            .map(|destination| Move::infer(self.position.board(), origin, destination))
            .chain(special_moves(&self.position, origin))
            .filter(|movement| {
                movement.castling_rook.is_some()
                    || !leaves_king_in_check_after(&self.position, movement)
            })
            .map(|movement| movement.destination)
            .collect()
    }
    pub fn has_legal_move(&self) -> bool {
        self.legal_moves().next().is_some()
    }
    pub fn in_check(&self) -> bool {
        in_check(&self.position, self.position.side_to_move())
    }
    pub fn status(&self) -> GameStatus {
        GameStatus::new(self.in_check(), self.has_legal_move())
    }
}
