//! Differential test against the `chess` crate's move generator.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{
    board_display::BoardDisplay,
    color::Color,
    fen::Fen,
    game::Game,
    piece::PieceKind,
    square::Square,
    status::GameStatus,
};

type Lan = (Square, Square, Option<PieceKind>);

impl From<chess::Piece> for PieceKind {
    fn from(value: chess::Piece) -> Self {
        match value {
            chess::Piece::Pawn => PieceKind::Pawn,
            chess::Piece::Knight => PieceKind::Knight,
            chess::Piece::Bishop => PieceKind::Bishop,
            chess::Piece::Rook => PieceKind::Rook,
            chess::Piece::Queen => PieceKind::Queen,
            chess::Piece::King => PieceKind::King,
        }
    }
}
impl From<chess::Square> for Square {
    fn from(value: chess::Square) -> Self {
        Square::new(
            (7 - value.get_rank().to_index()).try_into().unwrap(),
            value.get_file().to_index().try_into().unwrap(),
        )
    }
}
fn lan(movement: chess::ChessMove) -> Lan {
    (
        movement.get_source().into(),
        movement.get_dest().into(),
        movement.get_promotion().map(Into::into),
    )
}
/// Our legal moves with every promotion choice spelled out.
fn legal_moves(game: &Game) -> Vec<Lan> {
    game.legal_moves()
        .flat_map(|movement| {
            let promotions: Vec<_> = match movement.promotion {
                Some(_) => PieceKind::PROMOTION_CHOICES.map(Some).into(),
                None => vec![None],
            };
            promotions
                .into_iter()
                .map(move |promotion| (movement.origin, movement.destination, promotion))
        })
        .collect()
}
fn report(game: &Game) -> String {
    format!(
        "{}\n{}",
        BoardDisplay {
            board: game.position().board(),
            view: Color::White,
            highlighted: &[],
            info: "",
        },
        Fen(game.position().clone()),
    )
}
fn compare(game: &Game) {
    let moves = legal_moves(game);
    let ours: FxHashSet<_> = moves.iter().copied().collect();
    assert_eq!(ours.len(), moves.len(), "duplicate moves\n{}", report(game));

    let reference: chess::Board = Fen(game.position().clone()).to_string().parse().unwrap();
    let theirs: FxHashSet<_> = chess::MoveGen::new_legal(&reference).map(lan).collect();
    if let Some((origin, destination, _)) = ours.difference(&theirs).next() {
        panic!(
            "found {origin} {destination} but it's not a legal move\n{}",
            report(game)
        );
    }
    if let Some((origin, destination, _)) = theirs.difference(&ours).next() {
        panic!("{origin} {destination} not found\n{}", report(game));
    }
    let status = match reference.status() {
        chess::BoardStatus::Ongoing if reference.checkers().popcnt() > 0 => GameStatus::Check,
        chess::BoardStatus::Ongoing => GameStatus::Ongoing,
        chess::BoardStatus::Checkmate => GameStatus::Checkmate,
        chess::BoardStatus::Stalemate => GameStatus::Stalemate,
    };
    assert_eq!(game.status(), status, "\n{}", report(game));
}
fn playout(rng: &mut SmallRng, start: &str, plies: usize) {
    let mut game = Game::from_fen(start).unwrap();
    for _ in 0..plies {
        compare(&game);
        let moves = legal_moves(&game);
        if moves.is_empty() {
            break;
        }
        let (origin, destination, promotion) = moves[rng.random_range(0..moves.len())];
        let outcome = match promotion {
            Some(promotion) => game.submit_move_with_promotion(origin, destination, promotion),
            None => game.submit_move(origin, destination),
        };
        if let Err(err) = outcome {
            panic!(
                "{origin} {destination} was listed but rejected: {err}\n{}",
                report(&game)
            );
        }
    }
}
#[test]
fn random_games_from_start() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for _ in 0..8 {
        playout(
            &mut rng,
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            150,
        );
    }
}
#[test]
fn random_games_from_tricky_positions() {
    let mut rng = SmallRng::seed_from_u64(42);
    for fen in [
        // castling both ways with pieces in the way and pins around
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        // en passant discovered check along the fifth rank
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        // promotions with captures on the back rank
        "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
    ] {
        for _ in 0..4 {
            playout(&mut rng, fen, 80);
        }
    }
}
