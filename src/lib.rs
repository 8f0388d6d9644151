#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

//! Rules engine for two-player chess: move legality, check and king safety,
//! castling and en passant, checkmate and stalemate detection.
//!
//! [`game::Game`] is the entry point. It owns a [`position::Position`] and
//! accepts moves as square pairs.

pub mod attacks;
pub mod board;
pub mod board_display;
pub mod castling;
pub mod color;
pub mod error;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod piece;
pub mod position;
pub mod repl;
pub mod special;
pub mod square;
pub mod status;

#[cfg(test)]
mod fuzz;
