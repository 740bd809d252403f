// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `chesscore` is a chess rules engine: board positions, move generation, and the check, checkmate and stalemate
//! rules that decide which moves a player may make.
//!
//! Positions are immutable values. A [`Player`] looks at a position from one side, and
//! [`Player::make_move`](player::Player::make_move) is the only way to get from one position to the next while
//! respecting king safety:
//!
//! ```
//! use chesscore::{core::Move, Position};
//!
//! let pos = Position::from_start_position();
//! let mov = Move::from_uci(&pos, "e2e4").unwrap();
//! let transition = pos.current_player().make_move(mov);
//! assert!(transition.is_done());
//! assert_eq!("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - - 0 1", transition.to_position().as_fen());
//! ```
//!
//! Castling, en passant and promotion are not part of the rules implemented here.

pub mod core;
pub mod movegen;
pub mod player;
pub mod position;

pub use player::{MoveStatus, MoveTransition, Player};
pub use position::{Builder, FenParseError, Position};
