// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use serde::Serialize;

use crate::core::{PieceKind, Square, Team};

/// A piece standing on a particular square.
///
/// Pieces are plain values. Moving a piece never changes it; [`Piece::move_to`] produces a new value at the
/// destination instead. Two pieces are equal only if kind, team, square and `has_moved` all agree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub team: Team,
    pub square: Square,
    /// False only while the piece is still in its starting state.
    pub has_moved: bool,
}

impl Piece {
    /// Creates a piece that has not yet moved.
    pub fn new(kind: PieceKind, team: Team, square: Square) -> Piece {
        Piece {
            kind,
            team,
            square,
            has_moved: false,
        }
    }

    /// Returns a copy of this piece with `has_moved` forced to the given value. Useful for setting up positions.
    pub fn with_moved(self, has_moved: bool) -> Piece {
        Piece { has_moved, ..self }
    }

    /// Returns the value this piece has after moving to `destination`.
    pub fn move_to(self, destination: Square) -> Piece {
        Piece {
            square: destination,
            has_moved: true,
            ..self
        }
    }

    pub fn pawn(team: Team, square: Square) -> Piece {
        Piece::new(PieceKind::Pawn, team, square)
    }

    pub fn knight(team: Team, square: Square) -> Piece {
        Piece::new(PieceKind::Knight, team, square)
    }

    pub fn bishop(team: Team, square: Square) -> Piece {
        Piece::new(PieceKind::Bishop, team, square)
    }

    pub fn rook(team: Team, square: Square) -> Piece {
        Piece::new(PieceKind::Rook, team, square)
    }

    pub fn queen(team: Team, square: Square) -> Piece {
        Piece::new(PieceKind::Queen, team, square)
    }

    pub fn king(team: Team, square: Square) -> Piece {
        Piece::new(PieceKind::King, team, square)
    }
}

/// Formats the piece as its FEN letter: uppercase for White, lowercase for Black.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.kind.to_string();
        match self.team {
            Team::White => write!(f, "{}", letter.to_ascii_uppercase()),
            Team::Black => write!(f, "{}", letter),
        }
    }
}
