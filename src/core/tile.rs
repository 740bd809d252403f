// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::core::{Piece, Square};

/// One of the 64 squares of a position, together with whatever is standing on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    square: Square,
    piece: Option<Piece>,
}

impl Tile {
    pub fn empty(square: Square) -> Tile {
        Tile {
            square,
            piece: None,
        }
    }

    /// Creates a tile holding the given piece. The piece must agree with the tile about where it stands.
    pub fn occupied(piece: Piece) -> Tile {
        Tile {
            square: piece.square,
            piece: Some(piece),
        }
    }

    pub fn square(&self) -> Square {
        self.square
    }

    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    pub fn is_occupied(&self) -> bool {
        self.piece.is_some()
    }
}
