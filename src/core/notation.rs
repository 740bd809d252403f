// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Algebraic names for squares ("e2", "h8") and back. This is a plain lookup table; nothing in here knows about
//! pieces or rules.

use std::collections::HashMap;

use crate::core::Square;

/// Algebraic names of all 64 squares, in square index order (a8 first, h1 last).
pub const SQUARE_NAMES: [&str; 64] = [
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8", //
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7", //
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6", //
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5", //
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4", //
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3", //
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2", //
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1", //
];

lazy_static::lazy_static! {
    static ref SQUARES_BY_NAME: HashMap<&'static str, Square> = SQUARE_NAMES
        .iter()
        .enumerate()
        .map(|(idx, &name)| (name, Square(idx as u8)))
        .collect();
}

/// Returns the square with the given algebraic name, if there is one.
pub fn square_named(name: &str) -> Option<Square> {
    SQUARES_BY_NAME.get(name).copied()
}

/// Returns the algebraic name of a square.
pub fn name_of(square: Square) -> &'static str {
    SQUARE_NAMES[square.index()]
}
