// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::core::{self, Square};
use std::fmt;
use std::ops;

/// A set of squares on the chessboard, one bit per square index.
///
/// Move generation leans on the file and rank constants at the bottom of this module to decide whether a step away
/// from a square would fall off the side of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// Creates a new, empty SquareSet.
    pub const fn empty() -> SquareSet {
        SquareSet(0)
    }

    /// Creates a new SquareSet with all squares present in the set.
    pub const fn all() -> SquareSet {
        SquareSet(0xFFFFFFFFFFFFFFFF)
    }

    /// Tests whether or not the given square is contained within this SquareSet.
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & (1u64 << square.0) != 0
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.0;
    }

    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1u64 << square.0);
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn and(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 & other.0)
    }

    pub const fn or(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 | other.0)
    }

    pub const fn not(self) -> SquareSet {
        SquareSet(!self.0)
    }

    pub fn bits(self) -> u64 {
        self.0
    }
}

impl ops::BitOr for SquareSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl ops::Not for SquareSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.not()
    }
}

impl ops::BitAnd for SquareSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::empty();
        for sq in iter {
            set.insert(sq);
        }

        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIterator;

    fn into_iter(self) -> Self::IntoIter {
        SquareSetIterator(self.0)
    }
}

impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sq in core::squares() {
            if self.contains(sq) {
                write!(f, " 1 ")?;
            } else {
                write!(f, " . ")?;
            }

            if sq.column() == 7 {
                writeln!(f, "| {}", 8 - sq.row())?;
            }
        }

        writeln!(f, "{}", "---".repeat(8))?;
        writeln!(f, " a  b  c  d  e  f  g  h ")
    }
}

// Row 0 of the board is rank 8, so the low byte holds the eighth rank.
pub const SS_RANK_8: SquareSet = SquareSet(0x00000000000000FF);
pub const SS_RANK_7: SquareSet = SquareSet(0x000000000000FF00);
pub const SS_RANK_6: SquareSet = SquareSet(0x0000000000FF0000);
pub const SS_RANK_5: SquareSet = SquareSet(0x00000000FF000000);
pub const SS_RANK_4: SquareSet = SquareSet(0x000000FF00000000);
pub const SS_RANK_3: SquareSet = SquareSet(0x0000FF0000000000);
pub const SS_RANK_2: SquareSet = SquareSet(0x00FF000000000000);
pub const SS_RANK_1: SquareSet = SquareSet(0xFF00000000000000);
pub const SS_FILE_A: SquareSet = SquareSet(0x0101010101010101);
pub const SS_FILE_B: SquareSet = SquareSet(0x0202020202020202);
pub const SS_FILE_C: SquareSet = SquareSet(0x0404040404040404);
pub const SS_FILE_D: SquareSet = SquareSet(0x0808080808080808);
pub const SS_FILE_E: SquareSet = SquareSet(0x1010101010101010);
pub const SS_FILE_F: SquareSet = SquareSet(0x2020202020202020);
pub const SS_FILE_G: SquareSet = SquareSet(0x4040404040404040);
pub const SS_FILE_H: SquareSet = SquareSet(0x8080808080808080);

/// An iterator over squares stored in a [`SquareSet`], in increasing index order.
pub struct SquareSetIterator(u64);

impl Iterator for SquareSetIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let next = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Some(Square(next))
        }
    }
}
