// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{convert::TryFrom, fmt, str::FromStr};

use derive_more::Display;
use serde::Serialize;
use thiserror::Error;

use crate::core::{notation, SquareSet, SS_RANK_2, SS_RANK_7};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SquareParseError {
    #[error("square index out of range: {0}")]
    OutOfRange(u8),
    #[error("unknown square name: {0}")]
    UnknownName(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PieceParseError {
    #[error("invalid char: {0}")]
    InvalidChar(char),
}

/// A square on the chessboard.
///
/// Squares are numbered row-major from White's point of view: index 0 is a8, the top-left corner, and index 63 is
/// h1. Moving "up" the board (towards Black) therefore decreases the index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Square(pub(in crate::core) u8);

impl Square {
    /// Returns the square at the given row and column. Both must be less than 8.
    pub fn of(row: u8, column: u8) -> Square {
        debug_assert!(row < 8 && column < 8, "square out of range: {}, {}", row, column);
        Square(row * 8 + column)
    }

    /// Returns the row of this square, where row 0 holds rank 8 and row 7 holds rank 1.
    pub const fn row(self) -> u8 {
        self.0 >> 3
    }

    /// Returns the column of this square, where column 0 is the a-file.
    pub const fn column(self) -> u8 {
        self.0 & 7
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the square `offset` indices away from this one, or `None` if that index is off of the board. Note that
    /// this is raw index arithmetic; it says nothing about whether the step wrapped around an edge of the board.
    pub fn offset(self, offset: i8) -> Option<Square> {
        let target = self.0 as i16 + offset as i16;
        if (0..64).contains(&target) {
            Some(Square(target as u8))
        } else {
            None
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = SquareParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value >= 64 {
            return Err(SquareParseError::OutOfRange(value));
        }

        Ok(Square(value))
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        notation::square_named(s).ok_or_else(|| SquareParseError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", notation::name_of(*self))
    }
}

pub const A8: Square = Square(0);
pub const B8: Square = Square(1);
pub const C8: Square = Square(2);
pub const D8: Square = Square(3);
pub const E8: Square = Square(4);
pub const F8: Square = Square(5);
pub const G8: Square = Square(6);
pub const H8: Square = Square(7);
pub const A7: Square = Square(8);
pub const B7: Square = Square(9);
pub const C7: Square = Square(10);
pub const D7: Square = Square(11);
pub const E7: Square = Square(12);
pub const F7: Square = Square(13);
pub const G7: Square = Square(14);
pub const H7: Square = Square(15);
pub const A6: Square = Square(16);
pub const B6: Square = Square(17);
pub const C6: Square = Square(18);
pub const D6: Square = Square(19);
pub const E6: Square = Square(20);
pub const F6: Square = Square(21);
pub const G6: Square = Square(22);
pub const H6: Square = Square(23);
pub const A5: Square = Square(24);
pub const B5: Square = Square(25);
pub const C5: Square = Square(26);
pub const D5: Square = Square(27);
pub const E5: Square = Square(28);
pub const F5: Square = Square(29);
pub const G5: Square = Square(30);
pub const H5: Square = Square(31);
pub const A4: Square = Square(32);
pub const B4: Square = Square(33);
pub const C4: Square = Square(34);
pub const D4: Square = Square(35);
pub const E4: Square = Square(36);
pub const F4: Square = Square(37);
pub const G4: Square = Square(38);
pub const H4: Square = Square(39);
pub const A3: Square = Square(40);
pub const B3: Square = Square(41);
pub const C3: Square = Square(42);
pub const D3: Square = Square(43);
pub const E3: Square = Square(44);
pub const F3: Square = Square(45);
pub const G3: Square = Square(46);
pub const H3: Square = Square(47);
pub const A2: Square = Square(48);
pub const B2: Square = Square(49);
pub const C2: Square = Square(50);
pub const D2: Square = Square(51);
pub const E2: Square = Square(52);
pub const F2: Square = Square(53);
pub const G2: Square = Square(54);
pub const H2: Square = Square(55);
pub const A1: Square = Square(56);
pub const B1: Square = Square(57);
pub const C1: Square = Square(58);
pub const D1: Square = Square(59);
pub const E1: Square = Square(60);
pub const F1: Square = Square(61);
pub const G1: Square = Square(62);
pub const H1: Square = Square(63);

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Team {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
}

impl Team {
    pub fn toggle(self) -> Team {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    /// The sign of this team's forward direction in square indices. White advances towards index 0, Black towards
    /// index 63.
    pub const fn direction(self) -> i8 {
        match self {
            Team::White => -1,
            Team::Black => 1,
        }
    }

    /// The row this team's pawns start on.
    pub const fn pawn_start_rank(self) -> SquareSet {
        match self {
            Team::White => SS_RANK_2,
            Team::Black => SS_RANK_7,
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn is_king(self) -> bool {
        self == PieceKind::King
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        write!(f, "{}", c)
    }
}

/// Parses a FEN piece letter into its team and kind. Uppercase letters are White.
pub fn parse_piece_char(value: char) -> Result<(Team, PieceKind), PieceParseError> {
    let kind = match value.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return Err(PieceParseError::InvalidChar(value)),
    };

    let team = if value.is_ascii_uppercase() {
        Team::White
    } else {
        Team::Black
    };

    Ok((team, kind))
}

pub struct AllSquares(u8, u8);

impl Iterator for AllSquares {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 >= self.1 {
            None
        } else {
            let next = self.0;
            self.0 += 1;
            Some(Square(next))
        }
    }
}

impl Default for AllSquares {
    fn default() -> Self {
        AllSquares(0, 64)
    }
}

pub fn squares() -> AllSquares {
    AllSquares::default()
}

pub fn teams() -> ::std::vec::IntoIter<Team> {
    vec![Team::White, Team::Black].into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn row_and_column() {
        assert_eq!(0, A8.row());
        assert_eq!(0, A8.column());
        assert_eq!(7, H1.row());
        assert_eq!(7, H1.column());
        assert_eq!(6, E2.row());
        assert_eq!(4, E2.column());
        assert_eq!(E2, Square::of(6, 4));
        assert_eq!(H8, Square::of(0, 7));
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(Some(E4), E2.offset(-16));
        assert_eq!(None, A8.offset(-1));
        assert_eq!(None, H1.offset(1));
        // raw arithmetic happily wraps from the h-file to the a-file; callers must guard against that.
        assert_eq!(Some(A7), H8.offset(1));
    }

    #[test]
    fn square_out_of_range() {
        assert_eq!(
            SquareParseError::OutOfRange(64),
            Square::try_from(64).unwrap_err()
        );
        assert_eq!(H1, Square::try_from(63).unwrap());
    }

    #[test]
    fn square_from_str() {
        assert_eq!(E2, "e2".parse::<Square>().unwrap());
        assert!("z9".parse::<Square>().is_err());
    }

    #[test]
    fn team_direction() {
        assert_eq!(-1, Team::White.direction());
        assert_eq!(1, Team::Black.direction());
        assert_eq!(Team::Black, Team::White.toggle());
        assert_eq!("white", Team::White.to_string());
    }

    #[test]
    fn piece_chars() {
        assert_eq!(
            (Team::White, PieceKind::Knight),
            parse_piece_char('N').unwrap()
        );
        assert_eq!((Team::Black, PieceKind::King), parse_piece_char('k').unwrap());
        assert_eq!(
            PieceParseError::InvalidChar('z'),
            parse_piece_char('z').unwrap_err()
        );
    }
}
