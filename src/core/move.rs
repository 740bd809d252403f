// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::core::{notation, Piece, Square};
use crate::position::{Builder, Position};

/// The flavor of a move. Capturing kinds carry the piece they capture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MoveKind {
    /// A quiet move by any piece other than a pawn.
    Major,
    /// A capture by any piece other than a pawn.
    Attack(Piece),
    /// A single-square pawn advance.
    Pawn,
    /// A two-square pawn advance from the pawn's starting rank.
    PawnJump,
    /// A diagonal pawn capture.
    PawnAttack(Piece),
}

/// A move, as produced by the move generator.
///
/// A move records the moving piece as it stood before the move, so the square a move starts from is always the
/// moving piece's square and is never stored separately.
///
/// ## Equality
/// Two moves are equal when they move the same piece (by value) from the same square to the same destination and
/// capture the same piece, if any. The [`MoveKind`] tag does not otherwise participate; a quiet pawn step and a
/// quiet "major" move with the same piece and squares compare equal.
///
/// There is no null move. Lookups that can fail return `Option<Move>`.
#[derive(Copy, Clone, Serialize)]
pub struct Move {
    piece: Piece,
    destination: Square,
    kind: MoveKind,
}

impl Move {
    /// Constructs a new quiet move of a non-pawn piece.
    pub fn major(piece: Piece, destination: Square) -> Move {
        Move {
            piece,
            destination,
            kind: MoveKind::Major,
        }
    }

    /// Constructs a new capture by a non-pawn piece.
    pub fn attack(piece: Piece, destination: Square, captured: Piece) -> Move {
        debug_assert_eq!(destination, captured.square);
        Move {
            piece,
            destination,
            kind: MoveKind::Attack(captured),
        }
    }

    /// Constructs a new single-square pawn advance.
    pub fn pawn(piece: Piece, destination: Square) -> Move {
        Move {
            piece,
            destination,
            kind: MoveKind::Pawn,
        }
    }

    /// Constructs a new two-square pawn advance.
    pub fn pawn_jump(piece: Piece, destination: Square) -> Move {
        Move {
            piece,
            destination,
            kind: MoveKind::PawnJump,
        }
    }

    /// Constructs a new diagonal pawn capture.
    pub fn pawn_attack(piece: Piece, destination: Square, captured: Piece) -> Move {
        debug_assert_eq!(destination, captured.square);
        Move {
            piece,
            destination,
            kind: MoveKind::PawnAttack(captured),
        }
    }

    /// Returns the moving piece, as it stood before the move.
    pub fn piece(self) -> Piece {
        self.piece
    }

    /// Returns the source square of this move.
    pub fn source(self) -> Square {
        self.piece.square
    }

    /// Returns the destination square of this move.
    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn kind(self) -> MoveKind {
        self.kind
    }

    /// Returns the piece this move captures, if it is a capture.
    pub fn captured(self) -> Option<Piece> {
        match self.kind {
            MoveKind::Attack(piece) | MoveKind::PawnAttack(piece) => Some(piece),
            MoveKind::Major | MoveKind::Pawn | MoveKind::PawnJump => None,
        }
    }

    /// Returns whether or not this move is a capture.
    pub fn is_attack(self) -> bool {
        self.captured().is_some()
    }

    /// Returns whether or not this move is a two-square pawn advance.
    pub fn is_pawn_jump(self) -> bool {
        matches!(self.kind, MoveKind::PawnJump)
    }

    /// Plays this move on `pos`, producing the position that follows it. `pos` is left untouched.
    ///
    /// The mover's pieces are carried over except for the moving piece, which reappears at the destination (marked
    /// as moved); the opponent's pieces are carried over except for the captured piece. The opponent is to move in
    /// the new position.
    ///
    /// Panics if the moving piece is not on `pos`: a move only makes sense against the position that generated it.
    pub fn execute(&self, pos: &Position) -> Position {
        let mover = self.piece.team;
        assert_eq!(
            pos.piece_at(self.source()),
            Some(self.piece),
            "invalid move {:?}: moving piece is not on the board",
            self
        );

        let captured = self.captured();
        let mut builder = Builder::new();
        for &piece in pos.pieces(mover) {
            if piece != self.piece {
                builder.set_piece(piece);
            }
        }

        for &piece in pos.pieces(mover.toggle()) {
            if Some(piece) != captured {
                builder.set_piece(piece);
            }
        }

        builder.set_piece(self.piece.move_to(self.destination));
        builder.set_move_maker(mover.toggle());
        builder.build()
    }

    /// Returns an UCI-compatible string representation of this move, e.g. "e2e4".
    pub fn as_uci(self) -> String {
        format!("{}{}", self.source(), self.destination())
    }

    /// Finds the move on `pos` that goes from `source` to `destination`. Both teams' moves are searched. Returns
    /// `None` if no piece on `pos` can make that move.
    pub fn find(pos: &Position, source: Square, destination: Square) -> Option<Move> {
        pos.all_moves()
            .find(|mov| mov.source() == source && mov.destination() == destination)
            .copied()
    }

    /// Parses the UCI representation of a move ("e2e4") and finds it on `pos`.
    pub fn from_uci(pos: &Position, move_str: &str) -> Option<Move> {
        if move_str.len() != 4 {
            return None;
        }

        let source = notation::square_named(move_str.get(0..2)?)?;
        let destination = notation::square_named(move_str.get(2..4)?)?;
        Move::find(pos, source, destination)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.piece == other.piece
            && self.destination == other.destination
            && self.captured() == other.captured()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.piece.hash(state);
        self.destination.hash(state);
        self.captured().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self.kind {
            MoveKind::Major => write!(f, "{} {}", self.piece, self.as_uci()),
            MoveKind::Pawn => write!(f, "{} {} (pawn)", self.piece, self.as_uci()),
            MoveKind::PawnJump => write!(f, "{} {} (jump)", self.piece, self.as_uci()),
            MoveKind::Attack(captured) | MoveKind::PawnAttack(captured) => {
                write!(f, "{} {} x{}", self.piece, self.as_uci(), captured)
            }
        }
    }
}
