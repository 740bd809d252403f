// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Players, and the rules that depend on a king: check, checkmate, stalemate, and whether a move may be made.

use derive_more::Display;
use serde::Serialize;

use crate::{core::*, position::Position};

/// One side of a position.
///
/// A player is a borrowed view of a [`Position`] from one team's point of view. Everything it reports is derived from
/// the position on demand; nothing is stored.
#[derive(Copy, Clone, Debug)]
pub struct Player<'a> {
    position: &'a Position,
    team: Team,
}

impl<'a> Player<'a> {
    pub fn new(position: &'a Position, team: Team) -> Player<'a> {
        Player { position, team }
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn position(&self) -> &'a Position {
        self.position
    }

    /// Returns this player's pieces that are still on the board.
    pub fn active_pieces(&self) -> &'a [Piece] {
        self.position.pieces(self.team)
    }

    pub fn opponent(&self) -> Player<'a> {
        self.position.player(self.team.toggle())
    }

    /// Returns this player's king.
    ///
    /// Panics if the player does not have exactly one king; no check-related query means anything otherwise.
    pub fn king(&self) -> Piece {
        let mut kings = self.active_pieces().iter().filter(|p| p.kind.is_king());
        match (kings.next(), kings.next()) {
            (Some(&king), None) => king,
            (None, _) => panic!("{} has no king: {:?}", self.team, self.position),
            (Some(_), Some(_)) => panic!("{} has more than one king: {:?}", self.team, self.position),
        }
    }

    /// Returns this player's pseudo-legal moves.
    pub fn moves(&self) -> &'a [Move] {
        self.position.moves(self.team)
    }

    /// Returns the opponent's pseudo-legal moves.
    pub fn opponent_moves(&self) -> &'a [Move] {
        self.position.moves(self.team.toggle())
    }

    /// Returns the set of squares the opponent has a pseudo-legal move to.
    pub fn attacked_squares(&self) -> SquareSet {
        self.opponent_moves().iter().map(|m| m.destination()).collect()
    }

    /// Returns whether or not any of the opponent's pseudo-legal moves lands on this player's king.
    pub fn is_in_check(&self) -> bool {
        let king = self.king().square;
        self.opponent_moves().iter().any(|m| m.destination() == king)
    }

    /// Returns whether or not this player has at least one move that leaves its king safe.
    pub fn has_escape_moves(&self) -> bool {
        let _span = tracing::debug_span!("escape_moves", team = %self.team).entered();
        self.moves().iter().any(|&mov| self.keeps_king_safe(mov))
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_escape_moves()
    }

    pub fn is_in_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_escape_moves()
    }

    /// Returns the pseudo-legal moves of this player that do not leave its own king attacked.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.moves()
            .iter()
            .copied()
            .filter(|&mov| self.keeps_king_safe(mov))
            .collect()
    }

    /// Attempts to make a move on behalf of this player.
    ///
    /// The move must be one of this player's pseudo-legal moves, and must not leave this player's king attacked. If
    /// either condition fails, the transition leads back to the very same position that it started from.
    pub fn make_move(&self, mov: Move) -> MoveTransition {
        if !self.moves().contains(&mov) {
            tracing::debug!(team = %self.team, mov = %mov, "rejected move: not available");
            return self.rejected(mov, MoveStatus::IllegalMove);
        }

        let candidate = mov.execute(self.position);
        if candidate.player(self.team).is_in_check() {
            tracing::debug!(team = %self.team, mov = %mov, "rejected move: king would be attacked");
            return self.rejected(mov, MoveStatus::LeavesPlayerInCheck);
        }

        tracing::debug!(team = %self.team, mov = %mov, "made move");
        MoveTransition {
            from: self.position.clone(),
            mov,
            to: candidate,
            status: MoveStatus::Done,
        }
    }

    fn keeps_king_safe(&self, mov: Move) -> bool {
        !mov.execute(self.position).player(self.team).is_in_check()
    }

    fn rejected(&self, mov: Move, status: MoveStatus) -> MoveTransition {
        MoveTransition {
            from: self.position.clone(),
            mov,
            to: self.position.clone(),
            status,
        }
    }
}

/// The outcome of an attempt to make a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize)]
pub enum MoveStatus {
    /// The move was made.
    #[display(fmt = "done")]
    Done,
    /// The move is not one the player can make on this position.
    #[display(fmt = "illegal move")]
    IllegalMove,
    /// The move would leave the player's own king attacked.
    #[display(fmt = "leaves player in check")]
    LeavesPlayerInCheck,
}

impl MoveStatus {
    pub fn is_done(self) -> bool {
        self == MoveStatus::Done
    }
}

/// A move attempt: where it started, what was tried, where it led, and whether it was allowed.
#[derive(Clone, Debug, Display)]
#[display(fmt = "{} ({})", mov, status)]
pub struct MoveTransition {
    from: Position,
    mov: Move,
    to: Position,
    status: MoveStatus,
}

impl MoveTransition {
    /// Returns the position the move was attempted on.
    pub fn from_position(&self) -> &Position {
        &self.from
    }

    pub fn attempted_move(&self) -> Move {
        self.mov
    }

    /// Returns the resulting position. Unless the move was made, this is the position the move was attempted on.
    pub fn to_position(&self) -> &Position {
        &self.to
    }

    pub fn into_position(self) -> Position {
        self.to
    }

    pub fn status(&self) -> MoveStatus {
        self.status
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }
}
