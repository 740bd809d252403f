// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Random games from the starting position, checking that every position reached is well-formed.

use std::collections::HashSet;

use chesscore::core::*;
use chesscore::{MoveStatus, Position};
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

const GAMES: u64 = 24;
const MAX_PLIES: usize = 120;

fn assert_well_formed(pos: &Position) {
    let mut occupied = HashSet::new();
    for sq in squares() {
        let tile = pos.tile(sq);
        assert_eq!(sq, tile.square());
        if let Some(piece) = tile.piece() {
            assert_eq!(sq, piece.square, "piece on {} thinks it is elsewhere", sq);
            occupied.insert(sq);
        }
    }

    let mut listed = HashSet::new();
    for team in teams() {
        let mut kings = 0;
        for piece in pos.pieces(team) {
            assert_eq!(team, piece.team);
            assert!(listed.insert(piece.square), "{} listed twice", piece.square);
            if piece.kind.is_king() {
                kings += 1;
            }
        }

        assert_eq!(1, kings, "{} should have exactly one king", team);
    }

    assert_eq!(occupied, listed);
}

#[test]
fn random_playouts() {
    for seed in 0..GAMES {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut pos = Position::from_start_position();
        for _ in 0..MAX_PLIES {
            assert_well_formed(&pos);
            let player = pos.current_player();
            let legal = player.legal_moves();
            assert_eq!(!legal.is_empty(), player.has_escape_moves());

            // every pseudo-legal move that is not legal must be refused without a new position.
            for &mov in player.moves() {
                if !legal.contains(&mov) {
                    let transition = player.make_move(mov);
                    assert_eq!(MoveStatus::LeavesPlayerInCheck, transition.status());
                    assert!(transition.to_position().ptr_eq(&pos));
                }
            }

            let mov = match legal.choose(&mut rng) {
                Some(&mov) => mov,
                None => {
                    assert_ne!(player.is_in_checkmate(), player.is_in_stalemate());
                    assert_eq!(player.is_in_check(), player.is_in_checkmate());
                    break;
                }
            };

            assert_eq!(Some(mov), Move::from_uci(&pos, &mov.as_uci()));
            let transition = player.make_move(mov);
            assert!(transition.is_done(), "seed {}: {:?} rejected", seed, mov);

            let next = transition.into_position();
            assert_eq!(pos.side_to_move().toggle(), next.side_to_move());
            assert!(!next.player(mov.piece().team).is_in_check());
            let moved = next.piece_at(mov.destination()).unwrap();
            assert_eq!(mov.piece().move_to(mov.destination()), moved);
            assert_eq!(None, next.piece_at(mov.source()));
            assert_eq!(next.as_fen(), Position::from_fen(next.as_fen()).unwrap().as_fen());
            pos = next;
        }
    }
}
