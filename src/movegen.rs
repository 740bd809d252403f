// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation.
//!
//! Every generator here produces the moves a piece could make given the board's edges and occupancy, and nothing
//! more: a move that leaves the mover's own king attacked is still generated. Filtering those out is the job of
//! [`Player::make_move`](crate::player::Player::make_move).
//!
//! Pieces step through square indices using fixed deltas. A delta that moves sideways wraps around the board when
//! applied to a square on the a- or h-file (h4 + 1 is a3), so each generator checks the file of the square it is
//! stepping *from* against the delta it is about to apply.

use crate::core::*;
use crate::Position;

const KNIGHT_OFFSETS: [i8; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const BISHOP_OFFSETS: [i8; 4] = [-9, -7, 7, 9];
const ROOK_OFFSETS: [i8; 4] = [-8, -1, 1, 8];
const QUEEN_OFFSETS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

/// Generates the pseudo-legal moves of every piece belonging to `us`.
pub fn generate_moves(us: Team, pos: &Position, moves: &mut Vec<Move>) {
    for &piece in pos.pieces(us) {
        generate_for_tiles(piece, pos.tiles(), moves);
    }
}

/// Generates the pseudo-legal moves of a single piece standing on `pos`.
pub fn generate_piece_moves(piece: Piece, pos: &Position, moves: &mut Vec<Move>) {
    generate_for_tiles(piece, pos.tiles(), moves);
}

/// Generates moves against a bare tile array. Positions use this while they are being built, before there is a
/// `Position` to hand out.
pub(crate) fn generate_for_tiles(piece: Piece, tiles: &[Tile; 64], moves: &mut Vec<Move>) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(piece, tiles, moves),
        PieceKind::Knight => {
            generate_step_moves(piece, tiles, &KNIGHT_OFFSETS, is_knight_excluded, moves)
        }
        PieceKind::Bishop => generate_sliding_moves(piece, tiles, &BISHOP_OFFSETS, moves),
        PieceKind::Rook => generate_sliding_moves(piece, tiles, &ROOK_OFFSETS, moves),
        PieceKind::Queen => generate_sliding_moves(piece, tiles, &QUEEN_OFFSETS, moves),
        PieceKind::King => {
            generate_step_moves(piece, tiles, &QUEEN_OFFSETS, is_edge_excluded, moves)
        }
    }
}

fn generate_pawn_moves(pawn: Piece, tiles: &[Tile; 64], moves: &mut Vec<Move>) {
    let dir = pawn.team.direction();
    let is_empty = |sq: Square| !tiles[sq.index()].is_occupied();

    // Single push.
    if let Some(target) = pawn.square.offset(8 * dir) {
        if is_empty(target) {
            moves.push(Move::pawn(pawn, target));
        }
    }

    // Double push, only for a pawn that is still on its starting rank and has never moved.
    if !pawn.has_moved && pawn.team.pawn_start_rank().contains(pawn.square) {
        if let (Some(between), Some(target)) =
            (pawn.square.offset(8 * dir), pawn.square.offset(16 * dir))
        {
            if is_empty(between) && is_empty(target) {
                moves.push(Move::pawn_jump(pawn, target));
            }
        }
    }

    // Diagonal captures.
    for offset in [7, 9] {
        if is_pawn_capture_excluded(pawn.team, pawn.square, offset) {
            continue;
        }

        if let Some(target) = pawn.square.offset(offset * dir) {
            if let Some(occupant) = tiles[target.index()].piece() {
                if occupant.team != pawn.team {
                    moves.push(Move::pawn_attack(pawn, target, occupant));
                }
            }
        }
    }
}

fn generate_step_moves(
    piece: Piece,
    tiles: &[Tile; 64],
    offsets: &[i8],
    excluded: fn(Square, i8) -> bool,
    moves: &mut Vec<Move>,
) {
    for &offset in offsets {
        if excluded(piece.square, offset) {
            continue;
        }

        if let Some(target) = piece.square.offset(offset) {
            match tiles[target.index()].piece() {
                None => moves.push(Move::major(piece, target)),
                Some(occupant) if occupant.team != piece.team => {
                    moves.push(Move::attack(piece, target, occupant))
                }
                Some(_) => {}
            }
        }
    }
}

fn generate_sliding_moves(piece: Piece, tiles: &[Tile; 64], offsets: &[i8], moves: &mut Vec<Move>) {
    for &offset in offsets {
        let mut current = piece.square;
        loop {
            // The edge check applies to every step of the ray, not just the first.
            if is_edge_excluded(current, offset) {
                break;
            }

            let target = match current.offset(offset) {
                Some(target) => target,
                None => break,
            };

            match tiles[target.index()].piece() {
                None => moves.push(Move::major(piece, target)),
                Some(occupant) => {
                    if occupant.team != piece.team {
                        moves.push(Move::attack(piece, target, occupant));
                    }

                    break;
                }
            }

            current = target;
        }
    }
}

/// Single-square steps in the eight king/queen directions that would wrap around the board.
fn is_edge_excluded(from: Square, offset: i8) -> bool {
    (SS_FILE_A.contains(from) && matches!(offset, -9 | -1 | 7))
        || (SS_FILE_H.contains(from) && matches!(offset, -7 | 1 | 9))
}

/// Knight jumps reach two files over, so the b- and g-files lose the jumps that go two files outward.
fn is_knight_excluded(from: Square, offset: i8) -> bool {
    (SS_FILE_A.contains(from) && matches!(offset, -17 | -10 | 6 | 15))
        || (SS_FILE_B.contains(from) && matches!(offset, -10 | 6))
        || (SS_FILE_G.contains(from) && matches!(offset, -6 | 10))
        || (SS_FILE_H.contains(from) && matches!(offset, -15 | -6 | 10 | 17))
}

/// Pawn capture deltas are given before being multiplied by the team's direction, so which file is dangerous
/// depends on the team: a White pawn's 7-step goes right, a Black pawn's goes left.
fn is_pawn_capture_excluded(team: Team, from: Square, offset: i8) -> bool {
    match (offset, team) {
        (7, Team::White) | (9, Team::Black) => SS_FILE_H.contains(from),
        (7, Team::Black) | (9, Team::White) => SS_FILE_A.contains(from),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{generate_moves, generate_piece_moves};
    use crate::core::*;
    use crate::position::{Builder, Position};

    fn generated_from(pos: &Position, source: Square) -> Vec<Move> {
        let piece = pos
            .piece_at(source)
            .unwrap_or_else(|| panic!("no piece at {}", source));
        let mut moves = Vec::new();
        generate_piece_moves(piece, pos, &mut moves);
        moves
    }

    fn assert_destinations(fen: &'static str, source: Square, expected: &[Square]) {
        let pos = Position::from_fen(fen).unwrap();
        let moves = generated_from(&pos, source);
        let actual: HashSet<_> = moves.iter().map(|m| m.destination()).collect();
        let expected: HashSet<_> = expected.iter().copied().collect();
        if actual != expected || moves.len() != expected.len() {
            println!("{}", pos);
            println!("expected: {:?}", expected);
            println!("moves: {:?}", moves);
            panic!("unexpected destinations from {}", source);
        }
    }

    fn assert_moves_contains(fen: &'static str, source: Square, destinations: &[Square]) {
        let pos = Position::from_fen(fen).unwrap();
        let moves = generated_from(&pos, source);
        for dest in destinations {
            if !moves.iter().any(|m| m.destination() == *dest) {
                println!("{}", pos);
                println!("moves: {:?}", moves);
                panic!("move {}{} was not generated", source, dest);
            }
        }
    }

    fn assert_moves_does_not_contain(fen: &'static str, source: Square, destinations: &[Square]) {
        let pos = Position::from_fen(fen).unwrap();
        let moves = generated_from(&pos, source);
        for dest in destinations {
            if moves.iter().any(|m| m.destination() == *dest) {
                println!("{}", pos);
                panic!("move list contained banned move: {}{}", source, dest);
            }
        }
    }

    mod pawns {
        use super::*;

        #[test]
        fn white_pawn_smoke_test() {
            assert_destinations("4k3/8/8/8/5P2/8/8/4K3 w - - 0 1", F4, &[F5]);
        }

        #[test]
        fn white_pawn_jump() {
            let pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
            let moves = generated_from(&pos, E2);
            assert_eq!(2, moves.len());
            assert!(moves.iter().any(|m| m.destination() == E3 && !m.is_pawn_jump()));
            assert!(moves.iter().any(|m| m.destination() == E4 && m.is_pawn_jump()));
        }

        #[test]
        fn no_jump_when_intermediate_blocked() {
            assert_destinations("4k3/8/8/8/8/4p3/4P3/4K3 w - - 0 1", E2, &[]);
        }

        #[test]
        fn no_jump_when_target_blocked() {
            assert_destinations("4k3/8/8/8/4p3/8/4P3/4K3 w - - 0 1", E2, &[E3]);
        }

        #[test]
        fn no_jump_after_moving() {
            // a pawn that has moved never jumps again, even standing on its starting rank with an open file.
            let pos = Builder::new()
                .set_piece(Piece::king(Team::White, E1))
                .set_piece(Piece::king(Team::Black, E8))
                .set_piece(Piece::pawn(Team::White, D2).with_moved(true))
                .build();
            let moves = generated_from(&pos, D2);
            assert_eq!(1, moves.len());
            assert_eq!(D3, moves[0].destination());
        }

        #[test]
        fn no_jump_off_starting_rank() {
            // has_moved is false, but the pawn is not on its starting rank.
            let pos = Builder::new()
                .set_piece(Piece::king(Team::White, E1))
                .set_piece(Piece::king(Team::Black, E8))
                .set_piece(Piece::pawn(Team::White, D3))
                .build();
            let moves = generated_from(&pos, D3);
            assert_eq!(1, moves.len());
            assert_eq!(D4, moves[0].destination());
        }

        #[test]
        fn white_pawn_captures() {
            let pos = Position::from_fen("4k3/8/8/3p1n2/4P3/8/8/4K3 w - - 0 1").unwrap();
            let moves = generated_from(&pos, E4);
            assert_eq!(3, moves.len());
            let captures: HashSet<_> = moves
                .iter()
                .filter(|m| matches!(m.kind(), MoveKind::PawnAttack(_)))
                .map(|m| m.destination())
                .collect();
            assert_eq!(captures, vec![D5, F5].into_iter().collect());
        }

        #[test]
        fn pawn_does_not_capture_own_piece() {
            assert_destinations("4k3/8/8/3P4/4P3/8/8/4K3 w - - 0 1", E4, &[E5]);
        }

        #[test]
        fn pawn_does_not_capture_forward() {
            assert_destinations("4k3/8/8/4p3/4P3/8/8/4K3 w - - 0 1", E4, &[]);
        }

        #[test]
        fn black_pawn_jump() {
            assert_destinations("4k3/3p4/8/8/8/8/8/4K3 b - - 0 1", D7, &[D6, D5]);
        }

        #[test]
        fn black_pawn_captures() {
            assert_destinations("4k3/8/3p4/2P1P3/8/8/8/4K3 b - - 0 1", D6, &[D5, C5, E5]);
        }

        #[test]
        fn white_pawn_h_file_does_not_wrap() {
            // h3 - 7 lands on a3, which must not count as a diagonal.
            assert_destinations("4k3/8/8/8/8/r6P/8/4K3 w - - 0 1", H3, &[H4]);
        }

        #[test]
        fn black_pawn_a_file_does_not_wrap() {
            // a6 + 7 lands on h6.
            assert_destinations("4k3/8/p6R/8/8/8/8/4K3 b - - 0 1", A6, &[A5]);
        }

        #[test]
        fn pawn_on_last_rank_is_stuck() {
            assert_destinations("3Pk3/8/8/8/8/8/8/4K3 w - - 0 1", D8, &[]);
        }
    }

    mod knights {
        use super::*;

        #[test]
        fn center() {
            assert_destinations(
                "4k3/8/8/8/4N3/8/8/4K3 w - - 0 1",
                E4,
                &[D6, F6, C5, G5, C3, G3, D2, F2],
            );
        }

        #[test]
        fn a_file_corner() {
            assert_destinations("4k3/8/8/8/8/8/8/N3K3 w - - 0 1", A1, &[B3, C2]);
        }

        #[test]
        fn h_file_corner() {
            assert_destinations("4k2N/8/8/8/8/8/8/4K3 w - - 0 1", H8, &[F7, G6]);
        }

        #[test]
        fn b_file() {
            assert_destinations(
                "4k3/8/8/8/1N6/8/8/4K3 w - - 0 1",
                B4,
                &[A6, C6, D5, D3, A2, C2],
            );
        }

        #[test]
        fn g_file() {
            assert_destinations(
                "4k3/8/8/6N1/8/8/8/4K3 w - - 0 1",
                G5,
                &[F7, H7, E6, E4, F3, H3],
            );
        }

        #[test]
        fn captures_and_blocks() {
            let pos = Position::from_fen("4k3/8/3p1P2/8/4N3/8/8/4K3 w - - 0 1").unwrap();
            let moves = generated_from(&pos, E4);
            assert_eq!(7, moves.len());
            let capture = moves.iter().find(|m| m.destination() == D6).unwrap();
            assert_eq!(Some(Piece::pawn(Team::Black, D6).with_moved(true)), capture.captured());
            assert!(!moves.iter().any(|m| m.destination() == F6));
        }
    }

    mod bishops {
        use super::*;

        #[test]
        fn smoke_test() {
            assert_destinations(
                "4k3/8/8/8/3B4/8/8/4K3 w - - 0 1",
                D4,
                &[E5, F6, G7, H8, E3, F2, G1, C3, B2, A1, C5, B6, A7],
            );
        }

        #[test]
        fn smoke_capture() {
            let pos = Position::from_fen("4k3/8/8/2p1p3/3B4/2p1p3/8/4K3 w - - 0 1").unwrap();
            let moves = generated_from(&pos, D4);
            assert_eq!(4, moves.len());
            assert!(moves.iter().all(|m| m.is_attack()));
        }

        #[test]
        fn capture_ends_ray() {
            assert_moves_contains("4k3/8/5p2/8/3B4/8/8/4K3 w - - 0 1", D4, &[E5, F6]);
            assert_moves_does_not_contain("4k3/8/5p2/8/3B4/8/8/4K3 w - - 0 1", D4, &[G7, H8]);
        }

        #[test]
        fn own_piece_blocks_ray() {
            assert_moves_contains("4k3/8/5P2/8/3B4/8/8/4K3 w - - 0 1", D4, &[E5]);
            assert_moves_does_not_contain("4k3/8/5P2/8/3B4/8/8/4K3 w - - 0 1", D4, &[F6, G7]);
        }

        #[test]
        fn a_file() {
            assert_destinations(
                "7k/8/8/8/B7/8/8/7K w - - 0 1",
                A4,
                &[B5, C6, D7, E8, B3, C2, D1],
            );
        }

        #[test]
        fn ray_stops_at_h_file() {
            // b1 up and to the right runs c2..h7; one more step would wrap to a7.
            assert_destinations(
                "7k/8/8/8/8/8/8/1B5K w - - 0 1",
                B1,
                &[A2, C2, D3, E4, F5, G6, H7],
            );
        }
    }

    mod rooks {
        use super::*;

        #[test]
        fn a_file_does_not_wrap() {
            let pos = Position::from_fen("7k/8/8/R7/8/8/8/7K w - - 0 1").unwrap();
            assert_eq!(14, generated_from(&pos, A5).len());
            assert_moves_does_not_contain("7k/8/8/R7/8/8/8/7K w - - 0 1", A5, &[H6]);
        }

        #[test]
        fn h_file_does_not_wrap() {
            let pos = Position::from_fen("k7/8/8/8/7R/8/8/K7 w - - 0 1").unwrap();
            assert_eq!(14, generated_from(&pos, H4).len());
            assert_moves_does_not_contain("k7/8/8/8/7R/8/8/K7 w - - 0 1", H4, &[A3]);
        }

        #[test]
        fn blocked_on_all_sides() {
            assert_destinations("4k3/8/8/3p4/2pRp3/3p4/8/4K3 w - - 0 1", D4, &[D5, C4, E4, D3]);
        }
    }

    mod queens {
        use super::*;

        #[test]
        fn center() {
            let pos = Position::from_fen("1k6/8/8/8/3Q4/8/6K1/8 w - - 0 1").unwrap();
            let moves = generated_from(&pos, D4);
            assert_eq!(27, moves.len());
            assert!(moves.iter().all(|m| !m.is_attack()));
        }
    }

    mod kings {
        use super::*;

        #[test]
        fn h_file() {
            assert_destinations("k7/8/8/8/7K/8/8/8 w - - 0 1", H4, &[G5, H5, G4, G3, H3]);
        }

        #[test]
        fn a_file() {
            assert_destinations("7k/8/8/K7/8/8/8/8 w - - 0 1", A5, &[A6, B6, B5, A4, B4]);
        }

        #[test]
        fn kings_only() {
            let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
            let mut white = Vec::new();
            let mut black = Vec::new();
            generate_moves(Team::White, &pos, &mut white);
            generate_moves(Team::Black, &pos, &mut black);
            assert_eq!(5, white.len());
            assert_eq!(5, black.len());
        }

        #[test]
        fn no_castling() {
            assert_moves_does_not_contain(
                "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
                E1,
                &[G1, C1],
            );
        }
    }

    #[test]
    fn start_position_counts() {
        let pos = Position::from_start_position();
        for team in teams() {
            let mut moves = Vec::new();
            generate_moves(team, &pos, &mut moves);
            assert_eq!(20, moves.len());
        }
    }
}
