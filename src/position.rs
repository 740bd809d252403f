// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{
    array, fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use thiserror::Error;

use crate::{
    core::{self, *},
    movegen,
    player::Player,
};

/// A position, representing the state of a chess game after some number of half-moves.
///
/// Positions are immutable. Making a move produces a new position and leaves the old one alone, so a `Position` is
/// a cheap handle around shared, reference-counted state. Cloning a position clones the handle; [`Position::ptr_eq`]
/// can tell whether two handles refer to the very same position.
///
/// Both teams' pseudo-legal moves are computed once, when the position is built, and cached for the position's
/// lifetime.
#[derive(Clone)]
pub struct Position {
    board: Arc<Board>,
}

struct Board {
    /// One tile per square, in square index order.
    tiles: [Tile; 64],
    /// White's pieces, in square index order.
    white_pieces: Vec<Piece>,
    /// Black's pieces, in square index order.
    black_pieces: Vec<Piece>,
    /// White's pseudo-legal moves.
    white_moves: Vec<Move>,
    /// Black's pseudo-legal moves.
    black_moves: Vec<Move>,
    /// Team whose turn it is to move.
    side_to_move: Team,
}

impl Position {
    pub fn tile(&self, square: Square) -> &Tile {
        &self.board.tiles[square.index()]
    }

    pub fn tiles(&self) -> &[Tile; 64] {
        &self.board.tiles
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.tile(square).piece()
    }

    /// Returns the pieces belonging to the given team, ordered by square index.
    pub fn pieces(&self, team: Team) -> &[Piece] {
        match team {
            Team::White => &self.board.white_pieces,
            Team::Black => &self.board.black_pieces,
        }
    }

    /// Returns the pseudo-legal moves of the given team. These are computed regardless of whose turn it is.
    pub fn moves(&self, team: Team) -> &[Move] {
        match team {
            Team::White => &self.board.white_moves,
            Team::Black => &self.board.black_moves,
        }
    }

    /// Iterates over the pseudo-legal moves of both teams, White's first.
    pub fn all_moves(&self) -> impl Iterator<Item = &Move> {
        self.board
            .white_moves
            .iter()
            .chain(self.board.black_moves.iter())
    }

    pub fn side_to_move(&self) -> Team {
        self.board.side_to_move
    }

    pub fn player(&self, team: Team) -> Player<'_> {
        Player::new(self, team)
    }

    pub fn white_player(&self) -> Player<'_> {
        self.player(Team::White)
    }

    pub fn black_player(&self) -> Player<'_> {
        self.player(Team::Black)
    }

    /// Returns the player whose turn it is to move.
    pub fn current_player(&self) -> Player<'_> {
        self.player(self.side_to_move())
    }

    /// Returns whether or not two handles refer to the same position, as opposed to two equal positions.
    pub fn ptr_eq(&self, other: &Position) -> bool {
        Arc::ptr_eq(&self.board, &other.board)
    }
}

/// Accumulates square assignments for a new [`Position`].
///
/// A builder starts out empty with White to move. Setting a piece overwrites whatever was previously assigned to that
/// piece's square.
#[derive(Clone, Debug)]
pub struct Builder {
    pieces: [Option<Piece>; 64],
    move_maker: Team,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            pieces: [None; 64],
            move_maker: Team::White,
        }
    }

    pub fn set_piece(&mut self, piece: Piece) -> &mut Builder {
        self.pieces[piece.square.index()] = Some(piece);
        self
    }

    pub fn set_move_maker(&mut self, team: Team) -> &mut Builder {
        self.move_maker = team;
        self
    }

    /// Builds a position from the current assignments. The builder can be reused afterwards.
    pub fn build(&self) -> Position {
        let tiles: [Tile; 64] = array::from_fn(|idx| match self.pieces[idx] {
            Some(piece) => Tile::occupied(piece),
            None => Tile::empty(Square::of((idx / 8) as u8, (idx % 8) as u8)),
        });

        let mut white_pieces = Vec::new();
        let mut black_pieces = Vec::new();
        for piece in tiles.iter().filter_map(|tile| tile.piece()) {
            match piece.team {
                Team::White => white_pieces.push(piece),
                Team::Black => black_pieces.push(piece),
            }
        }

        let mut white_moves = Vec::new();
        let mut black_moves = Vec::new();
        for &piece in &white_pieces {
            movegen::generate_for_tiles(piece, &tiles, &mut white_moves);
        }

        for &piece in &black_pieces {
            movegen::generate_for_tiles(piece, &tiles, &mut black_moves);
        }

        tracing::trace!(
            white_pieces = white_pieces.len(),
            black_pieces = black_pieces.len(),
            white_moves = white_moves.len(),
            black_moves = black_moves.len(),
            side_to_move = %self.move_maker,
            "built position"
        );

        Position {
            board: Arc::new(Board {
                tiles,
                white_pieces,
                black_pieces,
                white_moves,
                black_moves,
                side_to_move: self.move_maker,
            }),
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

fn home_row(team: Team) -> u8 {
    match team {
        Team::White => 7,
        Team::Black => 0,
    }
}

/// Returns whether or not a piece of this kind and team starts the game on the given square.
fn is_start_square(kind: PieceKind, team: Team, square: Square) -> bool {
    match kind {
        PieceKind::Pawn => team.pawn_start_rank().contains(square),
        _ => square.row() == home_row(team) && BACK_RANK[square.column() as usize] == kind,
    }
}

//
// FEN parsing and generation.
//
// Only the placement and side-to-move fields carry any meaning here; without castling or en-passant, the remaining
// fields are checked for well-formedness and then dropped. They may also be left off entirely.
//

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum FenParseError {
    #[error("unexpected char: {0}")]
    UnexpectedChar(char),
    #[error("unexpected EOF while reading")]
    UnexpectedEnd,
    #[error("invalid digit")]
    InvalidDigit,
    #[error("file does not sum to 8")]
    FileDoesNotSumToEight,
    #[error("unknown piece: {0}")]
    UnknownPiece(char),
    #[error("invalid side to move")]
    InvalidSideToMove,
    #[error("invalid castle")]
    InvalidCastle,
    #[error("invalid en-passant")]
    InvalidEnPassant,
    #[error("empty halfmove")]
    EmptyHalfmove,
    #[error("invalid halfmove")]
    InvalidHalfmove,
    #[error("empty fullmove")]
    EmptyFullmove,
    #[error("invalid fullmove")]
    InvalidFullmove,
    #[error("expected exactly one {0} king, found {1}")]
    KingCount(Team, usize),
}

impl Position {
    /// Returns the standard starting position, White to move.
    pub fn from_start_position() -> Position {
        let mut builder = Builder::new();
        for team in core::teams() {
            for (column, &kind) in BACK_RANK.iter().enumerate() {
                let square = Square::of(home_row(team), column as u8);
                builder.set_piece(Piece::new(kind, team, square));
            }

            for square in team.pawn_start_rank() {
                builder.set_piece(Piece::pawn(team, square));
            }
        }

        builder.set_move_maker(Team::White).build()
    }

    /// Constructs a new position from a FEN representation of a board position.
    ///
    /// A piece is considered not to have moved if it stands on a square where a piece of its kind and team starts the
    /// game; every other piece is considered to have moved.
    pub fn from_fen(fen: impl AsRef<str>) -> Result<Position, FenParseError> {
        use std::{iter::Peekable, str::Chars};

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat(iter: &mut Stream<'_>, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn advance(iter: &mut Stream<'_>) -> Result<(), FenParseError> {
            let _ = iter.next();
            Ok(())
        }

        fn peek(iter: &mut Stream<'_>) -> Result<char, FenParseError> {
            if let Some(c) = iter.peek() {
                Ok(*c)
            } else {
                Err(FenParseError::UnexpectedEnd)
            }
        }

        fn eat_side_to_move(iter: &mut Stream<'_>) -> Result<Team, FenParseError> {
            let side = match peek(iter)? {
                'w' => Team::White,
                'b' => Team::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            advance(iter)?;
            Ok(side)
        }

        fn eat_castle_status(iter: &mut Stream<'_>) -> Result<(), FenParseError> {
            if peek(iter)? == '-' {
                return advance(iter);
            }

            for _ in 0..4 {
                match peek(iter)? {
                    'K' | 'Q' | 'k' | 'q' => {}
                    ' ' => break,
                    _ => return Err(FenParseError::InvalidCastle),
                }

                advance(iter)?;
            }

            Ok(())
        }

        fn eat_en_passant(iter: &mut Stream<'_>) -> Result<(), FenParseError> {
            let file = peek(iter)?;
            if file == '-' {
                return advance(iter);
            }

            advance(iter)?;
            let rank = peek(iter)?;
            let name: String = [file, rank].iter().collect();
            if notation::square_named(&name).is_none() {
                return Err(FenParseError::InvalidEnPassant);
            }

            advance(iter)
        }

        fn eat_halfmove(iter: &mut Stream<'_>) -> Result<u16, FenParseError> {
            let mut buf = String::new();
            loop {
                let c = peek(iter)?;
                if !c.is_ascii_digit() {
                    break;
                }

                buf.push(c);
                advance(iter)?;
            }

            if buf.is_empty() {
                return Err(FenParseError::EmptyHalfmove);
            }

            buf.parse::<u16>()
                .map_err(|_| FenParseError::InvalidHalfmove)
        }

        fn eat_fullmove(iter: &mut Stream<'_>) -> Result<u16, FenParseError> {
            let mut buf = String::new();
            for ch in iter {
                if !ch.is_ascii_digit() {
                    if buf.is_empty() {
                        return Err(FenParseError::EmptyFullmove);
                    }

                    break;
                }

                buf.push(ch);
            }

            if buf.is_empty() {
                return Err(FenParseError::EmptyFullmove);
            }

            buf.parse::<u16>()
                .map_err(|_| FenParseError::InvalidFullmove)
        }

        let mut builder = Builder::new();
        let mut kings = [0usize; 2];
        let iter = &mut fen.as_ref().chars().peekable();
        for row in 0..8u8 {
            let mut column = 0;
            while column <= 7 {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_ascii_digit() {
                    if !('1'..='8').contains(&c) {
                        return Err(FenParseError::InvalidDigit);
                    }

                    column += c as u8 - b'0';
                    if column > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    advance(iter)?;
                    continue;
                }

                // if it's not a digit, it represents a piece.
                let (team, kind) =
                    parse_piece_char(c).map_err(|_| FenParseError::UnknownPiece(c))?;
                let square = Square::of(row, column);
                let piece = Piece::new(kind, team, square)
                    .with_moved(!is_start_square(kind, team, square));
                if kind.is_king() {
                    kings[team as usize] += 1;
                }

                builder.set_piece(piece);
                advance(iter)?;
                column += 1;
            }

            if row != 7 {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        builder.set_move_maker(eat_side_to_move(iter)?);
        if iter.peek().is_some() {
            eat(iter, ' ')?;
            eat_castle_status(iter)?;
            eat(iter, ' ')?;
            eat_en_passant(iter)?;
            eat(iter, ' ')?;
            eat_halfmove(iter)?;
            eat(iter, ' ')?;
            eat_fullmove(iter)?;
        }

        for team in core::teams() {
            if kings[team as usize] != 1 {
                return Err(FenParseError::KingCount(team, kings[team as usize]));
            }
        }

        Ok(builder.build())
    }

    /// Renders this position as FEN. Castling and en-passant are always absent and the clocks always read "0 1".
    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for row in 0..8 {
            let mut empty_squares = 0;
            for column in 0..8 {
                if let Some(piece) = self.piece_at(Square::of(row, column)) {
                    if empty_squares != 0 {
                        buf.push_str(&empty_squares.to_string());
                    }
                    buf.push_str(&piece.to_string());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if row != 7 {
                buf.push('/');
            }
        }

        buf.push(' ');
        match self.side_to_move() {
            Team::White => buf.push('w'),
            Team::Black => buf.push('b'),
        }
        buf.push_str(" - - 0 1");
        buf
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..8 {
            for column in 0..8 {
                if let Some(piece) = self.piece_at(Square::of(row, column)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", 8 - row)?;
        }

        for _ in 0..8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in 'a'..='h' {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Position").field(&self.as_fen()).finish()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Position) -> bool {
        self.ptr_eq(other)
            || (self.board.side_to_move == other.board.side_to_move
                && self.board.tiles == other.board.tiles)
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H>(&self, hasher: &mut H)
    where
        H: Hasher,
    {
        self.board.tiles.hash(hasher);
        self.board.side_to_move.hash(hasher);
    }
}
