// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{anyhow, bail, Context};
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use chesscore::core::Move;
use chesscore::Position;

/// Plays a sequence of moves, in UCI notation, and prints the resulting position.
#[derive(Debug, StructOpt)]
struct Options {
    /// FEN representation of the position to start from. Defaults to the starting position.
    #[structopt(long)]
    fen: Option<String>,

    /// Moves to play, e.g. "e2e4 e7e5". Each move is made by the side to move.
    #[structopt(name = "MOVES")]
    moves: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("CHESSCORE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let ops = Options::from_args();
    let mut pos = match &ops.fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("invalid FEN: {}", fen))?,
        None => Position::from_start_position(),
    };

    for (ply, text) in ops.moves.iter().enumerate() {
        let mov = Move::from_uci(&pos, text)
            .ok_or_else(|| anyhow!("ply {}: no piece can play {} on {}", ply + 1, text, pos.as_fen()))?;
        let transition = pos.current_player().make_move(mov);
        if !transition.is_done() {
            bail!(
                "ply {}: {} rejected ({}) on {}",
                ply + 1,
                text,
                transition.status(),
                pos.as_fen()
            );
        }

        pos = transition.into_position();
    }

    let player = pos.current_player();
    println!("{}", pos);
    println!("{}", pos.as_fen());
    if player.is_in_checkmate() {
        println!("{} is checkmated", player.team());
    } else if player.is_in_stalemate() {
        println!("{} is stalemated", player.team());
    } else if player.is_in_check() {
        println!("{} to move, in check", player.team());
    } else {
        println!("{} to move", player.team());
    }

    Ok(())
}
