// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::Context;
use serde::Serialize;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use chesscore::core::{Move, Team};
use chesscore::{Player, Position};

/// Lists the moves available to the side to move.
#[derive(Debug, StructOpt)]
struct Options {
    /// FEN representation of the position to analyze. Defaults to the starting position.
    #[structopt(name = "FEN")]
    fen: Option<String>,

    /// List pseudo-legal moves, including moves that would leave the king attacked.
    #[structopt(long)]
    pseudo_legal: bool,

    /// Print the report as JSON.
    #[structopt(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    fen: String,
    side_to_move: Team,
    check: bool,
    checkmate: bool,
    stalemate: bool,
    moves: Vec<Move>,
}

fn status(player: &Player<'_>) -> &'static str {
    if player.is_in_checkmate() {
        "checkmate"
    } else if player.is_in_stalemate() {
        "stalemate"
    } else if player.is_in_check() {
        "check"
    } else {
        "to move"
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("CHESSCORE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let ops = Options::from_args();
    let pos = match &ops.fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("invalid FEN: {}", fen))?,
        None => Position::from_start_position(),
    };

    let player = pos.current_player();
    let moves = if ops.pseudo_legal {
        player.moves().to_vec()
    } else {
        player.legal_moves()
    };

    if ops.json {
        let report = Report {
            fen: pos.as_fen(),
            side_to_move: player.team(),
            check: player.is_in_check(),
            checkmate: player.is_in_checkmate(),
            stalemate: player.is_in_stalemate(),
            moves,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for mov in &moves {
        println!("{}", mov.as_uci());
    }

    println!("{} moves, {}: {}", moves.len(), player.team(), status(&player));
    Ok(())
}
