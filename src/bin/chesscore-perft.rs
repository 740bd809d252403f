// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{thread, time::Instant};

use anyhow::{anyhow, Context};
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use chesscore::core::Move;
use chesscore::Position;

/// Counts the leaf nodes of the legal move tree below a position.
#[derive(Debug, StructOpt)]
struct Options {
    /// The depth to search to.
    #[structopt(short, long)]
    depth: u32,

    /// FEN representation of the position to analyze. Defaults to the starting position.
    #[structopt(name = "FEN")]
    fen: Option<String>,

    /// Number of worker threads. Defaults to the number of CPUs.
    #[structopt(short, long)]
    threads: Option<usize>,
}

pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let player = pos.current_player();
    player
        .moves()
        .iter()
        .map(|&mov| {
            let transition = player.make_move(mov);
            if transition.is_done() {
                perft(transition.to_position(), depth - 1)
            } else {
                0
            }
        })
        .sum()
}

fn divide(pos: &Position, roots: &[Move], depth: u32) -> Vec<(Move, u64)> {
    roots
        .iter()
        .map(|&mov| {
            let count = perft(&mov.execute(pos), depth - 1);
            tracing::info!(mov = %mov, count, "finished root move");
            (mov, count)
        })
        .collect()
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

    if ops.depth == 0 {
        println!("1");
        return Ok(());
    }

    let start = Instant::now();
    let threads = ops.threads.unwrap_or_else(num_cpus::get).max(1);
    let roots = pos.current_player().legal_moves();
    let chunk_size = ((roots.len() + threads - 1) / threads).max(1);
    tracing::info!(threads, roots = roots.len(), "starting perft");

    let pos = &pos;
    let depth = ops.depth;
    let results = thread::scope(|s| {
        let handles: Vec<_> = roots
            .chunks(chunk_size)
            .map(|chunk| s.spawn(move || divide(pos, chunk, depth)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| anyhow!("perft worker panicked")))
            .collect::<anyhow::Result<Vec<_>>>()
    })?;

    let mut total = 0;
    for (mov, count) in results.into_iter().flatten() {
        println!("{}: {}", mov, count);
        total += count;
    }

    println!();
    println!("{}", total);
    tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "perft complete");
    Ok(())
}
