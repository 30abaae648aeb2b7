// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hexplode CLI - headless AI match runner
//!
//! Pits AI strategy chains against each other without a UI, driving
//! the same coordinator loop the windowed game runs, and reports win
//! statistics. Primarily used to compare strategies and as an
//! integration smoke test.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use hexplode_core::ai::AiLevel;
use hexplode_core::game::Game;
use hexplode_core::player::AiPlayer;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    Random,
    Greedy,
    Positional,
    Chain,
}

impl From<Level> for AiLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Random => AiLevel::Random,
            Level::Greedy => AiLevel::Greedy,
            Level::Positional => AiLevel::Positional,
            Level::Chain => AiLevel::Chain,
        }
    }
}

#[derive(Parser)]
#[command(name = "hexplode", about = "Run AI-vs-AI hexplode matches")]
struct Args {
    /// Edge length of the board
    #[arg(long, default_value_t = 3)]
    board_size: i32,

    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: u32,

    /// One AI level per seat, in seating order
    #[arg(long = "player", value_enum, num_args = 1..)]
    players: Vec<Level>,

    /// Seed for reproducible tournaments; entropy-seeded when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the final statistics as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct MatchStats {
    board_size: i32,
    games: u32,
    levels: Vec<AiLevel>,
    wins: Vec<u32>,
    stalemates: u32,
    total_ticks: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let levels: Vec<AiLevel> = if args.players.is_empty() {
        vec![AiLevel::Greedy, AiLevel::Chain]
    } else {
        args.players.iter().map(|&l| AiLevel::from(l)).collect()
    };
    if levels.len() < 2 {
        bail!("need at least two players");
    }
    if args.board_size < 1 {
        bail!("board size must be at least 1");
    }

    let mut seed_rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = Game::new(args.board_size);
    for &level in &levels {
        game.add_player(Box::new(AiPlayer::new(level.build(&mut seed_rng))));
    }

    let mut wins = vec![0u32; levels.len()];
    let mut stalemates = 0u32;
    let mut total_ticks: u64 = 0;

    for played in 1..=args.games {
        game.reset();
        let winner = loop {
            if !game.tick() {
                // the seat to move has nothing to give; dead position
                break None;
            }
            total_ticks += 1;
            if let Some(winner) = game.winner() {
                break Some(winner);
            }
        };
        match winner {
            Some(winner) => wins[winner] += 1,
            None => stalemates += 1,
        }
        if played % 100 == 0 {
            tracing::info!(played, ?wins, "running tally");
        }
    }

    if args.json {
        let stats = MatchStats {
            board_size: args.board_size,
            games: args.games,
            levels,
            wins,
            stalemates,
            total_ticks,
        };
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        for (player, count) in wins.iter().enumerate() {
            println!("player {player} wins: {count}");
        }
        if stalemates > 0 {
            println!("stalemates: {stalemates}");
        }
        println!("total ticks: {total_ticks}");
    }

    Ok(())
}
