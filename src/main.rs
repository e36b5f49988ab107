//! othello-rs: Othello with bonus cells.
//!
//! ## Usage
//!
//! - `othello-rs` - Play one random-vs-random demo game
//! - `othello-rs play` - Start the text protocol on stdin/stdout
//! - `othello-rs selfplay --games 100` - Play many random games and summarize
//!
//! Set `RUST_LOG=debug` to trace every move.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use othello_rs::board::{Outcome, Player};
use othello_rs::constants::DEFAULT_BONUS_CELLS;
use othello_rs::game::{BoardSize, GameConfig, GameSession, Mode, Turn};
use othello_rs::protocol::TextEngine;

/// Othello/Reversi with bonus cells and a random opponent
#[derive(Parser)]
#[command(name = "othello-rs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol for terminal play or GUI front ends
    Play {
        /// Board size: S, M, L or 6, 8, 10
        #[arg(long, default_value = "M")]
        size: BoardSize,
        /// solo (against the random player) or duel (two humans)
        #[arg(long, default_value = "solo")]
        mode: Mode,
        /// Seed for bonus cells and computer moves
        #[arg(long)]
        seed: Option<u64>,
        /// Number of bonus markers to place
        #[arg(long, default_value_t = DEFAULT_BONUS_CELLS)]
        bonus_cells: usize,
    },
    /// Play random-vs-random games and print the results
    Selfplay {
        /// Board size: S, M, L or 6, 8, 10
        #[arg(long, default_value = "M")]
        size: BoardSize,
        /// Number of games to play
        #[arg(long, default_value_t = 1)]
        games: usize,
        /// Seed for the first game; later games use consecutive seeds
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            size,
            mode,
            seed,
            bonus_cells,
        }) => {
            let config = GameConfig {
                size,
                mode,
                bonus_cells,
                seed,
                ..GameConfig::default()
            };
            let mut engine = TextEngine::new(config).context("failed to create game")?;
            engine.run().context("protocol I/O failed")?;
        }
        Some(Commands::Selfplay { size, games, seed }) => run_selfplay(size, games, seed)?,
        None => run_selfplay(BoardSize::default(), 1, None)?,
    }
    Ok(())
}

fn run_selfplay(size: BoardSize, games: usize, seed: Option<u64>) -> Result<()> {
    let mut tally = [0usize; 3];

    for game in 0..games {
        let config = GameConfig {
            size,
            mode: Mode::Duel,
            seed: seed.map(|s| s.wrapping_add(game as u64)),
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config).context("failed to create game")?;

        let outcome = loop {
            if let Turn::Finished(outcome) = session.genmove()? {
                break outcome;
            }
        };

        let black = session.score(Player::Black);
        let white = session.score(Player::White);
        println!(
            "game {}: {outcome} (black {black}, white {white}, {} turns)",
            game + 1,
            session.turns()
        );
        if games == 1 {
            println!("{}", session.board());
        }

        let slot = match outcome {
            Outcome::BlackWins => 0,
            Outcome::WhiteWins => 1,
            Outcome::Tie => 2,
        };
        tally[slot] += 1;
    }

    info!("finished {games} games on {size}");
    println!(
        "black {} / white {} / tie {}",
        tally[0], tally[1], tally[2]
    );
    Ok(())
}
