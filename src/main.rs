//! Checkers-Rust: an 8x8 checkers engine with a random opponent.
//!
//! ## Usage
//!
//! - `checkers-rust` - Play against the computer in the terminal
//! - `checkers-rust play` - Same as above
//! - `checkers-rust demo` - Watch a random self-play game

use anyhow::Result;
use clap::{Parser, Subcommand};

use checkers_rust::board::Player;
use checkers_rust::cli::Session;
use checkers_rust::constants::MAX_GAME_LEN;
use checkers_rust::engine::Game;
use checkers_rust::opponent::Opponent;

/// Checkers-Rust: an 8x8 checkers engine with a random opponent
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer over stdin/stdout
    Play,
    /// Watch a random-vs-random self-play game
    Demo {
        /// RNG seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Demo { seed }) => run_demo(seed),
        Some(Commands::Play) | None => {
            let mut session = Session::new();
            session.run()
        }
    }
}

/// Play both sides with the random opponent until someone wins, a
/// side is stuck, or the ply cap is reached.
fn run_demo(seed: Option<u64>) -> Result<()> {
    let mut game = Game::new();
    let mut picker = match seed {
        Some(seed) => Opponent::with_seed(seed),
        None => Opponent::new(),
    };

    let mut plies = 0;
    while game.winner().is_none() && plies < MAX_GAME_LEN {
        let side = game.side_to_move();
        match picker.choose_move(game.board(), side) {
            Some(mv) => {
                game.try_move(mv.from, mv.to);
                plies += 1;
            }
            None => {
                game.forfeit_stalemate();
                break;
            }
        }
    }

    println!("{}", game.board());
    println!(
        "after {plies} plies: {} men + kings for player 1, {} for player 2",
        game.board().count(Player::One),
        game.board().count(Player::Two),
    );
    match game.winner() {
        Some(winner) => println!("{winner} wins"),
        None => println!("no result within {MAX_GAME_LEN} plies"),
    }
    Ok(())
}
