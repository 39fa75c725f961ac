//! Checkers-Rust: an 8x8 checkers engine with a random opponent.
//!
//! The crate implements the rules of a simple checkers variant: men
//! step and jump diagonally forward, kings move in either direction,
//! a jump captures the piece in between, and a man reaching the far
//! row is promoted. One capture per turn; there are no forced
//! multi-jump chains. The computer opponent picks uniformly at random
//! among its candidate moves, preferring captures.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine parameters
//! - [`board`] - The 8x8 grid, players, and pieces
//! - [`rules`] - Move legality and capture detection
//! - [`movegen`] - Candidate move enumeration
//! - [`engine`] - The turn state machine (selection, promotion, win detection)
//! - [`opponent`] - The capture-preferring random computer player
//! - [`cli`] - Line-oriented text protocol for interactive play
//!
//! ## Example
//!
//! ```
//! use checkers_rust::engine::Game;
//! use checkers_rust::opponent::Opponent;
//!
//! let mut game = Game::new();
//!
//! // Player one selects the man on (5, 0) and steps to (4, 1).
//! game.select_or_move(5, 0);
//! game.select_or_move(4, 1);
//!
//! // The computer replies through the same engine.
//! let pending = game.schedule_opponent();
//! let mut opponent = Opponent::with_seed(42);
//! let reply = game.play_scheduled(pending, &mut opponent);
//! assert!(reply.is_some());
//! ```

pub mod board;
pub mod cli;
pub mod constants;
pub mod engine;
pub mod movegen;
pub mod opponent;
pub mod rules;
