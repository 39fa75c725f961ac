//! The computer player.
//!
//! Move choice is uniform random over the generator's candidates,
//! except that capturing moves are always preferred when any exist.
//! The RNG is owned by the opponent and seedable, so tests can pin
//! the choice down exactly.

use crate::board::{Board, Player};
use crate::movegen::{Move, legal_moves};

pub struct Opponent {
    rng: fastrand::Rng,
}

impl Default for Opponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent {
    pub fn new() -> Self {
        Opponent {
            rng: fastrand::Rng::new(),
        }
    }

    /// An opponent with a fixed seed, for deterministic play.
    pub fn with_seed(seed: u64) -> Self {
        Opponent {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Pick a move for `player`: uniformly among captures when any
    /// capture is available, otherwise uniformly among all candidate
    /// moves. `None` when the side has no legal move.
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        let moves = legal_moves(board, player);
        let captures: Vec<Move> = moves.iter().copied().filter(Move::is_capture).collect();
        let pool = if captures.is_empty() { &moves } else { &captures };
        if pool.is_empty() {
            None
        } else {
            Some(pool[self.rng.usize(..pool.len())])
        }
    }
}
