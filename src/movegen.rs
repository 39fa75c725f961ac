//! Legal move enumeration.
//!
//! `legal_moves` scans the board in row-major order and probes the
//! eight diagonal offsets for each of the player's pieces, keeping
//! the first offset the validator accepts. Each piece therefore
//! contributes at most one candidate move, and the result carries no
//! ordering beyond the scan itself. This mirrors the opponent the
//! rules were written for; it is not an exhaustive move list.

use crate::board::{Board, Player, Square};
use crate::constants::{PROBE_OFFSETS, SIZE};
use crate::rules::validate;

/// A candidate move: source, destination, and the jumped square when
/// the move is a capture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub capture: Option<Square>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

/// Enumerate candidate moves for `player`: at most one per piece, the
/// first probe offset the validator accepts.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for ((row, col), piece) in board.pieces() {
        if piece.owner != player {
            continue;
        }
        for &(dr, dc) in &PROBE_OFFSETS {
            let to_row = row as isize + dr;
            let to_col = col as isize + dc;
            if to_row < 0 || to_row >= SIZE as isize || to_col < 0 || to_col >= SIZE as isize {
                continue;
            }
            let to = (to_row as usize, to_col as usize);
            let v = validate(board, (row, col), to, piece);
            if v.legal {
                moves.push(Move {
                    from: (row, col),
                    to,
                    capture: v.capture,
                });
                break;
            }
        }
    }
    moves
}
