//! Move legality rules.
//!
//! A move is either a *step* (one diagonal cell, non-capturing) or a
//! *jump* (two diagonal cells, capturing the piece in between). Men
//! move forward only; kings move in either row direction. Only the
//! immediate destination is examined, so a jump never continues into
//! a multi-capture chain.

use crate::board::{Board, Piece, Square};
use crate::constants::SIZE;

/// Outcome of validating a candidate move.
///
/// `capture` is the square of the jumped piece when the move is a
/// legal jump, `None` for a legal step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub legal: bool,
    pub capture: Option<Square>,
}

impl Validation {
    fn illegal() -> Self {
        Validation {
            legal: false,
            capture: None,
        }
    }

    fn step() -> Self {
        Validation {
            legal: true,
            capture: None,
        }
    }

    fn jump(over: Square) -> Self {
        Validation {
            legal: true,
            capture: Some(over),
        }
    }
}

/// Decide whether moving `piece` from `from` to `to` is legal.
///
/// Rules, in precedence order:
/// 1. Step: column delta ±1 and row delta matching the piece's
///    forward direction (either direction for kings). Legal iff the
///    destination is empty.
/// 2. Jump: column delta ±2 and row delta ±2 in an allowed direction.
///    Legal iff the midway cell holds an opponent piece and the
///    destination is empty; the midway cell is the capture.
/// 3. Anything else is illegal, including out-of-bounds destinations.
///
/// Pure predicate; the board is never modified.
pub fn validate(board: &Board, from: Square, to: Square, piece: Piece) -> Validation {
    if to.0 >= SIZE || to.1 >= SIZE {
        return Validation::illegal();
    }

    let row_diff = to.0 as isize - from.0 as isize;
    let col_diff = to.1 as isize - from.1 as isize;
    let forward = piece.owner.forward();

    // Step: one diagonal cell onto an empty square.
    if col_diff.abs() == 1 && (row_diff == forward || (piece.king && row_diff.abs() == 1)) {
        return if board.get(to.0, to.1).is_none() {
            Validation::step()
        } else {
            Validation::illegal()
        };
    }

    // Jump: two diagonal cells, over an opponent piece, onto an
    // empty square.
    if col_diff.abs() == 2 && (row_diff == 2 * forward || (piece.king && row_diff.abs() == 2)) {
        let over = ((from.0 + to.0) / 2, (from.1 + to.1) / 2);
        let jumped = board.get(over.0, over.1);
        if jumped.is_some_and(|p| p.owner == piece.owner.opponent())
            && board.get(to.0, to.1).is_none()
        {
            return Validation::jump(over);
        }
    }

    Validation::illegal()
}
