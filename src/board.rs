use std::fmt;

use crate::constants::SIZE;

/// One of the two sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Forward row direction for this side's men.
    /// Player One moves toward row 0, Player Two toward row 7.
    #[inline]
    pub fn forward(self) -> isize {
        match self {
            Player::One => -1,
            Player::Two => 1,
        }
    }

    /// The row where this side's men are promoted to kings.
    #[inline]
    pub fn promotion_row(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => SIZE - 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub owner: Player,
    pub king: bool,
}

impl Piece {
    pub fn man(owner: Player) -> Self {
        Piece { owner, king: false }
    }

    pub fn king(owner: Player) -> Self {
        Piece { owner, king: true }
    }
}

/// A cell on the board as (row, column), both 0..SIZE.
pub type Square = (usize, usize);

/// Passive 8x8 container of cell contents. No move legality lives
/// here; the only behavior beyond get/set is the starting layout.
#[derive(Clone)]
pub struct Board {
    cells: [Option<Piece>; SIZE * SIZE],
}

impl Board {
    /// Create a board in the canonical starting position: three back
    /// rows of men per side on the dark squares, middle rows empty.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    pub fn empty() -> Self {
        Board {
            cells: [None; SIZE * SIZE],
        }
    }

    fn idx(row: usize, col: usize) -> usize {
        row * SIZE + col
    }

    /// Cell content, or `None` for empty and out-of-bounds alike.
    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        if row >= SIZE || col >= SIZE {
            return None;
        }
        self.cells[Self::idx(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, piece: Option<Piece>) {
        if row < SIZE && col < SIZE {
            self.cells[Self::idx(row, col)] = piece;
        }
    }

    /// Restore the canonical starting layout.
    pub fn reset(&mut self) {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let piece = if (row + col) % 2 == 1 {
                    match row {
                        0..=2 => Some(Piece::man(Player::Two)),
                        5..=7 => Some(Piece::man(Player::One)),
                        _ => None,
                    }
                } else {
                    None
                };
                self.cells[Self::idx(row, col)] = piece;
            }
        }
    }

    /// Live piece count (men and kings combined) for one side.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|p| p.owner == player)
            .count()
    }

    /// All occupied squares with their pieces, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|piece| ((i / SIZE, i % SIZE), piece)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let ch = match self.get(row, col) {
                    Some(Piece { owner: Player::One, king: false }) => 'o',
                    Some(Piece { owner: Player::One, king: true }) => 'O',
                    Some(Piece { owner: Player::Two, king: false }) => 'x',
                    Some(Piece { owner: Player::Two, king: true }) => 'X',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
