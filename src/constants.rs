//! Constants for board geometry and engine parameters.

/// Board size (8x8 standard checkers).
pub const SIZE: usize = 8;

/// Number of men per side in the starting position (three back rows).
pub const PIECES_PER_SIDE: usize = 12;

/// Relative offsets probed by the move generator, in fixed order:
/// the four diagonal steps, then the four diagonal jumps.
///
/// The generator keeps the first offset the validator accepts for a
/// piece, so this order decides which move each piece contributes.
pub const PROBE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-2, -2),
    (-2, 2),
    (2, -2),
    (2, 2),
];

/// Ply cap for self-play demo games, so two lone kings shuffling
/// around cannot loop forever.
pub const MAX_GAME_LEN: usize = 200;
