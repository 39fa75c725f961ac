//! The turn state machine.
//!
//! [`Game`] owns the live board and the side to move, and is driven
//! sequentially by exactly one caller per player action. Human input
//! arrives through [`Game::select_or_move`], which toggles between
//! "pick a piece" and "pick a destination"; the computer's reply goes
//! through [`Game::play_scheduled`], which applies the same commit
//! path (promotion, capture removal, win check, turn switch).
//!
//! Illegal destinations are absorbed: the selection is dropped and
//! play continues, with the rejection visible only in the returned
//! [`Action`]. A deferred computer turn is represented by a
//! [`PendingTurn`] token stamped with the game's reset epoch, so a
//! reset that races a pacing delay cancels the stale move instead of
//! applying it to the fresh board.

use crate::board::{Board, Piece, Player, Square};
use crate::movegen::{Move, legal_moves};
use crate::opponent::Opponent;
use crate::rules::validate;

/// Selection phase of the side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No piece chosen yet.
    AwaitingSelection,
    /// A source square has been chosen and awaits a destination.
    PieceSelected(Square),
}

/// What a call to [`Game::select_or_move`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// The square held a piece of the side to move; it is now selected.
    Selected(Square),
    /// The selected piece legally moved to the square.
    Applied(Move),
    /// A destination was supplied but the move was illegal; the
    /// selection has been dropped.
    Rejected,
    /// The input did not address a selectable piece, or the game is
    /// already over.
    Ignored,
}

/// Re-render / game-end notifications for the presentation layer.
///
/// Both hooks default to no-ops so an observer can implement only
/// what it needs.
pub trait GameObserver {
    fn board_changed(&mut self, _board: &Board) {}
    fn game_over(&mut self, _winner: Player) {}
}

/// Token for a deferred computer turn, stamped with the reset epoch
/// current when it was issued.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingTurn {
    epoch: u64,
}

/// A checkers game: board, side to move, selection phase, and winner.
pub struct Game {
    board: Board,
    to_move: Player,
    phase: Phase,
    winner: Option<Player>,
    epoch: u64,
    observer: Option<Box<dyn GameObserver>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Start a game in the standard position, player one to move.
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            to_move: Player::One,
            phase: Phase::AwaitingSelection,
            winner: None,
            epoch: 0,
            observer: None,
        }
    }

    /// Start from an arbitrary position. Useful for driving the
    /// engine from saved or constructed positions; `reset` still
    /// returns to the standard starting layout.
    pub fn with_board(board: Board, to_move: Player) -> Self {
        Game {
            board,
            to_move,
            phase: Phase::AwaitingSelection,
            winner: None,
            epoch: 0,
            observer: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Player {
        self.to_move
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `Some(winner)` once the game has ended, `None` while in play.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Install the notification hook for board changes and game end.
    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = Some(observer);
    }

    /// Restore the starting position with player one to move.
    ///
    /// Bumps the reset epoch, so any [`PendingTurn`] issued before
    /// the reset becomes stale and will not be applied.
    pub fn reset(&mut self) {
        self.board.reset();
        self.to_move = Player::One;
        self.phase = Phase::AwaitingSelection;
        self.winner = None;
        self.epoch += 1;
        self.notify_board_changed();
    }

    /// The single click-driven entry point: select a piece or attempt
    /// a move, depending on the current phase.
    ///
    /// From `AwaitingSelection`, a square holding a piece of the side
    /// to move becomes the selection; anything else is ignored. From
    /// `PieceSelected`, the square is tried as a destination and the
    /// phase returns to `AwaitingSelection` whether or not the move
    /// was legal. After the game has ended all input is ignored until
    /// [`Game::reset`].
    pub fn select_or_move(&mut self, row: usize, col: usize) -> Action {
        if self.winner.is_some() {
            return Action::Ignored;
        }
        match self.phase {
            Phase::AwaitingSelection => {
                if self
                    .board
                    .get(row, col)
                    .is_some_and(|p| p.owner == self.to_move)
                {
                    self.phase = Phase::PieceSelected((row, col));
                    Action::Selected((row, col))
                } else {
                    Action::Ignored
                }
            }
            Phase::PieceSelected(from) => {
                self.phase = Phase::AwaitingSelection;
                match self.try_move(from, (row, col)) {
                    Some(mv) => Action::Applied(mv),
                    None => Action::Rejected,
                }
            }
        }
    }

    /// Validate and apply a move for the side to move.
    ///
    /// Returns the applied move, or `None` when the source does not
    /// hold a piece of the side to move, the move is illegal, or the
    /// game is over. Both the human and the computer path come
    /// through here, so promotion and win handling cannot diverge.
    pub fn try_move(&mut self, from: Square, to: Square) -> Option<Move> {
        if self.winner.is_some() {
            return None;
        }
        let piece = self
            .board
            .get(from.0, from.1)
            .filter(|p| p.owner == self.to_move)?;
        let v = validate(&self.board, from, to, piece);
        if !v.legal {
            return None;
        }
        Some(self.commit(piece, from, to, v.capture))
    }

    /// Mutate the board for a validated move: move the piece, promote
    /// a man reaching its promotion row (kings never demote), remove
    /// the jumped piece, then check for a win. The side to move only
    /// switches if the game did not just end.
    fn commit(&mut self, piece: Piece, from: Square, to: Square, capture: Option<Square>) -> Move {
        let promoted = Piece {
            owner: piece.owner,
            king: piece.king || to.0 == piece.owner.promotion_row(),
        };
        self.board.set(from.0, from.1, None);
        self.board.set(to.0, to.1, Some(promoted));
        if let Some((row, col)) = capture {
            self.board.set(row, col, None);
        }
        self.notify_board_changed();

        let opponent = self.to_move.opponent();
        if self.board.count(opponent) == 0 {
            self.declare_winner(self.to_move);
        } else {
            self.to_move = opponent;
        }
        Move { from, to, capture }
    }

    /// Issue a token for the computer's deferred turn.
    pub fn schedule_opponent(&self) -> PendingTurn {
        PendingTurn { epoch: self.epoch }
    }

    /// Play the computer's deferred turn, unless the token went stale.
    ///
    /// A token is stale once [`Game::reset`] has run after it was
    /// issued; stale tokens, finished games, and turns where it is
    /// not player two's move are all no-ops. When the computer has
    /// pieces but no legal move it forfeits (see
    /// [`Game::forfeit_stalemate`]).
    pub fn play_scheduled(&mut self, turn: PendingTurn, opponent: &mut Opponent) -> Option<Move> {
        if turn.epoch != self.epoch || self.winner.is_some() || self.to_move != Player::Two {
            return None;
        }
        match opponent.choose_move(&self.board, Player::Two) {
            Some(mv) => self.try_move(mv.from, mv.to),
            None => {
                self.forfeit_stalemate();
                None
            }
        }
    }

    /// Stalemate policy: a side to move with no legal move forfeits,
    /// and the opponent wins. Returns the winner if a forfeit was
    /// declared.
    pub fn forfeit_stalemate(&mut self) -> Option<Player> {
        if self.winner.is_some() || !legal_moves(&self.board, self.to_move).is_empty() {
            return None;
        }
        self.declare_winner(self.to_move.opponent());
        self.winner
    }

    fn declare_winner(&mut self, winner: Player) {
        self.winner = Some(winner);
        self.phase = Phase::AwaitingSelection;
        if let Some(observer) = &mut self.observer {
            observer.game_over(winner);
        }
    }

    fn notify_board_changed(&mut self) {
        if let Some(observer) = &mut self.observer {
            observer.board_changed(&self.board);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A game over just the given pieces, player one to move.
    fn game_with(pieces: &[(Square, Piece)]) -> Game {
        let mut board = Board::empty();
        for &((row, col), piece) in pieces {
            board.set(row, col, Some(piece));
        }
        Game::with_board(board, Player::One)
    }

    #[test]
    fn test_selection_flow() {
        let mut game = Game::new();

        // Empty square and opponent piece are not selectable.
        assert_eq!(game.select_or_move(4, 1), Action::Ignored);
        assert_eq!(game.select_or_move(2, 1), Action::Ignored);
        assert_eq!(game.phase(), Phase::AwaitingSelection);

        assert_eq!(game.select_or_move(5, 2), Action::Selected((5, 2)));
        assert_eq!(game.phase(), Phase::PieceSelected((5, 2)));

        let action = game.select_or_move(4, 1);
        match action {
            Action::Applied(mv) => {
                assert_eq!(mv.from, (5, 2));
                assert_eq!(mv.to, (4, 1));
            }
            other => panic!("expected Applied, got {other:?}"),
        }
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert_eq!(game.side_to_move(), Player::Two);
    }

    #[test]
    fn test_illegal_destination_deselects_silently() {
        let mut game = Game::new();
        game.select_or_move(5, 2);
        // Two squares straight ahead is not a diagonal.
        assert_eq!(game.select_or_move(3, 2), Action::Rejected);
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        // The board is untouched and it is still player one's turn.
        assert_eq!(game.side_to_move(), Player::One);
        assert!(game.board().get(5, 2).is_some());
    }

    #[test]
    fn test_jump_removes_captured_piece() {
        let mut game = game_with(&[
            ((3, 2), Piece::man(Player::One)),
            ((2, 1), Piece::man(Player::Two)),
            ((6, 1), Piece::man(Player::Two)),
        ]);
        let mv = game.try_move((3, 2), (1, 0)).expect("jump is legal");
        assert_eq!(mv.capture, Some((2, 1)));
        assert_eq!(game.board().get(2, 1), None);
        assert_eq!(game.board().get(1, 0), Some(Piece::man(Player::One)));
    }

    #[test]
    fn test_promotion_on_arrival_and_backward_move_after() {
        let mut game = game_with(&[
            ((1, 2), Piece::man(Player::One)),
            ((7, 0), Piece::man(Player::Two)),
        ]);
        game.try_move((1, 2), (0, 1)).expect("step to back row");
        assert_eq!(game.board().get(0, 1), Some(Piece::king(Player::One)));

        // Rebuild with a mobile player-two man so the turn can come
        // back to the fresh king.
        let mut game = game_with(&[
            ((1, 2), Piece::man(Player::One)),
            ((3, 6), Piece::man(Player::Two)),
        ]);
        game.try_move((1, 2), (0, 1)).expect("promotion move");
        game.try_move((3, 6), (4, 7)).expect("player two replies");
        // The new king moves backward (toward increasing row).
        let mv = game.try_move((0, 1), (1, 0)).expect("king moves backward");
        assert_eq!(mv.to, (1, 0));
        assert_eq!(game.board().get(1, 0), Some(Piece::king(Player::One)));
    }

    #[test]
    fn test_king_rank_survives_later_moves() {
        let mut game = game_with(&[
            ((4, 3), Piece::king(Player::Two)),
            ((7, 0), Piece::man(Player::One)),
        ]);
        game.try_move((7, 0), (6, 1)).expect("player one steps");
        game.try_move((4, 3), (3, 2)).expect("king steps");
        assert_eq!(game.board().get(3, 2), Some(Piece::king(Player::Two)));
    }

    #[test]
    fn test_capturing_last_piece_wins_and_freezes_game() {
        let mut game = game_with(&[
            ((3, 2), Piece::man(Player::One)),
            ((5, 4), Piece::man(Player::One)),
            ((2, 1), Piece::man(Player::Two)),
        ]);
        game.try_move((3, 2), (1, 0)).expect("winning capture");
        assert_eq!(game.winner(), Some(Player::One));
        // Turn does not switch after the game ends.
        assert_eq!(game.side_to_move(), Player::One);

        // All further input is absorbed until reset.
        assert_eq!(game.select_or_move(5, 4), Action::Ignored);
        assert_eq!(game.try_move((5, 4), (4, 3)), None);

        game.reset();
        assert_eq!(game.winner(), None);
        assert_eq!(game.side_to_move(), Player::One);
        assert_eq!(game.board().count(Player::Two), 12);
    }

    #[test]
    fn test_reset_cancels_pending_opponent_turn() {
        let mut game = Game::new();
        game.try_move((5, 2), (4, 1)).expect("opening move");
        assert_eq!(game.side_to_move(), Player::Two);

        let pending = game.schedule_opponent();
        game.reset();

        let mut opponent = Opponent::with_seed(7);
        assert_eq!(game.play_scheduled(pending, &mut opponent), None);
        // The reset board was not touched by the stale turn.
        assert_eq!(game.board().count(Player::Two), 12);
        assert_eq!(game.side_to_move(), Player::One);

        // A token issued after the reset works once it is two's turn.
        game.try_move((5, 2), (4, 1)).expect("opening move again");
        let pending = game.schedule_opponent();
        assert!(game.play_scheduled(pending, &mut opponent).is_some());
        assert_eq!(game.side_to_move(), Player::One);
    }

    #[test]
    fn test_scheduled_turn_noop_when_not_opponents_move() {
        let mut game = Game::new();
        let pending = game.schedule_opponent();
        let mut opponent = Opponent::with_seed(7);
        assert_eq!(game.play_scheduled(pending, &mut opponent), None);
        assert_eq!(game.side_to_move(), Player::One);
    }

    #[test]
    fn test_stuck_side_forfeits() {
        // Player two's only man is boxed in: its one step is blocked
        // and its one jump lands on an occupied square.
        let mut game = game_with(&[
            ((0, 3), Piece::king(Player::One)),
            ((6, 1), Piece::man(Player::One)),
            ((7, 2), Piece::man(Player::One)),
            ((5, 0), Piece::man(Player::Two)),
        ]);
        game.try_move((0, 3), (1, 2)).expect("player one passes the turn");

        assert_eq!(game.side_to_move(), Player::Two);
        let pending = game.schedule_opponent();
        let mut opponent = Opponent::with_seed(7);
        assert_eq!(game.play_scheduled(pending, &mut opponent), None);
        assert_eq!(game.winner(), Some(Player::One));
    }

    #[test]
    fn test_observer_sees_changes_and_game_end() {
        use std::cell::RefCell;
        use std::rc::Rc;

        #[derive(Default)]
        struct Recorder {
            changes: usize,
            winner: Option<Player>,
        }

        struct Hook(Rc<RefCell<Recorder>>);
        impl GameObserver for Hook {
            fn board_changed(&mut self, _board: &Board) {
                self.0.borrow_mut().changes += 1;
            }
            fn game_over(&mut self, winner: Player) {
                self.0.borrow_mut().winner = Some(winner);
            }
        }

        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut game = game_with(&[
            ((3, 2), Piece::man(Player::One)),
            ((2, 1), Piece::man(Player::Two)),
        ]);
        game.set_observer(Box::new(Hook(Rc::clone(&recorder))));

        game.try_move((3, 2), (1, 0)).expect("winning capture");
        assert_eq!(recorder.borrow().changes, 1);
        assert_eq!(recorder.borrow().winner, Some(Player::One));

        game.reset();
        assert_eq!(recorder.borrow().changes, 2);
    }
}
