//! Line-oriented text protocol for interactive play.
//!
//! The session reads commands from stdin, one per line, and drives a
//! [`Game`] against the random computer opponent. Squares use the
//! usual algebraic notation: files `a`-`h` left to right, ranks
//! `1`-`8` bottom to top, so `a1` is the bottom-left corner (row 7,
//! column 0) and the human's men start on ranks 1-3.
//!
//! ## Commands
//!
//! - `move <from> <to>` - Play a move, e.g. `move a3 b4`; the
//!   computer replies on the same line of output
//! - `moves` - List candidate moves for the side to move
//! - `show` - Print the board and whose turn it is
//! - `reset` - Start over from the initial position
//! - `help` - List the commands
//! - `quit` - Exit

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::board::{Player, Square};
use crate::constants::SIZE;
use crate::engine::{Action, Game};
use crate::movegen::{Move, legal_moves};
use crate::opponent::Opponent;

const HELP: &str = "commands: move <from> <to>, moves, show, reset, help, quit";

/// Parse algebraic notation (`a1`..`h8`) into a (row, column) square.
pub fn parse_square(s: &str) -> Option<Square> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].to_ascii_lowercase();
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&bytes[1]) {
        return None;
    }
    let col = (file - b'a') as usize;
    let rank = (bytes[1] - b'0') as usize;
    Some((SIZE - rank, col))
}

/// Render a square back to algebraic notation.
pub fn str_square(sq: Square) -> String {
    let file = (b'a' + sq.1 as u8) as char;
    format!("{file}{}", SIZE - sq.0)
}

fn str_move(mv: &Move) -> String {
    let sep = if mv.is_capture() { 'x' } else { '-' };
    format!("{}{sep}{}", str_square(mv.from), str_square(mv.to))
}

/// An interactive human-vs-computer session.
pub struct Session {
    game: Game,
    opponent: Opponent,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_opponent(Opponent::new())
    }

    pub fn with_opponent(opponent: Opponent) -> Self {
        Session {
            game: Game::new(),
            opponent,
        }
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        writeln!(stdout, "{HELP}")?;
        writeln!(stdout, "{}", self.status())?;

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let response = self.execute(&command, args);
            writeln!(stdout, "{response}")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Execute a single command and return the response text.
    fn execute(&mut self, command: &str, args: &[&str]) -> String {
        match command {
            "help" => HELP.to_string(),

            "quit" => "bye".to_string(),

            "show" => format!("{}{}", self.game.board(), self.status()),

            "reset" => {
                self.game.reset();
                format!("{}{}", self.game.board(), self.status())
            }

            "moves" => {
                let moves = legal_moves(self.game.board(), self.game.side_to_move());
                if moves.is_empty() {
                    "no legal moves".to_string()
                } else {
                    moves
                        .iter()
                        .map(str_move)
                        .collect::<Vec<_>>()
                        .join(" ")
                }
            }

            "move" => self.play_human_move(args),

            _ => format!("unknown command: {command} ({HELP})"),
        }
    }

    fn play_human_move(&mut self, args: &[&str]) -> String {
        if args.len() < 2 {
            return "usage: move <from> <to>".to_string();
        }
        let Some(from) = parse_square(args[0]) else {
            return format!("bad square: {}", args[0]);
        };
        let Some(to) = parse_square(args[1]) else {
            return format!("bad square: {}", args[1]);
        };

        if self.game.winner().is_some() {
            return format!("{} (reset to play again)", self.status());
        }

        if !matches!(self.game.select_or_move(from.0, from.1), Action::Selected(_)) {
            return format!("no piece of yours on {}", args[0]);
        }

        match self.game.select_or_move(to.0, to.1) {
            Action::Applied(_) => self.computer_reply(),
            _ => "illegal move".to_string(),
        }
    }

    /// After a legal human move, let the computer take its turn and
    /// report everything that happened.
    fn computer_reply(&mut self) -> String {
        let mut out = String::new();

        if self.game.winner().is_none() {
            let pending = self.game.schedule_opponent();
            if let Some(reply) = self.game.play_scheduled(pending, &mut self.opponent) {
                out.push_str(&format!("computer plays {}\n", str_move(&reply)));
            }
        }

        // The human may now be stuck; same forfeit policy.
        if self.game.winner().is_none() && self.game.side_to_move() == Player::One {
            self.game.forfeit_stalemate();
        }

        out.push_str(&format!("{}{}", self.game.board(), self.status()));
        out
    }

    fn status(&self) -> String {
        match self.game.winner() {
            Some(Player::One) => "you win".to_string(),
            Some(Player::Two) => "computer wins".to_string(),
            None => {
                let side = match self.game.side_to_move() {
                    Player::One => "your move",
                    Player::Two => "computer to move",
                };
                side.to_string()
            }
        }
    }
}
