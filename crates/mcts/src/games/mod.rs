//! Small games used to exercise the search.
//!
//! These are test oracles, not part of the search itself.

pub mod race;
pub mod tictactoe;

pub use race::{RaceAction, RaceGame, RaceState};
pub use tictactoe::{Player, TicTacToe, TicTacToeAction, TicTacToeState};
