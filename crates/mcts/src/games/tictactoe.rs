//! Tic-tac-toe oracle for exercising the search.
//!
//! Small enough that tactical mistakes are easy to spot. The search takes an
//! immediate win, but it scores the opponent's replies with the searching
//! player's wins too, so it does not reliably block an immediate loss.

use std::collections::HashMap;
use std::fmt;
use uct_core::Game;

/// Tic-tac-toe player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Tic-tac-toe board state.
///
/// Cells are indexed 0-8 in row-major order.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToeState {
    board: [Option<Player>; 9],
    to_move: Player,
}

impl TicTacToeState {
    /// Empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            to_move: Player::X,
        }
    }

    /// Board reached by playing `cells` in order from the empty board.
    ///
    /// Occupied or out-of-range cells are skipped.
    pub fn from_moves(cells: &[u8]) -> Self {
        let game = TicTacToe;
        cells.iter().fold(Self::new(), |state, &cell| {
            if state.get(cell as usize).is_none() && cell < 9 {
                game.apply(&state, TicTacToeAction(cell))
            } else {
                state
            }
        })
    }

    /// Get the piece at a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board.get(cell).copied().flatten()
    }

    /// Player who completed a line, if any.
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|&[a, b, c]| match self.board[a] {
            Some(p) if self.board[b] == Some(p) && self.board[c] == Some(p) => Some(p),
            _ => None,
        })
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(Option::is_some)
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.board.chunks(3) {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or_else(|| ".".to_string(), |p| p.to_string()))
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Tic-tac-toe action (cell index 0-8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeAction(pub u8);

/// Tic-tac-toe game implementation.
#[derive(Clone, Debug)]
pub struct TicTacToe;

impl Game for TicTacToe {
    type State = TicTacToeState;
    type Action = TicTacToeAction;
    type Player = Player;

    fn initial_state(&self) -> Self::State {
        TicTacToeState::new()
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if self.is_terminal(state) {
            return Vec::new();
        }
        (0..9u8)
            .filter(|&cell| state.board[cell as usize].is_none())
            .map(TicTacToeAction)
            .collect()
    }

    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State {
        let mut next = state.clone();
        next.board[action.0 as usize] = Some(state.to_move);
        next.to_move = state.to_move.opposite();
        next
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.winner().is_some() || state.is_full()
    }

    fn current_player(&self, state: &Self::State) -> Self::Player {
        state.to_move
    }

    fn points_values(&self, state: &Self::State) -> HashMap<Self::Player, f32> {
        match state.winner() {
            Some(winner) => HashMap::from([(winner, 1.0), (winner.opposite(), -1.0)]),
            None => HashMap::from([(Player::X, 0.0), (Player::O, 0.0)]),
        }
    }
}
