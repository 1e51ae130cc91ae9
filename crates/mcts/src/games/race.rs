//! Race-to-N counting game.
//!
//! Players alternately add 1 or 2 to a shared counter; whoever brings it to
//! the target wins. Every game ends after at most `target` moves, which
//! makes it a handy bounded oracle for property tests. With a target of 5
//! the first player wins by opening with 2.

use std::collections::HashMap;
use uct_core::Game;

/// Race game with a configurable target.
#[derive(Clone, Copy, Debug)]
pub struct RaceGame {
    target: u8,
}

impl RaceGame {
    pub fn new(target: u8) -> Self {
        Self { target }
    }

    pub fn target(&self) -> u8 {
        self.target
    }
}

/// Counter value and player to move (0 or 1).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct RaceState {
    pub count: u8,
    pub to_move: u8,
}

/// Amount to add (1 or 2).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RaceAction(pub u8);

impl Game for RaceGame {
    type State = RaceState;
    type Action = RaceAction;
    type Player = u8;

    fn initial_state(&self) -> Self::State {
        RaceState {
            count: 0,
            to_move: 0,
        }
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        (1..=2)
            .filter(|step| state.count + step <= self.target)
            .map(RaceAction)
            .collect()
    }

    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State {
        RaceState {
            count: state.count + action.0,
            to_move: 1 - state.to_move,
        }
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.count >= self.target
    }

    fn current_player(&self, state: &Self::State) -> Self::Player {
        state.to_move
    }

    fn points_values(&self, state: &Self::State) -> HashMap<Self::Player, f32> {
        // The player who just moved reached the target.
        let winner = 1 - state.to_move;
        HashMap::from([(winner, 1.0), (state.to_move, -1.0)])
    }
}
