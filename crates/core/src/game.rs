use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A game abstraction for tree search.
///
/// This trait is the oracle the search engine queries for rules. The engine
/// never inspects states directly: every transition, legality check and
/// score comes from here. Implementations must be deterministic and every
/// game must be finite.
pub trait Game {
    /// The game state (e.g., a board position)
    type State: Clone;

    /// A game action (e.g., a cell to mark)
    type Action: Clone + Copy + Eq + Hash + Debug;

    /// The identity of a player
    type Player: Clone + Copy + Eq + Hash + Debug;

    /// Returns the initial game state
    fn initial_state(&self) -> Self::State;

    /// Returns all legal actions from the given state.
    ///
    /// Must be non-empty unless the state is terminal. The order is
    /// significant: the search expands untried actions and breaks ties in
    /// this order.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Applies an action, returning a new state (immutable operation)
    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// Returns true if the game has ended
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Returns the player to move in the given state
    fn current_player(&self, state: &Self::State) -> Self::Player;

    /// Returns the score of every player in a terminal state.
    ///
    /// A strictly positive score is a win for that player; only the sign is
    /// meaningful to the search.
    fn points_values(&self, state: &Self::State) -> HashMap<Self::Player, f32>;
}
