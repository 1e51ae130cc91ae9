//! Rollout abstraction for MCTS.
//!
//! The simulation phase plays a position out to the end of the game. The
//! `RolloutPolicy` trait lets the engine swap strategies; `RandomRollout`
//! is the uniform random playout used by plain UCT.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uct_core::{Game, Result, SearchError};

/// Trait for playing a position out to a terminal state.
pub trait RolloutPolicy<G: Game> {
    /// Play from `state` until the game ends, returning the terminal state.
    ///
    /// # Errors
    /// Returns `SearchError::NoLegalActions` if the game reports no legal
    /// actions for a state it does not consider terminal.
    fn rollout(&mut self, game: &G, state: G::State) -> Result<G::State>;
}

/// Rollout that picks every move uniformly at random.
///
/// There is no depth cutoff: the game must guarantee termination.
#[derive(Clone, Debug)]
pub struct RandomRollout<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomRollout<R> {
    /// Create a new random rollout driven by `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomRollout<ChaCha8Rng> {
    /// Create a reproducible rollout from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<G: Game, R: Rng> RolloutPolicy<G> for RandomRollout<R> {
    fn rollout(&mut self, game: &G, state: G::State) -> Result<G::State> {
        let mut state = state;

        while !game.is_terminal(&state) {
            let legal_actions = game.legal_actions(&state);
            if legal_actions.is_empty() {
                return Err(SearchError::NoLegalActions);
            }

            let idx = self.rng.gen_range(0..legal_actions.len());
            state = game.apply(&state, legal_actions[idx]);
        }

        Ok(state)
    }
}
