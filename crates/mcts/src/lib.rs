//! Monte Carlo Tree Search with UCT selection.
//!
//! This crate provides a generic MCTS implementation that can be used with
//! any game implementing the `uct_core::Game` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `Game` implementation
//! - **UCT Selection**: Uses the UCB1 formula to pick children during descent
//! - **Rollout Abstraction**: Random playouts by default, pluggable through
//!   `RolloutPolicy`
//! - **Configurable Final Move**: Most wins (default) or best win rate
//! - **Arena Tree**: Parent links are indices, the whole tree is dropped
//!   after each decision
//!
//! # Example
//!
//! ```
//! use uct_mcts::{Mcts, MctsConfig, RandomRollout, games::TicTacToe};
//! use uct_core::Game;
//!
//! let game = TicTacToe;
//! let state = game.initial_state();
//!
//! let config = MctsConfig::with_simulations(200);
//! let mut mcts = Mcts::new(config, RandomRollout::seeded(42));
//!
//! let result = mcts.search(&game, &state).expect("search succeeds");
//! println!("Best action: {:?}", result.best_action);
//! assert_eq!(result.root_visits, 200);
//! ```

pub mod config;
pub mod games;
mod node;
pub mod rollout;
pub mod search;
mod tree;

pub use config::{MctsConfig, SelectionMetric, MAX_SIMULATIONS};
pub use node::{Node, NodeId};
pub use rollout::{RandomRollout, RolloutPolicy};
pub use search::{decide, ChildStats, Mcts, SearchResult};
pub use tree::Tree;
