//! UCT Core - Game abstractions and common types
//!
//! This crate provides the core `Game` trait that defines the interface
//! any game must implement to be searched by `uct-mcts`.
//!
//! # Types
//!
//! - [`Game`] - Trait for game implementations (the rules oracle)
//! - [`SearchError`] - Errors raised by the search or by a misbehaving oracle

mod error;
mod game;

pub use error::{Result, SearchError};
pub use game::Game;
