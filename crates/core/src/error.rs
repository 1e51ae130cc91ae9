use thiserror::Error;

/// Errors that can occur while searching a game tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot expand a fully expanded node")]
    FullyExpanded,

    #[error("Unknown node id: {0}")]
    UnknownNode(usize),

    #[error("Selected action has no child node: {0}")]
    MissingChild(String),

    #[error("Root has no expanded children")]
    NoChildren,

    #[error("No legal actions in a non-terminal state")]
    NoLegalActions,

    #[error("Cannot search from a terminal state")]
    TerminalRoot,

    #[error("Terminal state has no score for player {0}")]
    MissingScore(String),
}

impl SearchError {
    /// Returns true if the error was caused by the game oracle breaking its
    /// contract rather than by a misuse of the search engine.
    pub fn is_oracle_error(&self) -> bool {
        matches!(
            self,
            Self::NoLegalActions | Self::TerminalRoot | Self::MissingScore(_)
        )
    }
}

/// Convenience Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
