//! Search failure taxonomy.

use thiserror::Error;

use crate::rules::UnsupportedGame;

/// Errors that can occur while selecting a move.
///
/// Nothing here is retried. A failed collaborator call aborts the search
/// and the partially built tree is dropped with it.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("unsupported game: {0}")]
    UnsupportedGame(#[from] UnsupportedGame),

    #[error("game rules failure: {0}")]
    Rules(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("cannot select a move from a terminal position")]
    TerminalRoot,

    #[error("non-terminal state at depth {depth} has no legal moves")]
    DegenerateState { depth: u32 },

    #[error("outcome vector has {actual} entries, expected {expected}")]
    OutcomeLength { expected: usize, actual: usize },

    #[error("outcome for player {player} is not finite: {value}")]
    InvalidOutcome { player: u8, value: f64 },

    #[error("random playout stopped before the game ended")]
    UnfinishedPlayout,

    #[error("player index {player} out of range for {player_count} players")]
    InvalidPlayer { player: u8, player_count: usize },

    #[error("root has no expanded children")]
    NoExpandedChildren,

    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}

impl SearchError {
    /// Wrap a collaborator error.
    pub fn rules<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SearchError::Rules(Box::new(error))
    }
}
