//! # uct-engine
//!
//! Move selection for deterministic, perfect-information, sequential-move
//! games using UCT (Monte Carlo Tree Search with UCB1).
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The search only sees a game through the `Game` and
//!    `GameState` traits. It never inspects moves or positions.
//!
//! 2. **N-Player First**: Outcomes are per-player vectors and every node
//!    keeps one score sum per player. Nothing assumes two players or
//!    zero-sum play.
//!
//! 3. **One Search, One Tree**: Every call builds a fresh arena tree and
//!    seeds one RNG; both are dropped when the call returns.
//!
//! ## Architecture
//!
//! - **Arena Tree**: Nodes live in a `Vec` and refer to each other by
//!   `NodeId`, so parent links never own anything.
//!
//! - **Explicit Randomness**: A single `SearchRng` is threaded through move
//!   shuffling, tie-breaking and rollouts. A fixed seed replays a search.
//!
//! - **Propagated Failures**: Every game callback returns a `Result`; the
//!   first failure aborts the search as a `SearchError`.
//!
//! ## Modules
//!
//! - `core`: Player ids, per-player values, RNG, errors
//! - `rules`: `Game`/`GameState` traits and the capability query
//! - `mcts`: UCT search
//! - `agent`: AI-player wrapper with a host lifecycle
//! - `games`: Reference games (tic-tac-toe, N-player Nim)

pub mod core;
pub mod rules;
pub mod mcts;
pub mod agent;
pub mod games;

// Re-export commonly used types
pub use crate::core::{PlayerId, PlayerMap, SearchError, SearchRng};

pub use crate::rules::{check_supported, Game, GameConfig, GameState, UnsupportedGame};

pub use crate::mcts::{
    search, select_action, select_action_with,
    MCTSNode, MCTSTree, NodeId, SearchConfig, SearchReport, UctSearch,
    SearchStats, StopReason, TreeStats, Ucb1,
};

pub use crate::agent::UctAgent;
