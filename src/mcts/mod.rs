//! UCT (Monte Carlo Tree Search with UCB1) move selection.
//!
//! ## Overview
//!
//! Each search builds a fresh tree rooted at a private copy of the given
//! state and repeats four steps until its budget runs out:
//!
//! - **Selection**: descend through fully expanded nodes by UCB1, scoring
//!   each child by the mean outcome of the player to move at its parent
//! - **Expansion**: turn one untried move into a new child
//! - **Simulation**: play uniformly random moves to the end of the game
//! - **Backpropagation**: add the per-player outcome to every node on the path
//!
//! The move of the most visited root child is returned. Works with any
//! number of players; outcomes are vectors with one value per player.
//!
//! ## Usage
//!
//! ```rust
//! use uct_engine::games::{Board, TicTacToe};
//! use uct_engine::mcts::{search, SearchConfig};
//!
//! let game = TicTacToe::new();
//! // X to move, two in a row on top.
//! let board = Board::parse("XX. OO. ...").unwrap();
//!
//! let config = SearchConfig::budget(0.0, 2000).with_seed(42);
//! let report = search(&game, &board, &config).unwrap();
//!
//! assert_eq!(report.best_move, 2);
//! assert_eq!(report.stats.iterations, 2000);
//! ```
//!
//! ## Step-wise use
//!
//! ```rust
//! use uct_engine::games::Nim;
//! use uct_engine::mcts::{SearchConfig, UctSearch};
//!
//! let game = Nim::new(2, 7);
//! let mut search = UctSearch::new(&game, &game.initial_state(), SearchConfig::default().with_seed(1)).unwrap();
//! for _ in 0..500 {
//!     search.iterate().unwrap();
//! }
//! assert_eq!(search.tree().root_node().visits, 500);
//! for (take, share) in search.action_probabilities() {
//!     println!("take {take}: {:.1}%", share * 100.0);
//! }
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::SearchConfig;
pub use node::{MCTSNode, NodeId};
pub use policy::{most_visited, rollout, terminal_outcome, Ucb1};
pub use search::{search, select_action, select_action_with, MoveOf, SearchReport, UctSearch};
pub use stats::{SearchStats, StopReason};
pub use tree::{MCTSTree, TreeStats};
