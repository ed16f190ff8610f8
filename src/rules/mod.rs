//! Game collaborator traits.
//!
//! Games implement `Game` and `GameState` to expose:
//! - Legal moves for each state
//! - How a move produces the successor state
//! - Terminal detection and per-player outcomes
//!
//! The search calls into these traits but never interprets game-specific
//! concepts directly.

pub mod game;

pub use game::{check_supported, Game, GameConfig, GameState, UnsupportedGame};
