//! Core engine types: players, per-player values, RNG, errors.
//!
//! These are game-agnostic building blocks shared by the rules traits and
//! the search.

pub mod error;
pub mod player;
pub mod rng;

pub use error::SearchError;
pub use player::{PlayerId, PlayerMap};
pub use rng::SearchRng;
