//! Subtraction Nim for any number of players.
//!
//! - One heap of stones
//! - Players take turns in seat order, removing 1 to 3 stones
//! - Whoever takes the last stone scores 1.0; everyone else scores 0.0
//!
//! With two players the first player wins exactly when the heap is not a
//! multiple of four, which makes it a handy check on search quality.

mod game;

pub use game::{Nim, NimError, NimState, MAX_TAKE};
