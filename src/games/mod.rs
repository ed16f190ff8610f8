//! Reference games.
//!
//! Small deterministic games used to exercise the search in tests,
//! benchmarks and doc examples. Both implement `Game` and `GameState`.

pub mod nim;
pub mod tictactoe;

pub use nim::{Nim, NimError, NimState};
pub use tictactoe::{Board, Cell, TicTacToe, TicTacToeError};
