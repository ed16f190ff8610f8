//! Tic-tac-toe on a 3x3 board.
//!
//! Player 0 plays X and moves first. Moves are cell indices 0-8 in
//! row-major order. A win scores 1.0 for the winner and 0.0 for the loser;
//! a full board with no line scores 0.5 each.

mod game;

pub use game::{Board, Cell, TicTacToe, TicTacToeError, LINES};
