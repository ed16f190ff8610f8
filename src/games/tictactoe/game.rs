//! Tic-tac-toe rules.

use std::fmt;

use thiserror::Error;

use crate::core::{PlayerId, PlayerMap};
use crate::rules::{Game, GameConfig, GameState};

/// The eight winning lines.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Errors raised by the tic-tac-toe rules.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TicTacToeError {
    #[error("cell {0} is off the board")]
    OffBoard(usize),

    #[error("cell {0} is already taken")]
    Occupied(usize),

    #[error("the game is already over")]
    GameOver,

    #[error("the game is not over yet")]
    NotFinished,

    #[error("invalid board character {0:?}")]
    BadCharacter(char),

    #[error("board text has {0} cells, expected 9")]
    BadLength(usize),
}

/// Contents of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    /// Mark of a player (0 = X, 1 = O).
    Mark(u8),
}

/// Two-player tic-tac-toe.
#[derive(Clone, Debug)]
pub struct TicTacToe {
    config: GameConfig,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            config: GameConfig::sequential(2),
        }
    }
}

impl Game for TicTacToe {
    type State = Board;

    fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// A tic-tac-toe position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Empty board, X to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a board from nine characters, row-major: `X`, `O`, or `.`/`-`
    /// for empty. Whitespace is ignored.
    ///
    /// ```
    /// use uct_engine::games::Board;
    /// use uct_engine::rules::GameState;
    ///
    /// let board = Board::parse("XX. OO. ...").unwrap();
    /// assert_eq!(board.legal_moves().unwrap().len(), 5);
    /// ```
    pub fn parse(text: &str) -> Result<Self, TicTacToeError> {
        let mut cells = [Cell::Empty; 9];
        let mut count = 0;

        for ch in text.chars().filter(|c| !c.is_whitespace()) {
            let cell = match ch {
                'X' | 'x' => Cell::Mark(0),
                'O' | 'o' => Cell::Mark(1),
                '.' | '-' => Cell::Empty,
                other => return Err(TicTacToeError::BadCharacter(other)),
            };
            if let Some(slot) = cells.get_mut(count) {
                *slot = cell;
            }
            count += 1;
        }

        if count != 9 {
            return Err(TicTacToeError::BadLength(count));
        }
        Ok(Self { cells })
    }

    /// Get a cell.
    #[must_use]
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Marks placed so far.
    #[must_use]
    pub fn marks(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Player owning a completed line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        LINES.iter().find_map(|&[a, b, c]| match self.cells[a] {
            Cell::Mark(p) if self.cells[b] == Cell::Mark(p) && self.cells[c] == Cell::Mark(p) => {
                Some(PlayerId(p))
            }
            _ => None,
        })
    }

    fn is_full(&self) -> bool {
        self.marks() == 9
    }
}

impl GameState for Board {
    type Move = usize;
    type Error = TicTacToeError;

    fn legal_moves(&self) -> Result<Vec<usize>, TicTacToeError> {
        if self.winner().is_some() {
            return Ok(Vec::new());
        }
        Ok((0..9).filter(|&i| self.cells[i] == Cell::Empty).collect())
    }

    fn apply_move(&self, cell: &usize) -> Result<Self, TicTacToeError> {
        let cell = *cell;
        if cell >= 9 {
            return Err(TicTacToeError::OffBoard(cell));
        }
        if self.winner().is_some() || self.is_full() {
            return Err(TicTacToeError::GameOver);
        }
        if self.cells[cell] != Cell::Empty {
            return Err(TicTacToeError::Occupied(cell));
        }

        let mut next = self.clone();
        next.cells[cell] = Cell::Mark((self.marks() % 2) as u8);
        Ok(next)
    }

    fn is_terminal(&self) -> Result<bool, TicTacToeError> {
        Ok(self.winner().is_some() || self.is_full())
    }

    fn current_player(&self) -> Result<PlayerId, TicTacToeError> {
        Ok(PlayerId((self.marks() % 2) as u8))
    }

    fn outcome(&self) -> Result<PlayerMap<f64>, TicTacToeError> {
        match self.winner() {
            Some(winner) => {
                let mut outcome = PlayerMap::with_value(2, 0.0);
                outcome[winner] = 1.0;
                Ok(outcome)
            }
            None if self.is_full() => Ok(PlayerMap::with_value(2, 0.5)),
            None => Err(TicTacToeError::NotFinished),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let ch = match self.cells[row * 3 + col] {
                    Cell::Empty => '.',
                    Cell::Mark(0) => 'X',
                    Cell::Mark(_) => 'O',
                };
                write!(f, "{ch}")?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
