//! Collaborator traits implemented by the host game.
//!
//! The search never looks inside a game state. It only calls the
//! capabilities below, and every call may fail with the game's own error
//! type, which the search wraps in `SearchError::Rules` and propagates.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{PlayerId, PlayerMap, SearchRng};

/// Static facts about a game, queried once before a search starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players, fixed for the whole game.
    pub player_count: usize,

    /// The game has chance events.
    pub stochastic: bool,

    /// Players do not observe the full state.
    pub imperfect_information: bool,

    /// Players move at the same time.
    pub simultaneous_moves: bool,
}

impl GameConfig {
    /// Deterministic, perfect-information, sequential-move game.
    #[must_use]
    pub fn sequential(player_count: usize) -> Self {
        Self {
            player_count,
            stochastic: false,
            imperfect_information: false,
            simultaneous_moves: false,
        }
    }

    /// Mark the game as having chance events.
    pub fn with_stochastic(mut self, stochastic: bool) -> Self {
        self.stochastic = stochastic;
        self
    }

    /// Mark the game as hiding information from players.
    pub fn with_imperfect_information(mut self, hidden: bool) -> Self {
        self.imperfect_information = hidden;
        self
    }

    /// Mark the game as having simultaneous moves.
    pub fn with_simultaneous_moves(mut self, simultaneous: bool) -> Self {
        self.simultaneous_moves = simultaneous;
        self
    }
}

/// Reason a game is rejected by the capability query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum UnsupportedGame {
    #[error("game has chance events")]
    Stochastic,

    #[error("game has hidden information")]
    ImperfectInformation,

    #[error("game has simultaneous moves")]
    SimultaneousMoves,

    #[error("game declares {0} players")]
    PlayerCount(usize),
}

/// Capability query: can UCT search this game?
///
/// Stochastic, imperfect-information and simultaneous-move games are
/// declined, as are games with no players or more than 255.
pub fn check_supported(config: &GameConfig) -> Result<(), UnsupportedGame> {
    if config.stochastic {
        return Err(UnsupportedGame::Stochastic);
    }
    if config.imperfect_information {
        return Err(UnsupportedGame::ImperfectInformation);
    }
    if config.simultaneous_moves {
        return Err(UnsupportedGame::SimultaneousMoves);
    }
    if config.player_count == 0 || config.player_count > 255 {
        return Err(UnsupportedGame::PlayerCount(config.player_count));
    }
    Ok(())
}

/// A game being searched.
pub trait Game {
    /// Position type.
    type State: GameState;

    /// Static facts about this game.
    fn config(&self) -> &GameConfig;

    /// Number of players.
    fn player_count(&self) -> usize {
        self.config().player_count
    }
}

/// One position of a game.
///
/// `Clone` must be a deep copy: mutating a clone is never observable
/// through the original.
///
/// ## Implementation Notes
///
/// - `legal_moves`: may be empty only at a terminal state
/// - `apply_move`: returns the successor and leaves `self` untouched
/// - `current_player`: only meaningful on non-terminal states
/// - `outcome`: only meaningful on terminal states; one value per player
pub trait GameState: Clone {
    /// A legal transition from one state to the next.
    type Move: Clone + Debug;

    /// Failure raised by the game's rules.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Enumerate the legal moves at this state.
    fn legal_moves(&self) -> Result<Vec<Self::Move>, Self::Error>;

    /// Successor state after `mv`.
    fn apply_move(&self, mv: &Self::Move) -> Result<Self, Self::Error>;

    /// Whether the game is over.
    fn is_terminal(&self) -> Result<bool, Self::Error>;

    /// Player to move.
    fn current_player(&self) -> Result<PlayerId, Self::Error>;

    /// Per-player outcome values of a finished game.
    fn outcome(&self) -> Result<PlayerMap<f64>, Self::Error>;

    /// Play uniformly random legal moves until the game ends.
    ///
    /// Games with a faster native playout may override this, but the move
    /// choice must stay uniform and must draw from `rng`.
    fn random_playout(&mut self, rng: &mut SearchRng) -> Result<(), Self::Error> {
        while !self.is_terminal()? {
            let moves = self.legal_moves()?;
            match rng.choose(&moves) {
                Some(mv) => *self = self.apply_move(mv)?,
                // Contract violation; leave the state for the caller to inspect.
                None => break,
            }
        }
        Ok(())
    }
}
