//! Nim rules.

use thiserror::Error;

use crate::core::{PlayerId, PlayerMap};
use crate::rules::{Game, GameConfig, GameState};

/// Most stones a single move may take.
pub const MAX_TAKE: u8 = 3;

/// Errors raised by the Nim rules.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NimError {
    #[error("cannot take {take} stones from a heap of {stones}")]
    IllegalTake { take: u8, stones: u32 },

    #[error("the heap is empty")]
    GameOver,

    #[error("the game is not over yet")]
    NotFinished,
}

/// Nim game description.
#[derive(Clone, Debug)]
pub struct Nim {
    config: GameConfig,
    stones: u32,
}

impl Nim {
    /// Nim for `player_count` players starting from `stones` stones.
    pub fn new(player_count: usize, stones: u32) -> Self {
        assert!((1..=255).contains(&player_count), "Player count must be 1-255");
        Self {
            config: GameConfig::sequential(player_count),
            stones,
        }
    }

    /// Starting position.
    #[must_use]
    pub fn initial_state(&self) -> NimState {
        NimState::new(self.config.player_count, self.stones)
    }
}

impl Game for Nim {
    type State = NimState;

    fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// A Nim position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NimState {
    stones: u32,
    player_count: u8,
    to_move: u8,
    last_taker: Option<u8>,
}

impl NimState {
    /// Fresh heap with player 0 to move.
    pub fn new(player_count: usize, stones: u32) -> Self {
        assert!((1..=255).contains(&player_count), "Player count must be 1-255");
        Self {
            stones,
            player_count: player_count as u8,
            to_move: 0,
            last_taker: None,
        }
    }

    /// Stones left on the heap.
    #[must_use]
    pub fn stones(&self) -> u32 {
        self.stones
    }

    /// Player who took the last stone, once the heap is empty.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        if self.stones == 0 {
            self.last_taker.map(PlayerId)
        } else {
            None
        }
    }
}

impl GameState for NimState {
    type Move = u8;
    type Error = NimError;

    fn legal_moves(&self) -> Result<Vec<u8>, NimError> {
        let most = self.stones.min(u32::from(MAX_TAKE)) as u8;
        Ok((1..=most).collect())
    }

    fn apply_move(&self, take: &u8) -> Result<Self, NimError> {
        if self.stones == 0 {
            return Err(NimError::GameOver);
        }
        if *take == 0 || *take > MAX_TAKE || u32::from(*take) > self.stones {
            return Err(NimError::IllegalTake {
                take: *take,
                stones: self.stones,
            });
        }

        Ok(Self {
            stones: self.stones - u32::from(*take),
            player_count: self.player_count,
            to_move: ((u16::from(self.to_move) + 1) % u16::from(self.player_count)) as u8,
            last_taker: Some(self.to_move),
        })
    }

    fn is_terminal(&self) -> Result<bool, NimError> {
        Ok(self.stones == 0)
    }

    fn current_player(&self) -> Result<PlayerId, NimError> {
        Ok(PlayerId(self.to_move))
    }

    fn outcome(&self) -> Result<PlayerMap<f64>, NimError> {
        let player_count = usize::from(self.player_count);
        match self.winner() {
            Some(winner) => {
                let mut outcome = PlayerMap::with_value(player_count, 0.0);
                outcome[winner] = 1.0;
                Ok(outcome)
            }
            // An empty starting heap has no winner; everyone draws.
            None if self.stones == 0 => Ok(PlayerMap::with_value(
                player_count,
                1.0 / f64::from(self.player_count),
            )),
            None => Err(NimError::NotFinished),
        }
    }
}
