//! Player indices and per-player value vectors.
//!
//! ## PlayerId
//!
//! 0-based index of a seat in the game, as reported by
//! `GameState::current_player`.
//!
//! ## PlayerMap
//!
//! One value per player, backed by a `Vec`. The search tree uses
//! `PlayerMap<f64>` both for terminal outcome vectors and for the per-node
//! score accumulators, so every node carries exactly `player_count` sums.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::SearchError;

/// Player index supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use uct_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player values with O(1) access by `PlayerId`.
///
/// ```
/// use uct_engine::core::{PlayerId, PlayerMap};
///
/// let mut sums: PlayerMap<f64> = PlayerMap::with_value(2, 0.0);
/// sums.accumulate(&PlayerMap::from_vec(vec![1.0, 0.0]));
/// sums.accumulate(&PlayerMap::from_vec(vec![0.5, 0.5]));
///
/// assert_eq!(sums[PlayerId::new(0)], 1.5);
/// assert_eq!(sums[PlayerId::new(1)], 0.5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Wrap an existing vector, one entry per player in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Wrap a vector that should hold one entry per player.
    ///
    /// Lets a game build an outcome from untrusted data without panicking:
    /// a vector whose length is not `player_count` (or is outside 1-255)
    /// becomes `SearchError::OutcomeLength`.
    pub fn try_from_vec(data: Vec<T>, player_count: usize) -> Result<Self, SearchError> {
        if data.len() != player_count || !(1..=255).contains(&data.len()) {
            return Err(SearchError::OutcomeLength {
                expected: player_count,
                actual: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's value.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's value.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Values in seat order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl PlayerMap<f64> {
    /// Add `other[p]` to `self[p]` for every player.
    pub fn accumulate(&mut self, other: &PlayerMap<f64>) {
        debug_assert_eq!(self.data.len(), other.data.len());
        for (sum, value) in self.data.iter_mut().zip(&other.data) {
            *sum += value;
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
