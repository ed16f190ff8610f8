//! UCT agent.

use tracing::{debug, info};

use crate::core::{PlayerId, SearchError};
use crate::mcts::{select_action_with, MoveOf, SearchConfig};
use crate::rules::{check_supported, Game};

/// Friendly name reported by a default agent.
const DEFAULT_NAME: &str = "UCT";

/// A game-playing agent that picks every move with a fresh UCT search.
///
/// The agent holds no tree between turns. Time and iteration budgets come
/// from each `select_action` call; everything else (seed, exploration
/// constant, arena capacity) comes from the attached `SearchConfig`.
#[derive(Clone, Debug)]
pub struct UctAgent {
    friendly_name: String,
    player: Option<PlayerId>,
    config: SearchConfig,
}

impl Default for UctAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl UctAgent {
    /// Agent with default tuning and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            friendly_name: DEFAULT_NAME.to_string(),
            player: None,
            config: SearchConfig::default(),
        }
    }

    /// Use `config` as the template for every search.
    ///
    /// Its budget fields are overwritten per call. With a fixed seed every
    /// search from the same position replays identically.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the name shown to the host.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = name.into();
        self
    }

    /// Name shown to the host.
    #[must_use]
    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    /// Seat recorded by `init_ai`, if the agent is seated.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        self.player
    }

    /// Search template.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Whether this agent can play `game`.
    pub fn supports_game<G: Game>(&self, game: &G) -> bool {
        match check_supported(game.config()) {
            Ok(()) => true,
            Err(reason) => {
                debug!(agent = %self.friendly_name, %reason, "game not supported");
                false
            }
        }
    }

    /// Take a seat in `game` as `player`.
    pub fn init_ai<G: Game>(&mut self, game: &G, player: PlayerId) -> Result<(), SearchError> {
        let player_count = game.player_count();
        if player.index() >= player_count {
            return Err(SearchError::InvalidPlayer {
                player: player.0,
                player_count,
            });
        }

        self.player = Some(player);
        info!(agent = %self.friendly_name, %player, player_count, "agent initialised");
        Ok(())
    }

    /// Choose a move for the player to move at `state`.
    ///
    /// `max_seconds <= 0` and `max_iterations <= 0` each mean no limit of
    /// that kind. `_max_depth` is accepted for host compatibility and has no
    /// effect: rollouts always run to the end of the game.
    pub fn select_action<G: Game>(
        &self,
        game: &G,
        state: &G::State,
        max_seconds: f64,
        max_iterations: i64,
        _max_depth: i32,
    ) -> Result<MoveOf<G>, SearchError> {
        let config = self
            .config
            .clone()
            .with_max_seconds(max_seconds)
            .with_max_iterations(max_iterations);
        select_action_with(game, state, &config)
    }

    /// Leave the seat.
    pub fn close_ai(&mut self) {
        if let Some(player) = self.player.take() {
            info!(agent = %self.friendly_name, %player, "agent closed");
        }
    }
}
