//! UCT search driver.
//!
//! One search owns one tree. Each iteration walks from the root with UCB1
//! until it reaches a terminal node or a node with an unexpanded move,
//! expands at most one child, plays a uniform random rollout from the new
//! frontier (terminal frontiers are scored directly) and adds the outcome
//! to every node on the way back to the root.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::core::{PlayerMap, SearchError, SearchRng};
use crate::rules::{check_supported, Game, GameState};

use super::config::SearchConfig;
use super::node::{MCTSNode, NodeId};
use super::policy::{rollout, terminal_outcome, Ucb1};
use super::stats::{SearchStats, StopReason};
use super::tree::MCTSTree;

/// Move type of a game.
pub type MoveOf<G> = <<G as Game>::State as GameState>::Move;

/// Chosen move together with how the search got there.
#[derive(Clone, Debug)]
pub struct SearchReport<M> {
    /// Move attached to the most visited root child.
    pub best_move: M,

    /// Counters for the finished search.
    pub stats: SearchStats,
}

/// A single UCT search over one root position.
///
/// The tree, every game state it owns, and the RNG all live exactly as
/// long as this value.
pub struct UctSearch<'g, G: Game> {
    /// The game being searched.
    game: &'g G,

    /// Search configuration.
    config: SearchConfig,

    /// The search tree.
    tree: MCTSTree<G::State>,

    /// RNG for shuffling, tie-breaking and rollouts.
    rng: SearchRng,

    /// Selection policy.
    ucb: Ucb1,

    /// Search statistics.
    stats: SearchStats,
}

impl<'g, G: Game> UctSearch<'g, G> {
    /// Prepare a search from `root_state`.
    ///
    /// Validates the config, runs the capability query, seeds the RNG and
    /// builds the root node from a private copy of `root_state`.
    pub fn new(game: &'g G, root_state: &G::State, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        check_supported(game.config())?;

        let mut rng = match config.seed {
            Some(seed) => SearchRng::new(seed),
            None => SearchRng::from_entropy(),
        };

        let root = MCTSNode::root(root_state.clone(), game.player_count(), &mut rng)?;
        let tree = MCTSTree::new(root, config.node_capacity);

        Ok(Self {
            game,
            ucb: Ucb1::new(config.exploration_constant),
            config,
            tree,
            rng,
            stats: SearchStats::default(),
        })
    }

    /// Run iterations until the budget is spent, then pick a move.
    ///
    /// The iteration cap is checked before every iteration. The deadline is
    /// checked before every iteration except the first, so any budget
    /// completes at least one iteration and an iteration in progress is
    /// never interrupted.
    pub fn run(&mut self) -> Result<SearchReport<MoveOf<G>>, SearchError> {
        if self.tree.root_node().is_terminal {
            return Err(SearchError::TerminalRoot);
        }

        let time_limit = self.config.time_limit();
        let iteration_limit = self.config.iteration_limit();
        if time_limit.is_none() && iteration_limit.is_none() {
            warn!("search started without a time or iteration limit");
        }

        debug!(
            players = self.game.player_count(),
            max_seconds = self.config.max_seconds,
            max_iterations = self.config.max_iterations,
            seed = self.rng.seed(),
            "UCT search started"
        );

        let start = Instant::now();
        let mut completed: u64 = 0;
        let stop_reason = loop {
            if iteration_limit.is_some_and(|cap| completed >= cap) {
                break StopReason::IterationLimit;
            }
            if completed > 0 && time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                break StopReason::TimeLimit;
            }

            self.iterate()?;
            completed += 1;
        };

        self.stats.time_us = start.elapsed().as_micros() as u64;
        self.stats.stop_reason = stop_reason;

        let best_move = self.best_move()?;

        debug!(
            iterations = self.stats.iterations,
            nodes = self.tree.len(),
            time_us = self.stats.time_us,
            stop_reason = ?self.stats.stop_reason,
            best_move = ?best_move,
            "UCT search finished"
        );

        Ok(SearchReport {
            best_move,
            stats: self.stats.clone(),
        })
    }

    /// Run one full iteration and return the frontier it simulated from.
    pub fn iterate(&mut self) -> Result<NodeId, SearchError> {
        let frontier = self.select_frontier()?;
        let outcome = self.evaluate(frontier)?;
        self.backpropagate(frontier, &outcome);
        self.stats.iterations += 1;

        trace!(
            iteration = self.stats.iterations,
            frontier = frontier.raw(),
            "iteration complete"
        );

        Ok(frontier)
    }

    /// Descend from the root until a terminal node is reached or a new
    /// child has been expanded.
    fn select_frontier(&mut self) -> Result<NodeId, SearchError> {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.is_terminal {
                return Ok(current);
            }
            if node.has_unexpanded() {
                return self.expand(current);
            }

            let depth = node.depth;
            current = self
                .ucb
                .select(&self.tree, current, &mut self.rng)
                .ok_or(SearchError::DegenerateState { depth })?;
        }
    }

    /// Materialise the child for the next unexpanded move of `parent`.
    fn expand(&mut self, parent: NodeId) -> Result<NodeId, SearchError> {
        let player_count = self.tree.player_count();
        let node = self.tree.get_mut(parent);
        // A node's depth is below the arena length, which `NodeId` bounds by u32.
        let depth = node.depth + 1;
        let mv = node
            .pop_unexpanded()
            .ok_or(SearchError::DegenerateState { depth: node.depth })?;

        let state = node.state.apply_move(&mv).map_err(SearchError::rules)?;
        let child = MCTSNode::new(parent, Some(mv), state, depth, player_count, &mut self.rng)?;
        let child_id = self.tree.alloc(child);

        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        trace!(node = child_id.raw(), parent = parent.raw(), depth, "expanded");

        Ok(child_id)
    }

    /// Outcome for a frontier: read directly when terminal, otherwise from
    /// a rollout on a copy of its state.
    fn evaluate(&mut self, frontier: NodeId) -> Result<PlayerMap<f64>, SearchError> {
        let player_count = self.tree.player_count();
        let node = self.tree.get(frontier);

        if node.is_terminal {
            self.stats.terminal_hits += 1;
            terminal_outcome(&node.state, player_count)
        } else {
            self.stats.simulations += 1;
            rollout(&node.state, player_count, &mut self.rng)
        }
    }

    /// Add `outcome` to every node from `frontier` up to the root.
    fn backpropagate(&mut self, frontier: NodeId, outcome: &PlayerMap<f64>) {
        let mut current = frontier;
        while !current.is_none() {
            let node = self.tree.get_mut(current);
            node.record(outcome);
            current = node.parent;
        }
    }

    /// Move of the most visited root child.
    pub fn best_move(&mut self) -> Result<MoveOf<G>, SearchError> {
        let best = self.tree.best_root_child(&mut self.rng)?;
        self.tree
            .get(best)
            .move_from_parent
            .clone()
            .ok_or(SearchError::NoExpandedChildren)
    }

    /// Visit count of every expanded root move.
    pub fn root_visits(&self) -> Vec<(MoveOf<G>, u32)> {
        self.tree
            .children(self.tree.root())
            .filter_map(|(_, child)| child.move_from_parent.clone().map(|mv| (mv, child.visits)))
            .collect()
    }

    /// Share of root visits per expanded root move.
    ///
    /// Probabilities sum to ~1.0 once at least one iteration has completed.
    pub fn action_probabilities(&self) -> Vec<(MoveOf<G>, f64)> {
        let visits = self.root_visits();
        let total: u32 = visits.iter().map(|(_, v)| v).sum();

        if total == 0 {
            let uniform = 1.0 / visits.len().max(1) as f64;
            return visits.into_iter().map(|(mv, _)| (mv, uniform)).collect();
        }

        visits
            .into_iter()
            .map(|(mv, v)| (mv, v as f64 / total as f64))
            .collect()
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree<G::State> {
        &self.tree
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Seed the RNG was created from; replaying it reproduces this search.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

/// Choose a move for the player to move at `root_state`.
///
/// `max_seconds <= 0` means no time limit and `max_iterations <= 0` means
/// no iteration limit; at least one should be set or the call never
/// returns. The RNG is seeded from OS entropy.
pub fn select_action<G: Game>(
    game: &G,
    root_state: &G::State,
    max_seconds: f64,
    max_iterations: i64,
) -> Result<MoveOf<G>, SearchError> {
    select_action_with(game, root_state, &SearchConfig::budget(max_seconds, max_iterations))
}

/// `select_action` with a full configuration.
pub fn select_action_with<G: Game>(
    game: &G,
    root_state: &G::State,
    config: &SearchConfig,
) -> Result<MoveOf<G>, SearchError> {
    search(game, root_state, config).map(|report| report.best_move)
}

/// Run a complete search and return the chosen move with its statistics.
pub fn search<G: Game>(
    game: &G,
    root_state: &G::State,
    config: &SearchConfig,
) -> Result<SearchReport<MoveOf<G>>, SearchError> {
    UctSearch::new(game, root_state, config.clone())?.run()
}
