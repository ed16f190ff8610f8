//! Selection, simulation and final-move policies.
//!
//! - `Ucb1`: which child to descend into once a node is fully expanded
//! - `rollout`: uniform random playout from a frontier to a terminal outcome
//! - `most_visited`: which root child to play when the budget runs out
//!
//! Ties are broken with a single reservoir pass (`SearchRng::replace_tied`)
//! so no child position is favoured across calls.

use crate::core::{PlayerMap, SearchError, SearchRng};
use crate::rules::GameState;

use super::node::NodeId;
use super::tree::MCTSTree;

// =============================================================================
// Selection Policy
// =============================================================================

/// UCB1 (Upper Confidence Bound) selection.
///
/// Formula: Q(a) + c * sqrt(ln(N) / n(a)), where Q is the child's mean
/// outcome for the player to move at the parent. With c = sqrt(2) this is
/// the classic sqrt(2 ln N / n) exploration term.
#[derive(Clone, Copy, Debug)]
pub struct Ucb1 {
    /// Exploration constant c.
    pub exploration: f64,
}

impl Default for Ucb1 {
    fn default() -> Self {
        Self {
            exploration: std::f64::consts::SQRT_2,
        }
    }
}

impl Ucb1 {
    /// Create a UCB1 policy with the given exploration constant.
    #[must_use]
    pub fn new(exploration: f64) -> Self {
        Self { exploration }
    }

    /// UCB1 value of a child.
    ///
    /// An unvisited child scores infinity. The search never asks for one,
    /// since a fresh child is always a frontier.
    #[must_use]
    pub fn score(&self, parent_visits: u32, child_score_sum: f64, child_visits: u32) -> f64 {
        if child_visits == 0 {
            return f64::INFINITY;
        }
        let n = child_visits as f64;
        let ln_parent = (parent_visits.max(1) as f64).ln();
        child_score_sum / n + self.exploration * (ln_parent / n).sqrt()
    }

    /// Pick the child of `node` with the highest UCB1 value for the player
    /// to move at `node`, breaking ties uniformly at random.
    ///
    /// Returns `None` for terminal nodes and nodes without children.
    pub fn select<S: GameState>(
        &self,
        tree: &MCTSTree<S>,
        node: NodeId,
        rng: &mut SearchRng,
    ) -> Option<NodeId> {
        let current = tree.get(node);
        let mover = current.to_move?;

        best_by(tree, node, rng, |child| {
            self.score(current.visits, child.score_sums[mover], child.visits)
        })
    }
}

// =============================================================================
// Final Move Selection
// =============================================================================

/// Child of `node` with the most visits, ties broken uniformly at random.
pub fn most_visited<S: GameState>(
    tree: &MCTSTree<S>,
    node: NodeId,
    rng: &mut SearchRng,
) -> Option<NodeId> {
    best_by(tree, node, rng, |child| child.visits as f64)
}

/// Single-pass argmax over the children of `node` with reservoir
/// tie-breaking.
fn best_by<S, F>(tree: &MCTSTree<S>, node: NodeId, rng: &mut SearchRng, mut value: F) -> Option<NodeId>
where
    S: GameState,
    F: FnMut(&super::node::MCTSNode<S>) -> f64,
{
    let mut best: Option<NodeId> = None;
    let mut best_value = f64::NEG_INFINITY;
    let mut num_best = 0u32;

    for (child_id, child) in tree.children(node) {
        let v = value(child);
        if best.is_none() || v > best_value {
            best = Some(child_id);
            best_value = v;
            num_best = 1;
        } else if v == best_value {
            num_best += 1;
            if rng.replace_tied(num_best) {
                best = Some(child_id);
            }
        }
    }

    best
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Play a private copy of `frontier` to the end with uniformly random
/// moves and return its outcome. `frontier` itself is left untouched.
pub fn rollout<S: GameState>(
    frontier: &S,
    player_count: usize,
    rng: &mut SearchRng,
) -> Result<PlayerMap<f64>, SearchError> {
    let mut state = frontier.clone();
    state.random_playout(rng).map_err(SearchError::rules)?;

    if !state.is_terminal().map_err(SearchError::rules)? {
        return Err(SearchError::UnfinishedPlayout);
    }
    terminal_outcome(&state, player_count)
}

/// Outcome of a terminal state, checked to have one value per player.
pub fn terminal_outcome<S: GameState>(
    state: &S,
    player_count: usize,
) -> Result<PlayerMap<f64>, SearchError> {
    let outcome = state.outcome().map_err(SearchError::rules)?;
    if outcome.player_count() != player_count {
        return Err(SearchError::OutcomeLength {
            expected: player_count,
            actual: outcome.player_count(),
        });
    }
    if let Some((player, value)) = outcome.iter().find(|(_, v)| !v.is_finite()) {
        return Err(SearchError::InvalidOutcome {
            player: player.0,
            value: *value,
        });
    }
    Ok(outcome)
}
