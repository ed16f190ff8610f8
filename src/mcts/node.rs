//! Search tree node.
//!
//! Nodes live in the `MCTSTree` arena and refer to each other by `NodeId`.
//! The parent link is a plain index, so it never owns anything.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, PlayerMap, SearchError, SearchRng};
use crate::rules::GameState;

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the search tree.
///
/// Owns its own copy of the game state; nothing else in the tree aliases
/// it. `unexpanded` holds the legal moves that do not have a child yet,
/// shuffled once at creation and consumed from the back.
#[derive(Clone, Debug)]
pub struct MCTSNode<S: GameState> {
    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Move that produced this node from its parent (None for root).
    pub move_from_parent: Option<S::Move>,

    /// Position this node represents.
    pub state: S,

    /// Player to move (None at terminal states).
    pub to_move: Option<PlayerId>,

    /// Depth in tree (root = 0).
    pub depth: u32,

    /// Completed simulations that passed through this node.
    pub visits: u32,

    /// Is this a terminal game state?
    pub is_terminal: bool,

    /// Legal moves not yet turned into children.
    pub unexpanded: Vec<S::Move>,

    /// Expanded children, in expansion order.
    pub children: SmallVec<[NodeId; 8]>,

    /// Sum of each player's outcome over all simulations through this node.
    pub score_sums: PlayerMap<f64>,
}

impl<S: GameState> MCTSNode<S> {
    /// Create a node for `state`, enumerating and shuffling its legal moves.
    ///
    /// Fails if the game reports an error, names a player outside
    /// `0..player_count`, or has no legal moves at a non-terminal state.
    pub fn new(
        parent: NodeId,
        move_from_parent: Option<S::Move>,
        state: S,
        depth: u32,
        player_count: usize,
        rng: &mut SearchRng,
    ) -> Result<Self, SearchError> {
        let is_terminal = state.is_terminal().map_err(SearchError::rules)?;

        let (to_move, unexpanded) = if is_terminal {
            (None, Vec::new())
        } else {
            let player = state.current_player().map_err(SearchError::rules)?;
            if player.index() >= player_count {
                return Err(SearchError::InvalidPlayer {
                    player: player.0,
                    player_count,
                });
            }

            let mut moves = state.legal_moves().map_err(SearchError::rules)?;
            if moves.is_empty() {
                return Err(SearchError::DegenerateState { depth });
            }
            rng.shuffle(&mut moves);
            (Some(player), moves)
        };

        Ok(Self {
            parent,
            move_from_parent,
            state,
            to_move,
            depth,
            visits: 0,
            is_terminal,
            unexpanded,
            children: SmallVec::new(),
            score_sums: PlayerMap::with_value(player_count, 0.0),
        })
    }

    /// Create a root node.
    pub fn root(state: S, player_count: usize, rng: &mut SearchRng) -> Result<Self, SearchError> {
        Self::new(NodeId::NONE, None, state, 0, player_count, rng)
    }

    /// Check if any legal moves are still without a child.
    #[inline]
    #[must_use]
    pub fn has_unexpanded(&self) -> bool {
        !self.unexpanded.is_empty()
    }

    /// Check if every legal move has a child.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        !self.is_terminal && self.unexpanded.is_empty()
    }

    /// Take the next unexpanded move.
    pub fn pop_unexpanded(&mut self) -> Option<S::Move> {
        self.unexpanded.pop()
    }

    /// Mean outcome for a player over all visits.
    #[must_use]
    pub fn mean_score(&self, player: PlayerId) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score_sums[player] / self.visits as f64
        }
    }

    /// Record one completed simulation.
    pub fn record(&mut self, outcome: &PlayerMap<f64>) {
        self.visits += 1;
        self.score_sums.accumulate(outcome);
    }
}
