//! Arena-based search tree.
//!
//! Uses a flat `Vec<MCTSNode<S>>` with index-based references, so parent
//! links are non-owning and growing the arena never invalidates a `NodeId`.
//! Dropping the tree drops every node and the game state it owns.

use super::node::{MCTSNode, NodeId};
use crate::core::{PlayerId, SearchError, SearchRng};
use crate::rules::GameState;

/// Arena-based search tree.
#[derive(Clone, Debug)]
pub struct MCTSTree<S: GameState> {
    /// All nodes in the tree.
    nodes: Vec<MCTSNode<S>>,

    /// The root node ID (always 0).
    root: NodeId,

    /// Number of players in the game.
    player_count: usize,
}

impl<S: GameState> MCTSTree<S> {
    /// Create a tree around an already-built root node.
    pub fn new(root: MCTSNode<S>, capacity: usize) -> Self {
        let player_count = root.score_sums.player_count();
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(root);
        Self {
            nodes,
            root: NodeId::new(0),
            player_count,
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode<S> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<S> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and link it under its parent.
    pub fn alloc(&mut self, node: MCTSNode<S>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        let parent = node.parent;
        self.nodes.push(node);
        if !parent.is_none() {
            self.get_mut(parent).children.push(id);
        }
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Player count for this tree.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode<S> {
        self.get(self.root)
    }

    /// Children of a node.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &MCTSNode<S>)> {
        self.get(id).children.iter().map(move |&child| (child, self.get(child)))
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<S>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal).count();
        let unexpanded_moves = self.nodes.iter().map(|n| n.unexpanded.len()).sum();
        let expanded_children = self.nodes.iter().map(|n| n.children.len()).sum();
        let interior_count = self.nodes.iter().filter(|n| !n.children.is_empty()).count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            unexpanded_moves,
            expanded_children,
            interior_count,
        }
    }

    /// Check the bookkeeping invariants after completed iterations.
    ///
    /// Every non-terminal node was reached once as a frontier (except the
    /// root) and every later visit went on into exactly one child, so its
    /// visit count is its children's total plus one. Score sums have one
    /// entry per player and each child points back at its parent.
    pub fn check_invariants(&self) -> Result<(), String> {
        for (id, node) in self.iter() {
            if node.score_sums.player_count() != self.player_count {
                return Err(format!("{id}: {} score sums", node.score_sums.player_count()));
            }

            if node.is_terminal {
                if !node.children.is_empty() || node.has_unexpanded() {
                    return Err(format!("{id}: terminal node with moves"));
                }
            } else {
                let child_visits: u64 = self.children(id).map(|(_, c)| u64::from(c.visits)).sum();
                let own = u64::from(id != self.root);
                if u64::from(node.visits) != child_visits + own {
                    return Err(format!(
                        "{id}: {} visits, children account for {child_visits}",
                        node.visits
                    ));
                }
            }

            for (child_id, child) in self.children(id) {
                if child.parent != id || child.depth.checked_sub(1) != Some(node.depth) || child.move_from_parent.is_none() {
                    return Err(format!("{child_id}: bad link to parent {id}"));
                }
            }

            for player in PlayerId::all(self.player_count) {
                if !node.mean_score(player).is_finite() {
                    return Err(format!("{id}: non-finite mean for {player}"));
                }
            }
        }
        Ok(())
    }

    /// Most visited child of the root, if any.
    ///
    /// See `policy::most_visited` for the tie rule.
    pub fn best_root_child(&self, rng: &mut SearchRng) -> Result<NodeId, SearchError> {
        super::policy::most_visited(self, self.root, rng).ok_or(SearchError::NoExpandedChildren)
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u32,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Legal moves still waiting for expansion, summed over all nodes.
    pub unexpanded_moves: usize,

    /// Parent-child links.
    pub expanded_children: usize,

    /// Nodes with at least one child.
    pub interior_count: usize,
}

impl TreeStats {
    /// Average number of children per node that has any.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.interior_count == 0 {
            0.0
        } else {
            self.expanded_children as f64 / self.interior_count as f64
        }
    }
}
