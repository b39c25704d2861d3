//! State registry: one search node per distinct state.
//!
//! Nodes live in an arena owned by the registry and are addressed by
//! [`NodeId`]. A registry belongs to exactly one search invocation and is
//! dropped with it.

use std::collections::HashMap;
use std::hash::Hash;

use crate::node::{NodeId, SearchNode};

/// Get-or-create mapping from state value to its unique node.
#[derive(Debug)]
pub struct StateRegistry<S, K> {
    nodes: Vec<SearchNode<S, K>>,
    index: HashMap<S, NodeId>,
}

impl<S: Clone + Eq + Hash, K> StateRegistry<S, K> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Return the node for `state`, creating an unexplored one on first
    /// reference.
    pub fn get_or_create(&mut self, state: &S) -> NodeId {
        if let Some(&id) = self.index.get(state) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode::new(state.clone()));
        self.index.insert(state.clone(), id);
        id
    }

    /// Look up an existing node without creating one.
    #[must_use]
    pub fn get(&self, state: &S) -> Option<NodeId> {
        self.index.get(state).copied()
    }

    /// Number of distinct states seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no state has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk parent links from `id` back to the root; root first.
    ///
    /// The walk is bounded by the arena size.
    #[must_use]
    pub fn reconstruct(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            if chain.len() >= self.nodes.len() {
                break;
            }
            chain.push(node_id);
            current = self.node(node_id).parent;
        }
        chain.reverse();
        chain
    }
}

impl<S, K> StateRegistry<S, K> {
    /// Borrow a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SearchNode<S, K> {
        &self.nodes[id.0]
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut SearchNode<S, K> {
        &mut self.nodes[id.0]
    }
}

impl<S: Clone + Eq + Hash, K> Default for StateRegistry<S, K> {
    fn default() -> Self {
        Self::new()
    }
}
