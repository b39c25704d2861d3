//! Open set: index-tracked binary min-heap over registry nodes.
//!
//! The heap stores [`NodeId`]s; every queued node records its current slot,
//! so a node whose cost improves can be removed in O(log n) and re-pushed
//! with a new rank (decrease-key).

use crate::node::{FrontierKey, NodeId};
use crate::registry::StateRegistry;

/// Best-first open set ordered by [`FrontierKey`].
#[derive(Debug, Default)]
pub struct OpenQueue {
    heap: Vec<NodeId>,
    next_push_order: u64,
    high_water: u64,
}

impl OpenQueue {
    /// Create a new empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node and restore heap order.
    ///
    /// The node's `rank` must already be set. Pushing a node that is still
    /// queued is a caller error; it is removed from its old slot first.
    pub fn push<S, K>(&mut self, id: NodeId, registry: &mut StateRegistry<S, K>) {
        if let Some(slot) = registry.node(id).heap_index {
            self.remove(slot, registry);
        }
        let slot = self.heap.len();
        let node = registry.node_mut(id);
        node.push_order = self.next_push_order;
        node.heap_index = Some(slot);
        self.next_push_order += 1;
        self.heap.push(id);
        self.sift_up(slot, registry);

        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Remove and return the best (lowest key) node.
    pub fn pop<S, K>(&mut self, registry: &mut StateRegistry<S, K>) -> Option<NodeId> {
        self.remove(0, registry)
    }

    /// Remove the node at heap slot `slot`.
    ///
    /// Returns `None` if the slot is out of range.
    pub fn remove<S, K>(
        &mut self,
        slot: usize,
        registry: &mut StateRegistry<S, K>,
    ) -> Option<NodeId> {
        if slot >= self.heap.len() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(slot, last, registry);
        let id = self.heap.pop()?;
        registry.node_mut(id).heap_index = None;
        if slot < self.heap.len() {
            self.sift_down(slot, registry);
            self.sift_up(slot, registry);
        }
        Some(id)
    }

    /// Current queue size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of queue size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    fn key<S, K>(&self, slot: usize, registry: &StateRegistry<S, K>) -> FrontierKey {
        registry.node(self.heap[slot]).frontier_key()
    }

    fn swap<S, K>(&mut self, a: usize, b: usize, registry: &mut StateRegistry<S, K>) {
        self.heap.swap(a, b);
        registry.node_mut(self.heap[a]).heap_index = Some(a);
        registry.node_mut(self.heap[b]).heap_index = Some(b);
    }

    fn sift_up<S, K>(&mut self, mut slot: usize, registry: &mut StateRegistry<S, K>) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.key(slot, registry) >= self.key(parent, registry) {
                break;
            }
            self.swap(slot, parent, registry);
            slot = parent;
        }
    }

    fn sift_down<S, K>(&mut self, mut slot: usize, registry: &mut StateRegistry<S, K>) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut best = left;
            if right < len && self.key(right, registry) < self.key(left, registry) {
                best = right;
            }
            if self.key(best, registry) >= self.key(slot, registry) {
                break;
            }
            self.swap(slot, best, registry);
            slot = best;
        }
    }
}
