//! Core search node and frontier key types.

/// Index of a node inside the per-search registry arena.
///
/// Parent links are `NodeId`s resolved through the registry, never owning
/// references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the registry arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-state bookkeeping for one search invocation.
#[derive(Debug, Clone)]
pub struct SearchNode<S, K> {
    /// The state this node stands for.
    pub state: S,
    /// Best known accumulated cost. `None` until the node is first opened.
    pub cost: Option<i64>,
    /// Queue ordering key. Meaningful only while open or closed.
    pub rank: Option<i64>,
    /// Predecessor on the best known route (`None` for the root).
    pub parent: Option<NodeId>,
    /// Class of the edge that produced this node from its parent.
    pub inbound: Option<K>,
    /// Number of edges from the root along the parent chain.
    pub depth: u32,
    /// In the open set.
    pub open: bool,
    /// Expanded and not re-opened since.
    pub closed: bool,
    /// Current slot in the open-set heap while open.
    pub(crate) heap_index: Option<usize>,
    /// Push sequence number, refreshed on every push.
    pub(crate) push_order: u64,
}

impl<S, K> SearchNode<S, K> {
    /// A fresh, unexplored node.
    #[must_use]
    pub fn new(state: S) -> Self {
        Self {
            state,
            cost: None,
            rank: None,
            parent: None,
            inbound: None,
            depth: 0,
            open: false,
            closed: false,
            heap_index: None,
            push_order: 0,
        }
    }

    /// Neither open nor closed.
    #[must_use]
    pub fn is_unexplored(&self) -> bool {
        !self.open && !self.closed
    }

    /// Current heap slot, if the node is queued.
    #[must_use]
    pub fn heap_index(&self) -> Option<usize> {
        self.heap_index
    }

    /// The frontier ordering key for this node.
    #[must_use]
    pub fn frontier_key(&self) -> FrontierKey {
        FrontierKey {
            rank: self.rank.unwrap_or(i64::MAX),
            depth: self.depth,
            push_order: self.push_order,
        }
    }
}

/// The frontier ordering key: `(rank, depth, push_order)`.
///
/// Lower rank first, then shallower depth, then older push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub rank: i64,
    pub depth: u32,
    pub push_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank
            .cmp(&other.rank)
            .then(self.depth.cmp(&other.depth))
            .then(self.push_order.cmp(&other.push_order))
    }
}
