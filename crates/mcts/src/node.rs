//! MCTS node types for tree storage.
//!
//! Nodes live in an arena and refer to each other with indices, so the
//! parent link is a plain handle rather than an owning pointer.

use std::hash::Hash;

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Using indices instead of pointers avoids Rc/RefCell overhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the MCTS tree.
///
/// Each node represents a game position reached by `action` from `parent`
/// and stores the statistics of the simulations that went through it.
#[derive(Clone, Debug)]
pub struct Node<A: Clone + Copy + Eq + Hash> {
    parent: Option<NodeId>,
    action: Option<A>,
    children: Vec<(A, NodeId)>,
    untried_actions: Vec<A>,
    visits: u32,
    wins: u32,
}

impl<A: Clone + Copy + Eq + Hash> Node<A> {
    /// Create a new node with every legal action still untried.
    ///
    /// Duplicate actions are dropped, keeping the first occurrence.
    pub fn new(parent: Option<NodeId>, action: Option<A>, legal_actions: Vec<A>) -> Self {
        let mut untried_actions: Vec<A> = Vec::with_capacity(legal_actions.len());
        for action in legal_actions {
            if !untried_actions.contains(&action) {
                untried_actions.push(action);
            }
        }

        Self {
            parent,
            action,
            children: Vec::new(),
            untried_actions,
            visits: 0,
            wins: 0,
        }
    }

    /// Create the root node.
    pub fn root(legal_actions: Vec<A>) -> Self {
        Self::new(None, None, legal_actions)
    }

    /// Parent of this node (None for root).
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Action that led to this node (None for root).
    pub fn action(&self) -> Option<A> {
        self.action
    }

    /// Expanded children in expansion order.
    pub fn children(&self) -> &[(A, NodeId)] {
        &self.children
    }

    /// Legal actions not expanded yet, in oracle order.
    pub fn untried_actions(&self) -> &[A] {
        &self.untried_actions
    }

    /// Number of simulations backpropagated through this node.
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Number of those simulations won by the searching player.
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Fraction of visits that were wins.
    ///
    /// Returns 0.0 if the node has never been visited.
    pub fn win_rate(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f32 / self.visits as f32
        }
    }

    /// True once every legal action has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }

    /// Child reached by `action`, if it was expanded.
    pub fn child(&self, action: A) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, id)| *id)
    }

    /// Next untried action in oracle order, without removing it.
    pub(crate) fn next_untried(&self) -> Option<A> {
        self.untried_actions.first().copied()
    }

    /// Take the next untried action in oracle order.
    pub(crate) fn take_untried(&mut self) -> Option<A> {
        if self.untried_actions.is_empty() {
            None
        } else {
            Some(self.untried_actions.remove(0))
        }
    }

    pub(crate) fn add_child(&mut self, action: A, id: NodeId) {
        self.children.push((action, id));
    }

    /// Count one simulation through this node.
    pub(crate) fn record(&mut self, won: bool) {
        self.visits += 1;
        if won {
            self.wins += 1;
        }
    }
}
