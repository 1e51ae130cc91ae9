//! Arena-allocated MCTS tree.
//!
//! Using a Vec<Node> with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>.

use crate::node::{Node, NodeId};
use std::fmt::{Debug, Write};
use std::hash::Hash;
use uct_core::{Result, SearchError};

/// Arena-allocated MCTS tree.
///
/// Nodes are stored in a contiguous vector and referenced by index. The
/// arena owns every node; a node is never removed on its own, the whole tree
/// is reset between searches.
#[derive(Debug)]
pub struct Tree<A: Clone + Copy + Eq + Hash> {
    nodes: Vec<Node<A>>,
}

impl<A: Clone + Copy + Eq + Hash> Tree<A> {
    /// Create a new tree whose root has the given legal actions.
    pub fn new(root_actions: Vec<A>) -> Self {
        Self {
            nodes: vec![Node::root(root_actions)],
        }
    }

    /// Discard every node and start over from a fresh root.
    pub fn reset(&mut self, root_actions: Vec<A>) {
        self.nodes.clear();
        self.nodes.push(Node::root(root_actions));
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> Result<&Node<A>> {
        self.nodes.get(id.0).ok_or(SearchError::UnknownNode(id.0))
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node<A>> {
        self.nodes.get_mut(id.0).ok_or(SearchError::UnknownNode(id.0))
    }

    /// Add a new node to the tree, returning its ID.
    pub fn add(&mut self, node: Node<A>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should never be true as root always exists).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    pub fn root(&self) -> &Node<A> {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Iterate over every node with its ID, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<A>)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Number of edges between the node and the root.
    pub fn depth(&self, id: NodeId) -> Result<usize> {
        let mut depth = 0;
        let mut current = self.get(id)?.parent();
        while let Some(parent) = current {
            depth += 1;
            current = self.get(parent)?.parent();
        }
        Ok(depth)
    }

    /// Actions leading from the root to the node, root side first.
    pub fn actions_to(&self, id: NodeId) -> Result<Vec<A>> {
        let mut actions = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id)?;
            if let Some(action) = node.action() {
                actions.push(action);
            }
            current = node.parent();
        }
        actions.reverse();
        Ok(actions)
    }
}

impl<A: Clone + Copy + Eq + Hash + Debug> Tree<A> {
    /// Render the tree down to `horizon` levels below the root.
    ///
    /// One line per node, children indented by `indent` spaces per level:
    /// ```text
    /// [root] 3/10 untried=0
    ///   [Some(1)] 2/6 untried=1
    /// ```
    pub fn render(&self, horizon: usize, indent: usize) -> String {
        let mut out = String::new();
        let mut stack = vec![(NodeId::ROOT, 0usize)];

        while let Some((id, level)) = stack.pop() {
            let node = &self.nodes[id.0];
            let label = match node.action() {
                Some(action) => format!("{:?}", action),
                None => "root".to_string(),
            };
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{:width$}[{}] {}/{} untried={}",
                "",
                label,
                node.wins(),
                node.visits(),
                node.untried_actions().len(),
                width = level * indent,
            );

            if level < horizon {
                // Reverse so children print in expansion order.
                for (_, child) in node.children().iter().rev() {
                    stack.push((*child, level + 1));
                }
            }
        }

        out
    }
}
