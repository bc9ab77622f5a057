//! Insertion-ordered build container for nodes and edges.

use crate::edge::KnowledgeEdge;
use crate::node::{KnowledgeNode, NodeId};
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Build-time arena holding one graph under construction.
///
/// Nodes are keyed by id in insertion order, so identical inputs produce
/// identical graphs. Edges are appended without endpoint checks;
/// [`GraphArena::finalize_edges`] drops every edge whose endpoints never
/// made it into the node set and reports how many were dropped.
#[derive(Debug, Clone, Default)]
pub struct GraphArena {
    nodes: IndexMap<NodeId, KnowledgeNode>,
    edges: Vec<KnowledgeEdge>,
}

impl GraphArena {
    /// Empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes admitted so far.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges recorded so far, dangling ones included.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the arena holds no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node with this id was admitted.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Insert a node unless one with the same id already exists.
    ///
    /// Returns whether the node was newly inserted. The first-seen node
    /// wins even when the duplicate carries different attributes.
    pub fn insert_node(&mut self, node: KnowledgeNode) -> bool {
        match self.nodes.entry(node.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(node);
                true
            }
        }
    }

    /// Record an edge. Endpoints are not validated here.
    pub fn push_edge(&mut self, edge: KnowledgeEdge) {
        self.edges.push(edge);
    }

    /// Drop edges with endpoints outside the node set.
    ///
    /// Returns the number of dangling edges removed.
    pub fn finalize_edges(&mut self) -> usize {
        let before = self.edges.len();
        let nodes = &self.nodes;
        self.edges
            .retain(|edge| nodes.contains_key(&edge.source) && nodes.contains_key(&edge.target));
        before - self.edges.len()
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&KnowledgeNode> {
        self.nodes.get(id)
    }

    /// Mutable lookup, used by the assembly pass.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut KnowledgeNode> {
        self.nodes.get_mut(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &KnowledgeNode> {
        self.nodes.values()
    }

    /// Mutable node traversal in insertion order.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut KnowledgeNode> {
        self.nodes.values_mut()
    }

    /// Recorded edges.
    #[must_use]
    pub fn edges(&self) -> &[KnowledgeEdge] {
        &self.edges
    }

    /// Clone the node list in insertion order.
    #[must_use]
    pub fn nodes_vec(&self) -> Vec<KnowledgeNode> {
        self.nodes.values().cloned().collect()
    }

    /// Clone the edge list.
    #[must_use]
    pub fn edges_vec(&self) -> Vec<KnowledgeEdge> {
        self.edges.clone()
    }

    /// Consume into `(nodes, edges)` in insertion order.
    #[must_use]
    pub fn into_parts(self) -> (Vec<KnowledgeNode>, Vec<KnowledgeEdge>) {
        (self.nodes.into_values().collect(), self.edges)
    }
}
