//! Simple undirected projection of a built graph.
//!
//! Analysis runs on a [`petgraph`] graph rather than the raw node/edge
//! lists: parallel edges collapse to one adjacency (first weight wins) and
//! self-loops are skipped, so degree and path semantics match a simple
//! graph. Raw-list counts live in the snapshot metadata instead.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rg_model::{KnowledgeEdge, KnowledgeNode, NodeId};
use std::collections::HashMap;

/// Undirected projection with id lookups in both directions.
///
/// Node indices are dense and follow the input slice order, so `id_at(i)`
/// corresponds to the i-th input node.
#[derive(Debug, Clone)]
pub struct AnalysisGraph {
    graph: UnGraph<NodeId, f64>,
    indices: HashMap<NodeId, NodeIndex>,
}

impl AnalysisGraph {
    /// Project nodes and edges into a simple undirected graph.
    ///
    /// Edges referencing unknown endpoints are skipped rather than
    /// rejected; builders filter dangling edges before analysis, but the
    /// projection stays total for standalone callers.
    #[must_use]
    pub fn build(nodes: &[KnowledgeNode], edges: &[KnowledgeEdge]) -> Self {
        let mut graph = UnGraph::with_capacity(nodes.len(), edges.len());
        let mut indices = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let idx = graph.add_node(node.id.clone());
            indices.insert(node.id.clone(), idx);
        }

        for edge in edges {
            let (Some(&a), Some(&b)) = (indices.get(&edge.source), indices.get(&edge.target))
            else {
                continue;
            };
            if a == b {
                continue;
            }
            if graph.find_edge(a, b).is_none() {
                graph.add_edge(a, b, edge.weight);
            }
        }

        Self { graph, indices }
    }

    /// Number of projected nodes.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct undirected adjacencies.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the projection is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Dense index for a node id.
    #[must_use]
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.indices.get(id).map(|idx| idx.index())
    }

    /// Node id at a dense index.
    ///
    /// # Panics
    /// Panics when the index is out of range; indices come from this graph.
    #[must_use]
    pub fn id_at(&self, index: usize) -> &NodeId {
        &self.graph[NodeIndex::new(index)]
    }

    /// Degree of the node at a dense index.
    #[must_use]
    pub fn degree(&self, index: usize) -> usize {
        self.graph.neighbors(NodeIndex::new(index)).count()
    }

    /// Plain neighbor lists indexed by dense node position.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.graph.node_count()];
        for edge in self.graph.edge_references() {
            let a = edge.source().index();
            let b = edge.target().index();
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        adjacency
    }

    /// Weighted neighbor lists, for modularity optimization and power
    /// iteration.
    #[must_use]
    pub fn weighted_adjacency(&self) -> Vec<Vec<(usize, f64)>> {
        let mut adjacency = vec![Vec::new(); self.graph.node_count()];
        for edge in self.graph.edge_references() {
            let a = edge.source().index();
            let b = edge.target().index();
            let weight = *edge.weight();
            adjacency[a].push((b, weight));
            adjacency[b].push((a, weight));
        }
        adjacency
    }

    /// The underlying petgraph graph.
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &UnGraph<NodeId, f64> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_model::{EdgeKind, NodeKind};

    fn node(id: &str) -> KnowledgeNode {
        KnowledgeNode::new(NodeId::new(id), id, NodeKind::Paper)
    }

    fn edge(a: &str, b: &str) -> KnowledgeEdge {
        KnowledgeEdge::new(NodeId::new(a), NodeId::new(b), EdgeKind::Cites)
    }

    #[test]
    fn parallel_edges_collapse() {
        let nodes = vec![node("a"), node("b")];
        let edges = vec![edge("a", "b"), edge("b", "a"), edge("a", "b")];
        let graph = AnalysisGraph::build(&nodes, &edges);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(0), 1);
    }

    #[test]
    fn self_loops_are_skipped() {
        let nodes = vec![node("a")];
        let edges = vec![edge("a", "a")];
        let graph = AnalysisGraph::build(&nodes, &edges);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.degree(0), 0);
    }

    #[test]
    fn unknown_endpoints_are_skipped() {
        let nodes = vec![node("a")];
        let edges = vec![edge("a", "ghost")];
        let graph = AnalysisGraph::build(&nodes, &edges);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn indices_follow_input_order() {
        let nodes = vec![node("x"), node("y"), node("z")];
        let graph = AnalysisGraph::build(&nodes, &[]);
        assert_eq!(graph.id_at(1).as_str(), "y");
        assert_eq!(graph.index_of(&NodeId::new("z")), Some(2));
    }
}
