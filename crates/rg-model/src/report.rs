//! Structural analysis reports.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized centrality scores keyed by node id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CentralityReport {
    /// Degree centrality, deg/(n-1).
    pub degree: HashMap<NodeId, f64>,
    /// Betweenness centrality, sampled above the exact threshold.
    pub betweenness: HashMap<NodeId, f64>,
    /// Closeness centrality.
    pub closeness: HashMap<NodeId, f64>,
    /// Eigenvector centrality via power iteration.
    pub eigenvector: HashMap<NodeId, f64>,
}

/// Summary of graph structure produced by the analyzer.
///
/// Counts refer to the simple undirected projection the analyzer works on.
/// `centrality` is `None` when it was not computed — node count above the
/// ceiling, or a recovered error noted in `error`. Absence means "not
/// computed", never zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureReport {
    /// Node count.
    pub node_count: usize,
    /// Distinct undirected adjacency count.
    pub edge_count: usize,
    /// Density 2m/(n(n-1)); zero for n ≤ 1.
    pub density: f64,
    /// Whether the graph is one connected component.
    pub is_connected: bool,
    /// Number of connected components.
    pub connected_components: usize,
    /// Average local clustering coefficient.
    pub average_clustering: f64,
    /// Longest shortest path; only present when connected.
    #[serde(default)]
    pub diameter: Option<usize>,
    /// Mean shortest-path length; only present when connected.
    #[serde(default)]
    pub average_path_length: Option<f64>,
    /// Centrality block; absent above the node ceiling or on error.
    #[serde(default)]
    pub centrality: Option<CentralityReport>,
    /// Recovered computation error, when one occurred.
    #[serde(default)]
    pub error: Option<String>,
}

impl StructureReport {
    /// Whether any recovered error was recorded.
    #[inline]
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}
