//! Composite node importance scoring.

use crate::centrality::{betweenness_centrality, degree_centrality};
use crate::graph::AnalysisGraph;
use rg_model::{KnowledgeEdge, KnowledgeNode, NodeId};
use std::collections::HashMap;
use tracing::debug;

const DEGREE_WEIGHT: f64 = 0.6;
const BETWEENNESS_WEIGHT: f64 = 0.4;

/// Knobs for [`importance_scores`].
#[derive(Debug, Clone, Copy)]
pub struct ImportanceOptions {
    /// Betweenness is exact up to this many nodes, sampled above it.
    pub exact_ceiling: usize,
    /// Pivot count for sampled betweenness.
    pub pivots: usize,
    /// Seed for pivot sampling; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for ImportanceOptions {
    fn default() -> Self {
        Self {
            exact_ceiling: 500,
            pivots: 100,
            seed: None,
        }
    }
}

/// Score every node as 0.6 × degree centrality + 0.4 × betweenness
/// centrality. Scores land in [0, 1].
#[must_use]
pub fn importance_scores(
    nodes: &[KnowledgeNode],
    edges: &[KnowledgeEdge],
    options: &ImportanceOptions,
) -> HashMap<NodeId, f64> {
    let graph = AnalysisGraph::build(nodes, edges);
    if graph.is_empty() {
        return HashMap::new();
    }

    let degree = degree_centrality(&graph);
    let sampled = graph.node_count() > options.exact_ceiling;
    let betweenness = if sampled {
        betweenness_centrality(&graph, Some(options.pivots), options.seed)
    } else {
        betweenness_centrality(&graph, None, None)
    };
    debug!(nodes = graph.node_count(), sampled, "importance scoring finished");

    degree
        .into_iter()
        .map(|(id, degree_score)| {
            let betweenness_score = betweenness.get(&id).copied().unwrap_or(0.0);
            let combined = DEGREE_WEIGHT * degree_score + BETWEENNESS_WEIGHT * betweenness_score;
            (id, combined)
        })
        .collect()
}
