//! Whole-graph structural analysis.
//!
//! Produces a [`StructureReport`] with density, connectivity, clustering,
//! path metrics, and (for small graphs) the full centrality block. Metric
//! failures degrade the report instead of failing the caller: counts are
//! always present and the error is carried in [`StructureReport::error`].

use crate::centrality::{
    betweenness_centrality, closeness_centrality, degree_centrality, eigenvector_centrality,
};
use crate::graph::AnalysisGraph;
use petgraph::algo::connected_components;
use rg_model::{CentralityReport, KnowledgeEdge, KnowledgeNode, StructureReport};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Knobs for [`analyze_structure`].
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    /// Skip the centrality block on graphs above this many nodes.
    pub centrality_ceiling: usize,
    /// Pivot count for sampled betweenness inside the centrality block.
    pub betweenness_pivots: usize,
    /// Seed for pivot sampling; `None` draws from entropy.
    pub pivot_seed: Option<u64>,
    /// Power-iteration budget for eigenvector centrality.
    pub eigenvector_iterations: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            centrality_ceiling: 500,
            betweenness_pivots: 100,
            pivot_seed: None,
            eigenvector_iterations: EIGENVECTOR_MAX_ITERATIONS,
        }
    }
}

const EIGENVECTOR_MAX_ITERATIONS: usize = 100;
const EIGENVECTOR_TOLERANCE: f64 = 1e-6;

/// Analyze a node/edge set and produce the structural report.
#[must_use]
pub fn analyze_structure(
    nodes: &[KnowledgeNode],
    edges: &[KnowledgeEdge],
    options: &AnalysisOptions,
) -> StructureReport {
    let mut report = StructureReport {
        node_count: nodes.len(),
        ..StructureReport::default()
    };
    if nodes.is_empty() {
        return report;
    }

    // Edge count comes from the projection, never the raw input, so
    // dangling edges are invisible to the report.
    let graph = AnalysisGraph::build(nodes, edges);
    report.edge_count = graph.edge_count();
    report.density = density(&graph);

    let components = connected_components(graph.inner());
    report.connected_components = components;
    report.is_connected = components == 1;

    report.average_clustering = average_clustering(&graph);

    if report.is_connected {
        let (diameter, average_path_length) = path_metrics(&graph);
        report.diameter = diameter;
        report.average_path_length = average_path_length;
    }

    if graph.node_count() <= options.centrality_ceiling {
        match eigenvector_centrality(&graph, options.eigenvector_iterations, EIGENVECTOR_TOLERANCE)
        {
            Ok(eigenvector) => {
                report.centrality = Some(CentralityReport {
                    degree: degree_centrality(&graph),
                    betweenness: betweenness_centrality(
                        &graph,
                        Some(options.betweenness_pivots),
                        options.pivot_seed,
                    ),
                    closeness: closeness_centrality(&graph),
                    eigenvector,
                });
            }
            Err(error) => {
                warn!(%error, "structural analysis degraded");
                report.error = Some(error.to_string());
            }
        }
    } else {
        debug!(
            nodes = graph.node_count(),
            ceiling = options.centrality_ceiling,
            "skipping centrality block on large graph"
        );
    }

    report
}

/// Undirected density 2m/(n(n-1)); zero when n ≤ 1.
fn density(graph: &AnalysisGraph) -> f64 {
    let n = graph.node_count();
    if n <= 1 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let possible = (n * (n - 1)) as f64;
    #[allow(clippy::cast_precision_loss)]
    let m = graph.edge_count() as f64;
    2.0 * m / possible
}

/// Average local clustering coefficient over all nodes. Nodes of degree
/// below two contribute zero.
fn average_clustering(graph: &AnalysisGraph) -> f64 {
    let adjacency = graph.adjacency();
    let n = adjacency.len();
    if n == 0 {
        return 0.0;
    }

    let mut total = 0.0_f64;
    for neighbors in &adjacency {
        let degree = neighbors.len();
        if degree < 2 {
            continue;
        }
        let mut triangles = 0_usize;
        for (i, &a) in neighbors.iter().enumerate() {
            for &b in &neighbors[i + 1..] {
                if adjacency[a].contains(&b) {
                    triangles += 1;
                }
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let local = 2.0 * triangles as f64 / (degree * (degree - 1)) as f64;
        total += local;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = n as f64;
    total / count
}

/// Diameter and average shortest-path length via all-pairs BFS.
/// Only meaningful on connected graphs; the caller guards for that.
fn path_metrics(graph: &AnalysisGraph) -> (Option<usize>, Option<f64>) {
    let adjacency = graph.adjacency();
    let n = adjacency.len();
    if n <= 1 {
        return (Some(0), Some(0.0));
    }

    let mut diameter = 0_usize;
    let mut total = 0_usize;
    let mut pairs = 0_usize;
    for source in 0..n {
        for (target, distance) in bfs_distances(&adjacency, source) {
            if target == source {
                continue;
            }
            diameter = diameter.max(distance);
            total += distance;
            pairs += 1;
        }
    }

    if pairs == 0 {
        return (Some(0), Some(0.0));
    }
    #[allow(clippy::cast_precision_loss)]
    let average = total as f64 / pairs as f64;
    (Some(diameter), Some(average))
}

/// Unweighted single-source shortest paths; unreachable nodes are absent.
fn bfs_distances(adjacency: &[Vec<usize>], source: usize) -> Vec<(usize, usize)> {
    let mut dist = vec![usize::MAX; adjacency.len()];
    dist[source] = 0;
    let mut out = vec![(source, 0_usize)];
    let mut queue = VecDeque::from([(source, 0_usize)]);
    while let Some((v, dv)) = queue.pop_front() {
        for &w in &adjacency[v] {
            if dist[w] == usize::MAX {
                dist[w] = dv + 1;
                out.push((w, dv + 1));
                queue.push_back((w, dv + 1));
            }
        }
    }
    out
}
