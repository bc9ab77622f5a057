//! Normalized centrality measures over the projection.
//!
//! Formulas follow the reference implementations commonly used for these
//! measures: degree as deg/(n-1), Brandes accumulation for betweenness with
//! optional pivot sampling, the improved closeness formula that scales by
//! reachable share, and (A+I) power iteration for eigenvector centrality.

use crate::error::AnalyticsError;
use crate::graph::AnalysisGraph;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rg_model::NodeId;
use std::collections::{HashMap, VecDeque};

/// Degree centrality, deg/(n-1); every node scores 1.0 when n ≤ 1.
#[must_use]
pub fn degree_centrality(graph: &AnalysisGraph) -> HashMap<NodeId, f64> {
    let n = graph.node_count();
    if n <= 1 {
        return (0..n).map(|i| (graph.id_at(i).clone(), 1.0)).collect();
    }
    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / (n - 1) as f64;
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let deg = graph.degree(i) as f64;
            (graph.id_at(i).clone(), deg * scale)
        })
        .collect()
}

/// Betweenness centrality via Brandes' algorithm.
///
/// With `pivots = Some(k)` and k below the node count, accumulation runs
/// from k sampled sources and the result is rescaled by n/k; otherwise all
/// sources are used (exact). Pivot choice is seedable for reproducible
/// sampling. Normalization divides by (n-1)(n-2) so scores land in [0,1].
#[must_use]
pub fn betweenness_centrality(
    graph: &AnalysisGraph,
    pivots: Option<usize>,
    seed: Option<u64>,
) -> HashMap<NodeId, f64> {
    let adjacency = graph.adjacency();
    let n = adjacency.len();
    if n == 0 {
        return HashMap::new();
    }

    let sources: Vec<usize> = match pivots {
        Some(k) if k < n => {
            let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
            rand::seq::index::sample(&mut rng, n, k).into_vec()
        }
        _ => (0..n).collect(),
    };

    let mut centrality = vec![0.0_f64; n];
    for &s in &sources {
        accumulate_from_source(&adjacency, s, &mut centrality);
    }

    if n > 2 {
        #[allow(clippy::cast_precision_loss)]
        let mut scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
        if sources.len() < n {
            #[allow(clippy::cast_precision_loss)]
            let correction = n as f64 / sources.len() as f64;
            scale *= correction;
        }
        for value in &mut centrality {
            *value *= scale;
        }
    }

    (0..n)
        .map(|i| (graph.id_at(i).clone(), centrality[i]))
        .collect()
}

/// One Brandes source: BFS shortest-path counting plus dependency
/// accumulation in reverse finish order.
fn accumulate_from_source(adjacency: &[Vec<usize>], source: usize, centrality: &mut [f64]) {
    let n = adjacency.len();
    let mut stack = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![-1_i64; n];

    sigma[source] = 1.0;
    dist[source] = 0;
    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for &w in &adjacency[v] {
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0_f64; n];
    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != source {
            centrality[w] += delta[w];
        }
    }
}

/// Closeness centrality with the reachable-share correction, so scores
/// stay comparable on disconnected graphs.
#[must_use]
pub fn closeness_centrality(graph: &AnalysisGraph) -> HashMap<NodeId, f64> {
    let adjacency = graph.adjacency();
    let n = adjacency.len();
    let mut out = HashMap::with_capacity(n);

    for u in 0..n {
        let mut total = 0_usize;
        let mut reached_others = 0_usize;
        let mut dist = vec![usize::MAX; n];
        dist[u] = 0;
        let mut queue = VecDeque::from([(u, 0_usize)]);
        while let Some((v, dv)) = queue.pop_front() {
            for &w in &adjacency[v] {
                if dist[w] == usize::MAX {
                    dist[w] = dv + 1;
                    total += dv + 1;
                    reached_others += 1;
                    queue.push_back((w, dv + 1));
                }
            }
        }

        let score = if total > 0 && n > 1 {
            #[allow(clippy::cast_precision_loss)]
            let r = reached_others as f64;
            #[allow(clippy::cast_precision_loss)]
            let share = r / (n - 1) as f64;
            #[allow(clippy::cast_precision_loss)]
            let inverse_distance = r / total as f64;
            inverse_distance * share
        } else {
            0.0
        };
        out.insert(graph.id_at(u).clone(), score);
    }

    out
}

/// Eigenvector centrality via (A+I) power iteration with L2
/// renormalization per step.
///
/// # Errors
/// Returns [`AnalyticsError::Convergence`] when the L1 drift has not
/// fallen below `n * tolerance` within `max_iterations`.
pub fn eigenvector_centrality(
    graph: &AnalysisGraph,
    max_iterations: usize,
    tolerance: f64,
) -> Result<HashMap<NodeId, f64>, AnalyticsError> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(HashMap::new());
    }
    let weighted = graph.weighted_adjacency();

    #[allow(clippy::cast_precision_loss)]
    let mut x = vec![1.0 / n as f64; n];
    for _ in 0..max_iterations {
        let previous = x.clone();
        for (u, neighbors) in weighted.iter().enumerate() {
            for &(v, weight) in neighbors {
                x[v] += previous[u] * weight;
            }
        }

        let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        let norm = if norm > 0.0 { norm } else { 1.0 };
        for value in &mut x {
            *value /= norm;
        }

        let drift: f64 = x
            .iter()
            .zip(&previous)
            .map(|(now, before)| (now - before).abs())
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let threshold = n as f64 * tolerance;
        if drift < threshold {
            return Ok((0..n).map(|i| (graph.id_at(i).clone(), x[i])).collect());
        }
    }

    Err(AnalyticsError::Convergence {
        iterations: max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_model::{EdgeKind, KnowledgeEdge, KnowledgeNode, NodeKind};

    fn star(leaves: usize) -> AnalysisGraph {
        let mut nodes = vec![KnowledgeNode::new(NodeId::new("hub"), "hub", NodeKind::Paper)];
        let mut edges = Vec::new();
        for i in 0..leaves {
            let id = format!("leaf{i}");
            nodes.push(KnowledgeNode::new(NodeId::new(&id), &id, NodeKind::Author));
            edges.push(KnowledgeEdge::new(
                NodeId::new("hub"),
                NodeId::new(&id),
                EdgeKind::AuthoredBy,
            ));
        }
        AnalysisGraph::build(&nodes, &edges)
    }

    fn path(ids: &[&str]) -> AnalysisGraph {
        let nodes: Vec<_> = ids
            .iter()
            .map(|id| KnowledgeNode::new(NodeId::new(*id), *id, NodeKind::Paper))
            .collect();
        let edges: Vec<_> = ids
            .windows(2)
            .map(|pair| {
                KnowledgeEdge::new(NodeId::new(pair[0]), NodeId::new(pair[1]), EdgeKind::Cites)
            })
            .collect();
        AnalysisGraph::build(&nodes, &edges)
    }

    #[test]
    fn degree_on_star() {
        let graph = star(4);
        let scores = degree_centrality(&graph);
        assert!((scores[&NodeId::new("hub")] - 1.0).abs() < 1e-12);
        assert!((scores[&NodeId::new("leaf0")] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn degree_of_single_node_is_one() {
        let graph = star(0);
        let scores = degree_centrality(&graph);
        assert!((scores[&NodeId::new("hub")] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn betweenness_middle_of_path() {
        // P1 - P2 - P3: only the middle node lies on shortest paths.
        let graph = path(&["p1", "p2", "p3"]);
        let scores = betweenness_centrality(&graph, None, None);
        assert!((scores[&NodeId::new("p2")] - 1.0).abs() < 1e-12);
        assert!(scores[&NodeId::new("p1")].abs() < 1e-12);
    }

    #[test]
    fn sampled_betweenness_with_all_pivots_matches_exact() {
        let graph = path(&["a", "b", "c", "d", "e"]);
        let exact = betweenness_centrality(&graph, None, None);
        let clamped = betweenness_centrality(&graph, Some(100), Some(7));
        for (id, score) in &exact {
            assert!((score - clamped[id]).abs() < 1e-12);
        }
    }

    #[test]
    fn betweenness_scores_stay_normalized() {
        let graph = star(6);
        for score in betweenness_centrality(&graph, None, None).values() {
            assert!((0.0..=1.0).contains(score));
        }
    }

    #[test]
    fn closeness_prefers_the_hub() {
        let graph = star(5);
        let scores = closeness_centrality(&graph);
        assert!(scores[&NodeId::new("hub")] > scores[&NodeId::new("leaf1")]);
        assert!((scores[&NodeId::new("hub")] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn closeness_of_isolated_node_is_zero() {
        let nodes = vec![KnowledgeNode::new(NodeId::new("only"), "only", NodeKind::Paper)];
        let graph = AnalysisGraph::build(&nodes, &[]);
        let scores = closeness_centrality(&graph);
        assert!(scores[&NodeId::new("only")].abs() < f64::EPSILON);
    }

    #[test]
    fn eigenvector_ranks_hub_highest() {
        let graph = star(4);
        let scores = eigenvector_centrality(&graph, 100, 1e-6).unwrap();
        let hub = scores[&NodeId::new("hub")];
        for i in 0..4 {
            assert!(hub > scores[&NodeId::new(&format!("leaf{i}"))]);
        }
    }

    #[test]
    fn eigenvector_on_empty_graph_is_empty() {
        let graph = AnalysisGraph::build(&[], &[]);
        assert!(eigenvector_centrality(&graph, 100, 1e-6).unwrap().is_empty());
    }

    #[test]
    fn eigenvector_with_no_iteration_budget_fails_to_converge() {
        let graph = star(2);
        let result = eigenvector_centrality(&graph, 0, 1e-6);
        assert_eq!(result, Err(AnalyticsError::Convergence { iterations: 0 }));
    }
}
