//! Community detection and cluster construction.
//!
//! Runs Louvain modularity optimization over the undirected projection and
//! turns the surviving communities (size ≥ 2) into [`GraphCluster`] records
//! with palette colors and names derived from the dominant member kind.
//!
//! The whole pass is deterministic: nodes are swept in insertion order,
//! candidate communities are visited in ascending id order, and community
//! labels are compacted by first appearance. The same input always yields
//! the same partition.

use crate::graph::AnalysisGraph;
use rg_model::{ClusterId, GraphCluster, KnowledgeEdge, KnowledgeNode, NodeId, NodeKind};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Fixed display palette, cycled by raw community index.
pub const CLUSTER_PALETTE: [&str; 7] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8",
];

/// Minimum modularity gain for a local move to be accepted.
const GAIN_EPSILON: f64 = 1e-12;

/// Weighted adjacency for one Louvain level. Self-loop weight is stored
/// once and counted twice toward the node degree.
type LevelGraph = Vec<BTreeMap<usize, f64>>;

/// Louvain community membership, indexed by node position in `nodes`.
///
/// Labels are dense and ordered by first appearance. An edgeless graph
/// yields one singleton community per node.
#[must_use]
pub fn louvain_communities(nodes: &[KnowledgeNode], edges: &[KnowledgeEdge]) -> Vec<usize> {
    let graph = AnalysisGraph::build(nodes, edges);
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    let mut level: LevelGraph = graph
        .weighted_adjacency()
        .into_iter()
        .map(|neighbors| neighbors.into_iter().collect())
        .collect();
    let mut membership: Vec<usize> = (0..n).collect();

    let m2: f64 = level.iter().flat_map(BTreeMap::values).sum();
    if m2 <= 0.0 {
        return membership;
    }

    loop {
        let (labels, improved) = one_level(&level, m2);
        let labels = compact_labels(&labels);
        let count = labels.iter().copied().max().map_or(0, |max| max + 1);
        for slot in &mut membership {
            *slot = labels[*slot];
        }
        if !improved || count == level.len() {
            debug!(nodes = n, communities = count, "louvain converged");
            return membership;
        }
        level = aggregate(&level, &labels, count);
    }
}

/// One local-move phase. Sweeps nodes in index order until no move
/// improves modularity, returning per-node community labels and whether
/// anything moved at all.
fn one_level(level: &LevelGraph, m2: f64) -> (Vec<usize>, bool) {
    let n = level.len();
    let k: Vec<f64> = (0..n)
        .map(|u| {
            level[u]
                .iter()
                .map(|(&v, &w)| if v == u { 2.0 * w } else { w })
                .sum()
        })
        .collect();
    let mut community: Vec<usize> = (0..n).collect();
    let mut tot = k.clone();
    let mut moved_any = false;

    loop {
        let mut moved = false;
        for u in 0..n {
            let current = community[u];
            let mut links: BTreeMap<usize, f64> = BTreeMap::new();
            for (&v, &w) in &level[u] {
                if v != u {
                    *links.entry(community[v]).or_insert(0.0) += w;
                }
            }

            tot[current] -= k[u];
            let stay = links.get(&current).copied().unwrap_or(0.0) - tot[current] * k[u] / m2;
            let mut best = (current, stay);
            for (&candidate, &weight) in &links {
                if candidate == current {
                    continue;
                }
                let gain = weight - tot[candidate] * k[u] / m2;
                if gain > best.1 + GAIN_EPSILON {
                    best = (candidate, gain);
                }
            }
            tot[best.0] += k[u];

            if best.0 != current {
                community[u] = best.0;
                moved = true;
                moved_any = true;
            }
        }
        if !moved {
            break;
        }
    }

    (community, moved_any)
}

/// Relabel communities densely by first appearance.
fn compact_labels(raw: &[usize]) -> Vec<usize> {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    let mut out = Vec::with_capacity(raw.len());
    for &label in raw {
        let next = remap.len();
        out.push(*remap.entry(label).or_insert(next));
    }
    out
}

/// Collapse each community into a single node, merging edge weights.
fn aggregate(level: &LevelGraph, labels: &[usize], count: usize) -> LevelGraph {
    let mut next: LevelGraph = vec![BTreeMap::new(); count];
    for (u, neighbors) in level.iter().enumerate() {
        for (&v, &w) in neighbors {
            // Visit each undirected pair once; self-loops pass through.
            if v < u {
                continue;
            }
            let cu = labels[u];
            let cv = labels[v];
            if cu == cv {
                *next[cu].entry(cu).or_insert(0.0) += w;
            } else {
                *next[cu].entry(cv).or_insert(0.0) += w;
                *next[cv].entry(cu).or_insert(0.0) += w;
            }
        }
    }
    next
}

/// Detect clusters over the node/edge set.
///
/// Cluster ids are raw community indices, so skipped singleton communities
/// leave gaps in the id sequence and in the palette rotation. Members keep
/// node insertion order.
#[must_use]
pub fn detect_clusters(nodes: &[KnowledgeNode], edges: &[KnowledgeEdge]) -> Vec<GraphCluster> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let membership = louvain_communities(nodes, edges);
    let count = membership.iter().copied().max().map_or(0, |max| max + 1);
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (index, &community) in membership.iter().enumerate() {
        groups[community].push(index);
    }

    let mut clusters = Vec::new();
    for (community, group) in groups.iter().enumerate() {
        if group.len() < 2 {
            continue;
        }
        let members: Vec<NodeId> = group.iter().map(|&ix| nodes[ix].id.clone()).collect();
        let dominant = dominant_kind(group.iter().map(|&ix| nodes[ix].kind));
        let id = ClusterId(u32::try_from(community).unwrap_or(u32::MAX));
        clusters.push(
            GraphCluster::new(id, format!("{} Cluster {}", dominant.label(), community + 1), members)
                .with_description(format!(
                    "Research cluster with {} related entities",
                    group.len()
                ))
                .with_color(CLUSTER_PALETTE[community % CLUSTER_PALETTE.len()]),
        );
    }
    debug!(clusters = clusters.len(), "cluster detection finished");
    clusters
}

/// Most frequent kind among members; ties go to the kind seen first.
fn dominant_kind(kinds: impl Iterator<Item = NodeKind> + Clone) -> NodeKind {
    let mut counts: HashMap<NodeKind, usize> = HashMap::new();
    for kind in kinds.clone() {
        *counts.entry(kind).or_insert(0) += 1;
    }
    let best = counts.values().copied().max().unwrap_or(0);
    for kind in kinds {
        if counts.get(&kind).copied() == Some(best) {
            return kind;
        }
    }
    NodeKind::Paper
}
