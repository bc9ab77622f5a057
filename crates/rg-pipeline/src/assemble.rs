//! Single-writer assembly of a finished snapshot.
//!
//! The enrichment stages compute their results against an immutable copy
//! of the graph; this pass is the only writer. It paints positions,
//! cluster memberships, and importance scores onto the nodes, derives
//! cluster centers from member positions, and seals everything into an
//! immutable [`GraphSnapshot`].

use chrono::Utc;
use rg_layout::LayoutAlgorithm;
use rg_model::{
    ClusterId, GraphArena, GraphCluster, GraphMeta, GraphSnapshot, NodeId, OwnerId,
    StructureReport, Vec3,
};
use std::collections::HashMap;

/// Everything the enrichment stages produced.
///
/// Each field defaults to that stage's degraded result, so a failed stage
/// contributes an empty value instead of blocking assembly.
#[derive(Debug, Default)]
pub struct EnrichmentResults {
    /// Node positions from the layout stage.
    pub positions: HashMap<NodeId, Vec3>,
    /// Clusters from community detection.
    pub clusters: Vec<GraphCluster>,
    /// Importance scores.
    pub importance: HashMap<NodeId, f64>,
    /// Structural analysis report.
    pub report: StructureReport,
}

/// Fold stage results into the arena and seal a snapshot.
///
/// Nodes missing from a stage result keep that field's explicit absence:
/// no position rather than the origin, no cluster rather than a fake one.
/// Importance alone defaults to 0.0.
#[must_use]
pub fn assemble_snapshot(
    mut arena: GraphArena,
    results: EnrichmentResults,
    owner: OwnerId,
    layout: LayoutAlgorithm,
) -> GraphSnapshot {
    let EnrichmentResults {
        positions,
        mut clusters,
        importance,
        report,
    } = results;

    // The first cluster claiming a node keeps it.
    let mut membership: HashMap<NodeId, ClusterId> = HashMap::new();
    for cluster in &clusters {
        for member in &cluster.members {
            membership.entry(member.clone()).or_insert(cluster.id);
        }
    }

    for node in arena.nodes_mut() {
        node.position = positions.get(&node.id).copied();
        node.cluster = membership.get(&node.id).copied();
        node.importance = importance.get(&node.id).copied().unwrap_or(0.0);
    }

    for cluster in &mut clusters {
        let mut sum = Vec3::ZERO;
        let mut positioned = 0_usize;
        for member in &cluster.members {
            if let Some(position) = positions.get(member) {
                sum += *position;
                positioned += 1;
            }
        }
        if positioned > 0 {
            #[allow(clippy::cast_precision_loss)]
            let center = sum * (1.0 / positioned as f64);
            cluster.center = center;
        }
    }

    let (nodes, edges) = arena.into_parts();
    let created_at = Utc::now();
    let meta = GraphMeta {
        node_count: nodes.len(),
        edge_count: edges.len(),
        cluster_count: clusters.len(),
        layout: layout.as_str().to_string(),
    };

    GraphSnapshot {
        owner,
        name: format!("Research Graph {}", created_at.format("%Y-%m-%d %H:%M")),
        description: "Generated research knowledge graph".to_string(),
        is_public: false,
        created_at,
        nodes,
        edges,
        clusters,
        analysis: report,
        meta,
    }
}
