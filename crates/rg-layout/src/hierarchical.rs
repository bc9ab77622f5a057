//! Layered layout keyed on node kind.

use crate::strategy::LayoutStrategy;
use rg_model::{KnowledgeEdge, KnowledgeNode, NodeId, NodeKind, Vec3};
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Vertical distance between layers.
const LAYER_SPACING: f64 = 100.0;

/// Base circle radius before the population term.
const BASE_RADIUS: f64 = 50.0;

/// Extra radius per node in a circle.
const RADIUS_PER_NODE: f64 = 5.0;

/// Kind-layered layout.
///
/// Papers sit at the bottom, authors above them, keywords and concepts on a
/// shared level, institutions on top. Each kind forms its own circle whose
/// radius grows with the kind's population; kinds sharing a layer share its
/// height but keep separate circles. A kind with a single node sits on the
/// layer axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalLayout;

impl HierarchicalLayout {
    /// New layered layout.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Layer index for a kind; kinds without an assigned layer land on 0.
fn layer_of(kind: NodeKind) -> usize {
    match kind {
        NodeKind::Author => 1,
        NodeKind::Keyword | NodeKind::Concept => 2,
        NodeKind::Institution => 3,
        _ => 0,
    }
}

impl LayoutStrategy for HierarchicalLayout {
    fn name(&self) -> &'static str {
        "hierarchical"
    }

    fn compute(
        &self,
        nodes: &[KnowledgeNode],
        _edges: &[KnowledgeEdge],
    ) -> HashMap<NodeId, Vec3> {
        // Group by kind, keeping first-seen kind order.
        let mut groups: Vec<(NodeKind, Vec<&KnowledgeNode>)> = Vec::new();
        for node in nodes {
            match groups.iter_mut().find(|(kind, _)| *kind == node.kind) {
                Some((_, members)) => members.push(node),
                None => groups.push((node.kind, vec![node])),
            }
        }

        let mut positions = HashMap::with_capacity(nodes.len());
        for (kind, members) in groups {
            #[allow(clippy::cast_precision_loss)]
            let y = layer_of(kind) as f64 * LAYER_SPACING;
            if let [only] = members.as_slice() {
                positions.insert(only.id.clone(), Vec3::new(0.0, y, 0.0));
                continue;
            }

            #[allow(clippy::cast_precision_loss)]
            let count = members.len() as f64;
            let radius = RADIUS_PER_NODE.mul_add(count, BASE_RADIUS);
            for (i, member) in members.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let angle = TAU * i as f64 / count;
                positions.insert(
                    member.id.clone(),
                    Vec3::new(radius * angle.cos(), y, radius * angle.sin()),
                );
            }
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: &str, kind: NodeKind) -> KnowledgeNode {
        KnowledgeNode::new(NodeId::new(id), id, kind)
    }

    #[test]
    fn kinds_land_on_their_layers() {
        let nodes = vec![
            node("p", NodeKind::Paper),
            node("a", NodeKind::Author),
            node("k", NodeKind::Keyword),
            node("i", NodeKind::Institution),
        ];
        let positions = HierarchicalLayout::new().compute(&nodes, &[]);
        assert_eq!(positions[&NodeId::new("p")].y, 0.0);
        assert_eq!(positions[&NodeId::new("a")].y, 100.0);
        assert_eq!(positions[&NodeId::new("k")].y, 200.0);
        assert_eq!(positions[&NodeId::new("i")].y, 300.0);
    }

    #[test]
    fn single_member_kinds_sit_on_the_axis() {
        let nodes = vec![node("a", NodeKind::Author)];
        let positions = HierarchicalLayout::new().compute(&nodes, &[]);
        assert_eq!(positions[&NodeId::new("a")], Vec3::new(0.0, 100.0, 0.0));
    }

    #[test]
    fn circle_radius_grows_with_population() {
        let nodes: Vec<_> = (0..4).map(|i| node(&format!("p{i}"), NodeKind::Paper)).collect();
        let positions = HierarchicalLayout::new().compute(&nodes, &[]);
        // 4 papers: radius 50 + 4 * 5 = 70.
        for position in positions.values() {
            let radial = position.x.hypot(position.z);
            assert!((radial - 70.0).abs() < 1e-9);
            assert_eq!(position.y, 0.0);
        }
    }

    #[test]
    fn kinds_sharing_a_layer_keep_separate_circles() {
        let mut nodes: Vec<_> = (0..3)
            .map(|i| node(&format!("k{i}"), NodeKind::Keyword))
            .collect();
        nodes.push(node("c0", NodeKind::Concept));
        nodes.push(node("c1", NodeKind::Concept));
        let positions = HierarchicalLayout::new().compute(&nodes, &[]);

        let keyword_radius = positions[&NodeId::new("k0")].x.hypot(positions[&NodeId::new("k0")].z);
        let concept_radius = positions[&NodeId::new("c0")].x.hypot(positions[&NodeId::new("c0")].z);
        assert!((keyword_radius - 65.0).abs() < 1e-9);
        assert!((concept_radius - 60.0).abs() < 1e-9);
        assert_eq!(positions[&NodeId::new("k0")].y, 200.0);
        assert_eq!(positions[&NodeId::new("c0")].y, 200.0);
    }

    #[test]
    fn unassigned_kinds_fall_to_the_ground_layer() {
        let nodes = vec![node("g", NodeKind::Gene), node("g2", NodeKind::Gene)];
        let positions = HierarchicalLayout::new().compute(&nodes, &[]);
        assert_eq!(positions[&NodeId::new("g")].y, 0.0);
    }
}
