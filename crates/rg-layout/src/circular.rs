//! Concentric rings ordered by importance.

use crate::strategy::LayoutStrategy;
use rg_model::{KnowledgeEdge, KnowledgeNode, NodeId, Vec3};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Most nodes a single ring holds.
const RING_CAPACITY: usize = 12;

/// Radius of the innermost ring.
const INNER_RADIUS: f64 = 50.0;

/// Radius added per ring outward.
const RADIUS_STEP: f64 = 80.0;

/// Height added per ring outward.
const HEIGHT_STEP: f64 = 20.0;

/// Concentric importance rings.
///
/// Nodes are sorted by importance, most important first, and dealt into
/// rings of up to twelve. The inner ring holds the top scorers; each ring
/// outward is wider and slightly higher. Ties keep input order, so the
/// layout is stable for equal scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularLayout;

impl CircularLayout {
    /// New ring layout.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LayoutStrategy for CircularLayout {
    fn name(&self) -> &'static str {
        "circular"
    }

    fn compute(
        &self,
        nodes: &[KnowledgeNode],
        _edges: &[KnowledgeEdge],
    ) -> HashMap<NodeId, Vec3> {
        let mut ordered: Vec<&KnowledgeNode> = nodes.iter().collect();
        ordered.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(Ordering::Equal)
        });

        let mut positions = HashMap::with_capacity(nodes.len());
        for (ring, ring_nodes) in ordered.chunks(RING_CAPACITY).enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let ring_index = ring as f64;
            let radius = RADIUS_STEP.mul_add(ring_index, INNER_RADIUS);
            let y = HEIGHT_STEP * ring_index;
            #[allow(clippy::cast_precision_loss)]
            let count = ring_nodes.len() as f64;
            for (i, node) in ring_nodes.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let angle = TAU * i as f64 / count;
                positions.insert(
                    node.id.clone(),
                    Vec3::new(radius * angle.cos(), y, radius * angle.sin()),
                );
            }
        }
        positions
    }
}
