//! Force-directed layout with simulated annealing.

use crate::strategy::LayoutStrategy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rg_model::{KnowledgeEdge, KnowledgeNode, NodeId, Vec3};
use std::collections::HashMap;
use tracing::debug;

/// Simulated-physics layout in a 3D cube.
///
/// Nodes start at random positions in a ±100 cube, then repulsive forces
/// between every pair (k²/d) and attractive forces along edges (d²/k,
/// scaled by edge weight) pull the graph into shape. Per-node movement is
/// capped by a temperature that cools geometrically each iteration.
#[derive(Debug, Clone)]
pub struct ForceDirectedLayout {
    iterations: usize,
    optimal_distance: f64,
    initial_temperature: f64,
    cooling_factor: f64,
    seed: Option<u64>,
}

impl Default for ForceDirectedLayout {
    fn default() -> Self {
        Self {
            iterations: 100,
            optimal_distance: 50.0,
            initial_temperature: 100.0,
            cooling_factor: 0.95,
            seed: None,
        }
    }
}

/// Distances are clamped here before dividing.
const MIN_DISTANCE: f64 = 0.1;

/// Half-side of the random initialization cube.
const INIT_EXTENT: f64 = 100.0;

impl ForceDirectedLayout {
    /// Layout with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a fixed seed for reproducible positions.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// With a different iteration count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// With a different optimal node distance.
    #[must_use]
    pub fn with_optimal_distance(mut self, optimal_distance: f64) -> Self {
        self.optimal_distance = optimal_distance;
        self
    }

    /// With a different starting temperature.
    #[must_use]
    pub fn with_initial_temperature(mut self, initial_temperature: f64) -> Self {
        self.initial_temperature = initial_temperature;
        self
    }

    /// With a different geometric cooling factor.
    #[must_use]
    pub fn with_cooling_factor(mut self, cooling_factor: f64) -> Self {
        self.cooling_factor = cooling_factor;
        self
    }

    /// Run the simulation and additionally report the total displacement
    /// per iteration, which decays as the temperature cools.
    #[must_use]
    pub fn compute_with_trace(
        &self,
        nodes: &[KnowledgeNode],
        edges: &[KnowledgeEdge],
    ) -> (HashMap<NodeId, Vec3>, Vec<f64>) {
        let n = nodes.len();
        if n == 0 {
            return (HashMap::new(), Vec::new());
        }

        let index: HashMap<&NodeId, usize> =
            nodes.iter().enumerate().map(|(i, node)| (&node.id, i)).collect();
        let mut rng = self
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mut positions: Vec<Vec3> = (0..n)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-INIT_EXTENT..INIT_EXTENT),
                    rng.gen_range(-INIT_EXTENT..INIT_EXTENT),
                    rng.gen_range(-INIT_EXTENT..INIT_EXTENT),
                )
            })
            .collect();

        // Edges resolved to indices once; unknown endpoints exert no force.
        let springs: Vec<(usize, usize, f64)> = edges
            .iter()
            .filter_map(|edge| {
                let source = *index.get(&edge.source)?;
                let target = *index.get(&edge.target)?;
                Some((source, target, edge.weight))
            })
            .collect();

        let k = self.optimal_distance;
        let mut temperature = self.initial_temperature;
        let mut trace = Vec::with_capacity(self.iterations);

        for _ in 0..self.iterations {
            let mut forces = vec![Vec3::ZERO; n];

            for i in 0..n {
                for j in (i + 1)..n {
                    let delta = positions[i] - positions[j];
                    let distance = delta.length().max(MIN_DISTANCE);
                    let force = k * k / distance;
                    let push = delta * (force / distance);
                    forces[i] += push;
                    forces[j] -= push;
                }
            }

            for &(source, target, weight) in &springs {
                let delta = positions[target] - positions[source];
                let distance = delta.length().max(MIN_DISTANCE);
                let force = distance * distance / k * weight;
                let pull = delta * (force / distance);
                forces[source] += pull;
                forces[target] -= pull;
            }

            let mut moved = 0.0;
            for (position, force) in positions.iter_mut().zip(&forces) {
                let magnitude = force.length();
                if magnitude > 0.0 {
                    let displacement = magnitude.min(temperature);
                    *position += *force * (displacement / magnitude);
                    moved += displacement;
                }
            }
            trace.push(moved);

            temperature *= self.cooling_factor;
        }

        debug!(nodes = n, springs = springs.len(), "force-directed layout finished");
        let positions = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.clone(), positions[i]))
            .collect();
        (positions, trace)
    }
}

impl LayoutStrategy for ForceDirectedLayout {
    fn name(&self) -> &'static str {
        "force_directed"
    }

    fn compute(
        &self,
        nodes: &[KnowledgeNode],
        edges: &[KnowledgeEdge],
    ) -> HashMap<NodeId, Vec3> {
        self.compute_with_trace(nodes, edges).0
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
    fn every_node_gets_a_position() {
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![edge("a", "b")];
        let layout = ForceDirectedLayout::new().with_seed(1);
        let positions = layout.compute(&nodes, &edges);
        assert_eq!(positions.len(), 3);
        for position in positions.values() {
            assert!(position.x.is_finite());
            assert!(position.y.is_finite());
            assert!(position.z.is_finite());
        }
    }

    #[test]
    fn empty_graph_yields_empty_layout() {
        let layout = ForceDirectedLayout::new();
        assert!(layout.compute(&[], &[]).is_empty());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let nodes = vec![node("a"), node("b"), node("c"), node("d")];
        let edges = vec![edge("a", "b"), edge("c", "d")];
        let layout = ForceDirectedLayout::new().with_seed(42);
        let first = layout.compute(&nodes, &edges);
        let second = layout.compute(&nodes, &edges);
        assert_eq!(first, second);
    }

    #[test]
    fn connected_nodes_end_up_closer_than_strangers() {
        let nodes = vec![node("a"), node("b"), node("c")];
        // a-b attract; c only feels repulsion.
        let edges = vec![edge("a", "b")];
        let layout = ForceDirectedLayout::new().with_seed(7);
        let positions = layout.compute(&nodes, &edges);
        let ab = positions[&NodeId::new("a")].distance(&positions[&NodeId::new("b")]);
        let ac = positions[&NodeId::new("a")].distance(&positions[&NodeId::new("c")]);
        assert!(ab < ac);
    }

    #[test]
    fn displacement_trace_decays_with_temperature() {
        let nodes: Vec<_> = (0..8).map(|i| node(&format!("n{i}"))).collect();
        let edges: Vec<_> = (0..7)
            .map(|i| edge(&format!("n{i}"), &format!("n{}", i + 1)))
            .collect();
        let layout = ForceDirectedLayout::new().with_seed(3);
        let (_, trace) = layout.compute_with_trace(&nodes, &edges);
        assert_eq!(trace.len(), 100);
        assert!(trace[99] < trace[0]);
    }

    #[test]
    fn dangling_edges_exert_no_force() {
        let nodes = vec![node("a"), node("b")];
        let edges = vec![edge("a", "ghost")];
        let layout = ForceDirectedLayout::new().with_seed(5);
        let positions = layout.compute(&nodes, &edges);
        assert_eq!(positions.len(), 2);
    }
}
