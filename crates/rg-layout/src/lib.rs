//! 3D layout engine for research knowledge graphs.
//!
//! Four strategies position nodes in space:
//! - `force_directed`: simulated physics in a ±100 cube (the default)
//! - `hierarchical`: kind-based layers with one circle per kind
//! - `circular`: concentric rings ordered by importance
//! - `spring`: 2D spring embedding lifted to 3D by kind bands
//!
//! Selection is total: unknown algorithm names fall back to the default
//! instead of failing, so a build never dies on a typo in a layout name.
//!
//! # Example
//!
//! ```rust,ignore
//! use rg_layout::{compute_layout, LayoutAlgorithm};
//!
//! let algorithm = LayoutAlgorithm::parse("circular");
//! let positions = compute_layout(algorithm, &nodes, &edges, Some(42));
//! ```

pub mod circular;
pub mod force;
pub mod hierarchical;
pub mod spring;
pub mod strategy;

pub use circular::CircularLayout;
pub use force::ForceDirectedLayout;
pub use hierarchical::HierarchicalLayout;
pub use spring::SpringLayout;
pub use strategy::{LayoutAlgorithm, LayoutStrategy};

use rg_model::{KnowledgeEdge, KnowledgeNode, NodeId, Vec3};
use std::collections::HashMap;

/// Build the strategy object for an algorithm.
///
/// The seed feeds the randomized strategies; the deterministic ones
/// ignore it.
#[must_use]
pub fn strategy(
    algorithm: LayoutAlgorithm,
    seed: Option<u64>,
) -> Box<dyn LayoutStrategy + Send + Sync> {
    match (algorithm, seed) {
        (LayoutAlgorithm::ForceDirected, Some(seed)) => {
            Box::new(ForceDirectedLayout::new().with_seed(seed))
        }
        (LayoutAlgorithm::ForceDirected, None) => Box::new(ForceDirectedLayout::new()),
        (LayoutAlgorithm::Hierarchical, _) => Box::new(HierarchicalLayout::new()),
        (LayoutAlgorithm::Circular, _) => Box::new(CircularLayout::new()),
        (LayoutAlgorithm::Spring, Some(seed)) => Box::new(SpringLayout::new().with_seed(seed)),
        (LayoutAlgorithm::Spring, None) => Box::new(SpringLayout::new()),
    }
}

/// Position every node with the chosen algorithm.
#[must_use]
pub fn compute_layout(
    algorithm: LayoutAlgorithm,
    nodes: &[KnowledgeNode],
    edges: &[KnowledgeEdge],
    seed: Option<u64>,
) -> HashMap<NodeId, Vec3> {
    strategy(algorithm, seed).compute(nodes, edges)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use rg_model::NodeKind;

    #[test]
    fn every_algorithm_positions_every_node() {
        let nodes: Vec<_> = (0..5)
            .map(|i| {
                KnowledgeNode::new(NodeId::new(format!("n{i}")), format!("n{i}"), NodeKind::Paper)
            })
            .collect();
        for algorithm in LayoutAlgorithm::all() {
            let positions = compute_layout(algorithm, &nodes, &[], Some(1));
            assert_eq!(positions.len(), nodes.len(), "{algorithm}");
        }
    }

    #[test]
    fn empty_input_yields_empty_output_for_all_algorithms() {
        for algorithm in LayoutAlgorithm::all() {
            assert!(compute_layout(algorithm, &[], &[], None).is_empty());
        }
    }

    #[test]
    fn strategy_names_match_their_algorithm() {
        for algorithm in LayoutAlgorithm::all() {
            assert_eq!(strategy(algorithm, None).name(), algorithm.as_str());
        }
    }
}
