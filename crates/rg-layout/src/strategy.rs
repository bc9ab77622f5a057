//! Layout strategy selection.

use rg_model::{KnowledgeEdge, KnowledgeNode, NodeId, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A positioning algorithm over a node/edge set.
///
/// Strategies are pure: they read the graph and return fresh positions
/// without touching the input. Every node gets exactly one position.
pub trait LayoutStrategy {
    /// Stable algorithm name, as accepted by [`LayoutAlgorithm::parse`].
    fn name(&self) -> &'static str;

    /// Compute a position for every node.
    fn compute(
        &self,
        nodes: &[KnowledgeNode],
        edges: &[KnowledgeEdge],
    ) -> HashMap<NodeId, Vec3>;
}

/// The fixed set of layout algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutAlgorithm {
    /// Simulated-physics layout in a 3D cube.
    #[default]
    ForceDirected,
    /// Kind-based layers with one circle per kind.
    Hierarchical,
    /// Concentric importance rings.
    Circular,
    /// 2D spring embedding lifted to 3D by kind bands.
    Spring,
}

impl LayoutAlgorithm {
    /// Name as serialized and as accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForceDirected => "force_directed",
            Self::Hierarchical => "hierarchical",
            Self::Circular => "circular",
            Self::Spring => "spring",
        }
    }

    /// Parse a name, falling back to the force-directed default for
    /// anything unrecognized. Selection never fails.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "hierarchical" => Self::Hierarchical,
            "circular" => Self::Circular,
            "spring" => Self::Spring,
            _ => Self::ForceDirected,
        }
    }

    /// All algorithms, in display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::ForceDirected,
            Self::Hierarchical,
            Self::Circular,
            Self::Spring,
        ]
    }
}

impl fmt::Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_force_directed() {
        assert_eq!(LayoutAlgorithm::parse("spring"), LayoutAlgorithm::Spring);
        assert_eq!(
            LayoutAlgorithm::parse("no_such_layout"),
            LayoutAlgorithm::ForceDirected
        );
        assert_eq!(LayoutAlgorithm::parse(""), LayoutAlgorithm::ForceDirected);
    }

    #[test]
    fn names_round_trip_through_parse() {
        for algorithm in LayoutAlgorithm::all() {
            assert_eq!(LayoutAlgorithm::parse(algorithm.as_str()), algorithm);
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&LayoutAlgorithm::ForceDirected).unwrap();
        assert_eq!(json, "\"force_directed\"");
    }
}
