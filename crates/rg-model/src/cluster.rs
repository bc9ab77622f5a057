//! Detected communities with display attributes.

use crate::geometry::Vec3;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense cluster index assigned at detection time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ClusterId(pub u32);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster_{}", self.0)
    }
}

/// A community of size ≥ 2 surviving detection.
///
/// `center` stays at the origin until the assembly pass computes it from the
/// member positions produced by layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphCluster {
    /// Cluster index.
    pub id: ClusterId,
    /// Name derived from the dominant member kind.
    pub name: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// Member node ids, in detection order.
    pub members: Vec<NodeId>,
    /// Geometric center, mean of member positions once layout exists.
    #[serde(default)]
    pub center: Vec3,
    /// Display color from the fixed palette.
    pub color: String,
    /// Member count.
    pub size: usize,
}

impl GraphCluster {
    /// New cluster over a member set.
    #[must_use]
    pub fn new(id: ClusterId, name: impl Into<String>, members: Vec<NodeId>) -> Self {
        let size = members.len();
        Self {
            id,
            name: name.into(),
            description: String::new(),
            members,
            center: Vec3::ZERO,
            color: String::new(),
            size,
        }
    }

    /// With a display description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With a palette color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_tracks_members() {
        let cluster = GraphCluster::new(
            ClusterId(0),
            "Paper Cluster 1",
            vec![NodeId::new("a"), NodeId::new("b")],
        );
        assert_eq!(cluster.size, 2);
        assert_eq!(cluster.center, Vec3::ZERO);
    }

    #[test]
    fn id_displays_with_prefix() {
        assert_eq!(ClusterId(3).to_string(), "cluster_3");
    }
}
