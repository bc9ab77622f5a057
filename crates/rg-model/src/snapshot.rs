//! Finished graph snapshots and persistence-facing summaries.

use crate::cluster::GraphCluster;
use crate::edge::KnowledgeEdge;
use crate::node::KnowledgeNode;
use crate::report::StructureReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identity assigned by a snapshot sink on successful persistence.
///
/// Ulids sort by creation time, so recency listings are an id sort.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SnapshotId(pub Ulid);

impl SnapshotId {
    /// Fresh sortable id.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph-{}", self.0)
    }
}

/// Owner key for builds and snapshot listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Owner key from any string-like id.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw key.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display metadata carried alongside the snapshot payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphMeta {
    /// Raw node-list length.
    pub node_count: usize,
    /// Raw edge-list length.
    pub edge_count: usize,
    /// Emitted cluster count.
    pub cluster_count: usize,
    /// Name of the layout algorithm that positioned the nodes.
    pub layout: String,
}

/// Immutable result of one graph build.
///
/// Assembled in a single pass after all enrichment stages complete; never
/// partially visible to readers, and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Build owner.
    pub owner: OwnerId,
    /// Generated display name.
    pub name: String,
    /// Generated description.
    pub description: String,
    /// Visibility flag; private by default.
    #[serde(default)]
    pub is_public: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Node list, enrichment fields filled where stages succeeded.
    pub nodes: Vec<KnowledgeNode>,
    /// Edge list with dangling edges already filtered.
    pub edges: Vec<KnowledgeEdge>,
    /// Clusters of size ≥ 2.
    pub clusters: Vec<GraphCluster>,
    /// Structural analysis summary.
    pub analysis: StructureReport,
    /// Counts and layout name.
    pub meta: GraphMeta,
}

/// Listing row for saved snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotSummary {
    /// Assigned storage identity.
    pub id: SnapshotId,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Visibility flag.
    pub is_public: bool,
    /// Node count at save time.
    pub node_count: usize,
}

impl SnapshotSummary {
    /// Listing row for a stored snapshot.
    #[must_use]
    pub fn of(id: SnapshotId, snapshot: &GraphSnapshot) -> Self {
        Self {
            id,
            name: snapshot.name.clone(),
            description: snapshot.description.clone(),
            created_at: snapshot.created_at,
            is_public: snapshot.is_public,
            node_count: snapshot.nodes.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_ids_sort_by_creation() {
        let first = SnapshotId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = SnapshotId::new();
        assert!(second > first);
    }

    #[test]
    fn owner_round_trips_through_serde() {
        let owner = OwnerId::new("user-42");
        let json = serde_json::to_string(&owner).unwrap();
        assert_eq!(json, "\"user-42\"");
        let back: OwnerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, owner);
    }
}
