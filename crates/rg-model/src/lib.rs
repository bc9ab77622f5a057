//! Research knowledge-graph data model
//!
//! Shared vocabulary for every stage of the graph pipeline:
//!
//! - [`KnowledgeNode`] / [`KnowledgeEdge`]: typed graph elements with open
//!   property bags
//! - [`GraphArena`]: insertion-ordered build container with dangling-edge
//!   finalization
//! - [`PaperRecord`] and friends: source records the way a corpus store
//!   returns them, relations pre-joined
//! - [`StructureReport`]: analyzer output with recoverable-error annotation
//! - [`GraphSnapshot`]: the immutable, serializable build result handed to
//!   a persistence sink

mod arena;
mod cluster;
mod edge;
mod geometry;
mod node;
mod records;
mod report;
mod snapshot;

pub use arena::GraphArena;
pub use cluster::{ClusterId, GraphCluster};
pub use edge::{EdgeKind, KnowledgeEdge};
pub use geometry::Vec3;
pub use node::{KnowledgeNode, NodeId, NodeKind, PropertyBag};
pub use records::{AuthorRecord, CitationRecord, KeywordRecord, PaperRecord};
pub use report::{CentralityReport, StructureReport};
pub use snapshot::{GraphMeta, GraphSnapshot, OwnerId, SnapshotId, SnapshotSummary};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
