//! External collaborator seams: corpus store and snapshot sink.

use crate::config::BuildRequest;
use crate::error::StoreError;
use async_trait::async_trait;
use rg_model::{GraphSnapshot, OwnerId, PaperRecord, SnapshotId, SnapshotSummary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Filter criteria for a corpus query. `None` means unconstrained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphFilter {
    /// Only these paper ids.
    #[serde(default)]
    pub papers: Option<Vec<Uuid>>,
    /// Only papers written by one of these authors.
    #[serde(default)]
    pub authors: Option<Vec<Uuid>>,
    /// Only papers carrying one of these keyword terms.
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    /// At most this many papers, applied after the criteria.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl GraphFilter {
    /// Whether the filter constrains anything at all.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.papers.is_none()
            && self.authors.is_none()
            && self.keywords.is_none()
            && self.limit.is_none()
    }

    /// With a result-count cap.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl From<&BuildRequest> for GraphFilter {
    fn from(request: &BuildRequest) -> Self {
        Self {
            papers: request.papers.clone(),
            authors: request.authors.clone(),
            keywords: request.keywords.clone(),
            limit: None,
        }
    }
}

/// Source of research records.
///
/// Implementations return papers in insertion order with authors, keywords,
/// and outgoing citations joined in. The builder relies on that ordering
/// for deterministic node admission under a budget.
#[async_trait]
pub trait ResearchStore: Send + Sync {
    /// Fetch papers matching the filter, joined records included.
    async fn fetch_papers(&self, filter: &GraphFilter) -> Result<Vec<PaperRecord>, StoreError>;
}

/// Durable home for finished snapshots.
///
/// `persist` is all-or-nothing: on error the sink must hold no trace of
/// the snapshot.
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    /// Store a snapshot, returning its assigned id.
    async fn persist(&self, snapshot: &GraphSnapshot) -> Result<SnapshotId, StoreError>;

    /// Snapshots saved by an owner, newest first.
    async fn list(&self, owner: &OwnerId) -> Result<Vec<SnapshotSummary>, StoreError>;
}
