//! Error types for the build pipeline
//!
//! Two layers: [`StoreError`] for the external collaborators (corpus store,
//! snapshot sink) and [`BuildError`] for the orchestrator. Enrichment-stage
//! failures are not errors at this level; they degrade the snapshot and are
//! recorded in its analysis report.

/// Failure talking to an external collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Corpus query failed
    #[error("corpus query failed: {0}")]
    Query(String),

    /// Snapshot persistence failed; the sink kept nothing
    #[error("snapshot persistence failed: {0}")]
    Persist(String),
}

/// Failure of a graph build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The request was rejected before any work ran
    #[error("invalid build request: {0}")]
    InvalidRequest(String),

    /// The corpus store failed; nothing was built
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl BuildError {
    /// Check if retrying the same request could succeed.
    ///
    /// Store failures are transient from the caller's point of view;
    /// an invalid request never becomes valid by retrying.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
