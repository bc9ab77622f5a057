//! Research knowledge-graph build pipeline.
//!
//! Orchestrates one graph build end to end:
//! - Fetch papers from a [`ResearchStore`] under the request's filter
//! - Expand them into a typed node/edge arena within the node budget
//! - Run structural analysis, layout, clustering, and importance scoring
//!   concurrently on the blocking pool
//! - Assemble the immutable snapshot and hand it to a [`SnapshotSink`]
//!
//! Enrichment stages are best-effort: a failed stage degrades its slice of
//! the snapshot instead of failing the build. Store errors are the only
//! retryable failures.
//!
//! # Example
//!
//! ```rust,ignore
//! use rg_pipeline::prelude::*;
//! use std::sync::Arc;
//!
//! let corpus = MemoryCorpus::with_papers(sample_corpus(7, 40));
//! let pipeline = GraphPipeline::new(
//!     Arc::new(corpus),
//!     Arc::new(MemorySink::new()),
//!     PipelineConfig::default(),
//! );
//! let outcome = pipeline.build_graph(BuildRequest::new(OwnerId::new("demo"))).await?;
//! println!("built {} nodes", outcome.snapshot.nodes.len());
//! ```

pub mod assemble;
pub mod builder;
pub mod config;
pub mod error;
pub mod memory;
pub mod service;
pub mod store;

pub use assemble::{assemble_snapshot, EnrichmentResults};
pub use builder::GraphBuilder;
pub use config::{BuildRequest, PipelineConfig};
pub use error::{BuildError, StoreError};
pub use memory::{sample_corpus, MemoryCorpus, MemorySink};
pub use service::{BuildOutcome, GraphPipeline};
pub use store::{GraphFilter, ResearchStore, SnapshotSink};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the graph pipeline
    pub use crate::{
        sample_corpus, BuildOutcome, BuildRequest, GraphPipeline, MemoryCorpus, MemorySink,
        PipelineConfig, ResearchStore, SnapshotSink,
    };
    pub use rg_layout::LayoutAlgorithm;
    pub use rg_model::{GraphSnapshot, OwnerId, SnapshotId};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
