//! Graph analytics for research knowledge graphs.
//!
//! Three independent read-only passes over a built node/edge set:
//! - Structural analysis: density, connectivity, clustering, path metrics,
//!   and a centrality block on small graphs
//! - Community detection: deterministic Louvain plus cluster construction
//! - Importance scoring: combined degree and betweenness centrality
//!
//! All passes share the [`AnalysisGraph`] projection: a simple undirected
//! graph that drops dangling endpoints, self-loops, and parallel edges.
//!
//! # Example
//!
//! ```rust,ignore
//! use rg_analytics::{analyze_structure, detect_clusters, AnalysisOptions};
//!
//! let report = analyze_structure(&nodes, &edges, &AnalysisOptions::default());
//! let clusters = detect_clusters(&nodes, &edges);
//! println!("{} components, {} clusters", report.connected_components, clusters.len());
//! ```

pub mod centrality;
pub mod community;
pub mod error;
pub mod graph;
pub mod importance;
pub mod structure;

pub use centrality::{
    betweenness_centrality, closeness_centrality, degree_centrality, eigenvector_centrality,
};
pub use community::{detect_clusters, louvain_communities, CLUSTER_PALETTE};
pub use error::AnalyticsError;
pub use graph::AnalysisGraph;
pub use importance::{importance_scores, ImportanceOptions};
pub use structure::{analyze_structure, AnalysisOptions};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
