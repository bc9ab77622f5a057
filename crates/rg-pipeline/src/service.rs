//! Build orchestration.
//!
//! `GraphPipeline` drives one build end to end: validate the request,
//! fetch records, construct the arena, fan the four enrichment stages out
//! onto the blocking pool, join them, assemble the snapshot in a single
//! sequential pass, and persist it. Stage failures degrade the snapshot;
//! only store failures and invalid requests fail the build.

use crate::assemble::{assemble_snapshot, EnrichmentResults};
use crate::builder::GraphBuilder;
use crate::config::{BuildRequest, PipelineConfig};
use crate::error::BuildError;
use crate::store::{GraphFilter, ResearchStore, SnapshotSink};
use rg_analytics::{
    analyze_structure, detect_clusters, importance_scores, AnalysisOptions, ImportanceOptions,
};
use rg_layout::compute_layout;
use rg_model::{
    GraphSnapshot, KnowledgeEdge, KnowledgeNode, OwnerId, SnapshotId, SnapshotSummary,
    StructureReport,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info, warn};

/// Result of one build: the snapshot, and where it landed if persistence
/// succeeded. `stored: None` means built but not saved.
#[derive(Debug)]
pub struct BuildOutcome {
    /// The assembled snapshot.
    pub snapshot: GraphSnapshot,
    /// Assigned sink id, when persistence succeeded.
    pub stored: Option<SnapshotId>,
}

/// The knowledge-graph build pipeline.
pub struct GraphPipeline {
    store: Arc<dyn ResearchStore>,
    sink: Arc<dyn SnapshotSink>,
    config: PipelineConfig,
}

impl GraphPipeline {
    /// Pipeline over a corpus store and a snapshot sink.
    #[must_use]
    pub fn new(
        store: Arc<dyn ResearchStore>,
        sink: Arc<dyn SnapshotSink>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            sink,
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build, enrich, assemble, and persist one knowledge graph.
    ///
    /// # Errors
    /// [`BuildError::InvalidRequest`] for a zero node budget;
    /// [`BuildError::Store`] when the corpus fetch fails. Persistence
    /// failure is not an error: the outcome carries the snapshot with
    /// `stored: None`.
    pub async fn build_graph(&self, request: BuildRequest) -> Result<BuildOutcome, BuildError> {
        let budget = request.budget(&self.config);
        if budget == 0 {
            return Err(BuildError::InvalidRequest(
                "node budget must be at least 1".to_string(),
            ));
        }
        let layout = request.layout_algorithm(&self.config);
        info!(owner = %request.owner, budget, %layout, "building knowledge graph");

        let builder = GraphBuilder::new(budget);
        let filter = GraphFilter::from(&request).with_limit(builder.paper_fetch_limit());
        let papers = self.store.fetch_papers(&filter).await?;
        debug!(papers = papers.len(), "fetched corpus records");

        let arena = builder.build(&papers);

        // Immutable copies for the stages; the arena stays with this task.
        let nodes: Arc<Vec<KnowledgeNode>> = Arc::new(arena.nodes_vec());
        let edges: Arc<Vec<KnowledgeEdge>> = Arc::new(arena.edges_vec());
        let seed = self.config.layout_seed;

        let analysis_task = {
            let (nodes, edges) = (Arc::clone(&nodes), Arc::clone(&edges));
            let options = AnalysisOptions {
                centrality_ceiling: self.config.centrality_ceiling,
                betweenness_pivots: self.config.betweenness_pivots,
                pivot_seed: seed,
                ..AnalysisOptions::default()
            };
            task::spawn_blocking(move || analyze_structure(&nodes, &edges, &options))
        };
        let layout_task = {
            let (nodes, edges) = (Arc::clone(&nodes), Arc::clone(&edges));
            task::spawn_blocking(move || compute_layout(layout, &nodes, &edges, seed))
        };
        let cluster_task = {
            let (nodes, edges) = (Arc::clone(&nodes), Arc::clone(&edges));
            task::spawn_blocking(move || detect_clusters(&nodes, &edges))
        };
        let importance_task = {
            let (nodes, edges) = (Arc::clone(&nodes), Arc::clone(&edges));
            let options = ImportanceOptions {
                exact_ceiling: self.config.centrality_ceiling,
                pivots: self.config.betweenness_pivots,
                seed,
            };
            task::spawn_blocking(move || importance_scores(&nodes, &edges, &options))
        };

        let (analysis, positions, clusters, importance) =
            tokio::join!(analysis_task, layout_task, cluster_task, importance_task);

        // A panicked stage degrades to its empty result; the build goes on.
        let report = analysis.unwrap_or_else(|error| {
            warn!(%error, "structural analysis stage failed");
            StructureReport {
                node_count: nodes.len(),
                edge_count: edges.len(),
                error: Some("structural analysis stage failed".to_string()),
                ..StructureReport::default()
            }
        });
        let positions = positions.unwrap_or_else(|error| {
            warn!(%error, "layout stage failed");
            HashMap::new()
        });
        let clusters = clusters.unwrap_or_else(|error| {
            warn!(%error, "cluster detection stage failed");
            Vec::new()
        });
        let importance = importance.unwrap_or_else(|error| {
            warn!(%error, "importance scoring stage failed");
            HashMap::new()
        });

        let results = EnrichmentResults {
            positions,
            clusters,
            importance,
            report,
        };
        let snapshot = assemble_snapshot(arena, results, request.owner.clone(), layout);

        let stored = match self.sink.persist(&snapshot).await {
            Ok(id) => {
                debug!(%id, "snapshot persisted");
                Some(id)
            }
            Err(error) => {
                warn!(%error, "snapshot persistence failed, returning unsaved snapshot");
                None
            }
        };

        info!(
            nodes = snapshot.meta.node_count,
            edges = snapshot.meta.edge_count,
            clusters = snapshot.meta.cluster_count,
            saved = stored.is_some(),
            "graph build finished"
        );
        Ok(BuildOutcome { snapshot, stored })
    }

    /// Snapshots previously saved by an owner, newest first.
    ///
    /// # Errors
    /// [`BuildError::Store`] when the sink listing fails.
    pub async fn saved_graphs(&self, owner: &OwnerId) -> Result<Vec<SnapshotSummary>, BuildError> {
        Ok(self.sink.list(owner).await?)
    }
}
