//! Pipeline configuration and build requests.

use rg_layout::LayoutAlgorithm;
use rg_model::OwnerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tuning knobs for the build pipeline.
///
/// Every field has a production default; tests and the CLI override what
/// they need. Serializable so a deployment can ship one as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Hard ceiling on nodes per graph, counted mid-expansion.
    pub max_nodes: usize,
    /// Layout algorithm when the request does not pick one.
    pub layout: LayoutAlgorithm,
    /// Structural analysis computes centrality only up to this many nodes.
    pub centrality_ceiling: usize,
    /// Pivot count for sampled betweenness on large graphs.
    pub betweenness_pivots: usize,
    /// Seed for randomized stages; `None` draws from entropy.
    pub layout_seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_nodes: 1000,
            layout: LayoutAlgorithm::default(),
            centrality_ceiling: 500,
            betweenness_pivots: 100,
            layout_seed: None,
        }
    }
}

impl PipelineConfig {
    /// Config with production defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different node budget.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// With a different default layout.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutAlgorithm) -> Self {
        self.layout = layout;
        self
    }

    /// With a fixed seed for reproducible layouts.
    #[must_use]
    pub fn with_layout_seed(mut self, seed: u64) -> Self {
        self.layout_seed = Some(seed);
        self
    }
}

/// One build request: who owns the graph and what goes into it.
///
/// `None` filters mean "everything the store has". Budget and layout
/// override the pipeline config for this request only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRequest {
    /// Owner recorded on the snapshot.
    pub owner: OwnerId,
    /// Restrict to these paper ids.
    #[serde(default)]
    pub papers: Option<Vec<Uuid>>,
    /// Restrict to papers by these author ids.
    #[serde(default)]
    pub authors: Option<Vec<Uuid>>,
    /// Restrict to papers carrying any of these keyword terms.
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    /// Budget override for this request.
    #[serde(default)]
    pub max_nodes: Option<usize>,
    /// Layout override for this request.
    #[serde(default)]
    pub layout: Option<LayoutAlgorithm>,
}

impl BuildRequest {
    /// Unfiltered request for an owner.
    #[must_use]
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            papers: None,
            authors: None,
            keywords: None,
            max_nodes: None,
            layout: None,
        }
    }

    /// Restrict to specific paper ids.
    #[must_use]
    pub fn with_papers(mut self, papers: Vec<Uuid>) -> Self {
        self.papers = Some(papers);
        self
    }

    /// Restrict to papers by specific authors.
    #[must_use]
    pub fn with_authors(mut self, authors: Vec<Uuid>) -> Self {
        self.authors = Some(authors);
        self
    }

    /// Restrict to papers carrying any of these keyword terms.
    #[must_use]
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Override the node budget for this request.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Override the layout for this request.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutAlgorithm) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Budget for this request, falling back to the config.
    #[must_use]
    pub fn budget(&self, config: &PipelineConfig) -> usize {
        self.max_nodes.unwrap_or(config.max_nodes)
    }

    /// Layout for this request, falling back to the config.
    #[must_use]
    pub fn layout_algorithm(&self, config: &PipelineConfig) -> LayoutAlgorithm {
        self.layout.unwrap_or(config.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_settings() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_nodes, 1000);
        assert_eq!(config.layout, LayoutAlgorithm::ForceDirected);
        assert_eq!(config.centrality_ceiling, 500);
        assert_eq!(config.betweenness_pivots, 100);
        assert!(config.layout_seed.is_none());
    }

    #[test]
    fn request_overrides_win_over_config() {
        let config = PipelineConfig::new().with_max_nodes(200);
        let request = BuildRequest::new(OwnerId::new("u1"))
            .with_max_nodes(50)
            .with_layout(LayoutAlgorithm::Circular);
        assert_eq!(request.budget(&config), 50);
        assert_eq!(request.layout_algorithm(&config), LayoutAlgorithm::Circular);

        let plain = BuildRequest::new(OwnerId::new("u1"));
        assert_eq!(plain.budget(&config), 200);
        assert_eq!(
            plain.layout_algorithm(&config),
            LayoutAlgorithm::ForceDirected
        );
    }
}
