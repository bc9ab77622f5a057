//! Graph construction from corpus records.
//!
//! Turns fetched papers with their joined authors, keywords, and citations
//! into a [`GraphArena`] under a hard node budget. Edges are emitted
//! optimistically while nodes are admitted; a single finalization pass
//! drops every edge whose endpoint never made it in, so the returned arena
//! holds no dangling references.

use rg_model::{
    EdgeKind, GraphArena, KnowledgeEdge, KnowledgeNode, NodeId, NodeKind, PaperRecord,
};
use serde_json::json;
use tracing::debug;

/// Longest paper label carried into the graph.
const LABEL_LIMIT: usize = 100;

/// Builds knowledge graphs from paper records.
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder {
    max_nodes: usize,
}

impl GraphBuilder {
    /// Builder with a hard node budget.
    #[must_use]
    pub fn new(max_nodes: usize) -> Self {
        Self { max_nodes }
    }

    /// How many papers to request from the store: half the budget, leaving
    /// room for authors and keywords.
    #[must_use]
    pub fn paper_fetch_limit(&self) -> usize {
        self.max_nodes / 2
    }

    /// Build the graph. Records are admitted in input order until the
    /// budget fills; the budget is a hard ceiling checked before every
    /// insert, not a target.
    #[must_use]
    pub fn build(&self, papers: &[PaperRecord]) -> GraphArena {
        let mut arena = GraphArena::new();

        for paper in papers {
            if arena.node_count() >= self.max_nodes {
                break;
            }
            let paper_id = admit_paper(&mut arena, paper);

            for author in &paper.authors {
                let author_id = NodeId::author(author.id);
                if !arena.contains(&author_id) && arena.node_count() < self.max_nodes {
                    let node = KnowledgeNode::new(author_id.clone(), &author.name, NodeKind::Author)
                        .with_property("name", json!(author.name))
                        .with_property("institution", json!(author.institution))
                        .with_property("orcid", json!(author.orcid))
                        .with_property("h_index", json!(author.h_index))
                        .with_property("total_citations", json!(author.total_citations));
                    arena.insert_node(node);
                }
                arena.push_edge(KnowledgeEdge::new(
                    author_id,
                    paper_id.clone(),
                    EdgeKind::AuthoredBy,
                ));
            }

            for keyword in &paper.keywords {
                let keyword_id = NodeId::keyword(keyword.id);
                if !arena.contains(&keyword_id) && arena.node_count() < self.max_nodes {
                    let node =
                        KnowledgeNode::new(keyword_id.clone(), &keyword.term, NodeKind::Keyword)
                            .with_property("term", json!(keyword.term))
                            .with_property("category", json!(keyword.category))
                            .with_property("usage_count", json!(keyword.usage_count));
                    arena.insert_node(node);
                }
                arena.push_edge(
                    KnowledgeEdge::new(paper_id.clone(), keyword_id, EdgeKind::RelatedTo)
                        .with_weight(0.5),
                );
            }
        }

        // Citations run over every fetched paper, admitted or not; only
        // edges pointing at admitted papers survive finalization anyway.
        for paper in papers {
            let source = NodeId::paper(paper.id);
            for citation in &paper.citations {
                let target = NodeId::paper(citation.cited_paper);
                if arena.contains(&target) {
                    arena.push_edge(
                        KnowledgeEdge::new(source.clone(), target, EdgeKind::Cites)
                            .with_property("context", json!(citation.context))
                            .with_property("citation_type", json!(citation.citation_type)),
                    );
                }
            }
        }

        let dropped = arena.finalize_edges();
        debug!(
            nodes = arena.node_count(),
            edges = arena.edge_count(),
            dropped,
            "graph construction finished"
        );
        arena
    }
}

fn admit_paper(arena: &mut GraphArena, paper: &PaperRecord) -> NodeId {
    let paper_id = NodeId::paper(paper.id);
    let label: String = paper.title.chars().take(LABEL_LIMIT).collect();
    let node = KnowledgeNode::new(paper_id.clone(), label, NodeKind::Paper)
        .with_property("title", json!(paper.title))
        .with_property("abstract", json!(paper.abstract_text))
        .with_property("doi", json!(paper.doi))
        .with_property(
            "publication_date",
            json!(paper.publication_date.map(|date| date.to_rfc3339())),
        )
        .with_property("citation_count", json!(paper.citation_count))
        .with_property("research_domains", json!(paper.research_domains))
        .with_property("has_null_results", json!(paper.has_null_results));
    arena.insert_node(node);
    paper_id
}
