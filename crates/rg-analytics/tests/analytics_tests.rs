use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rg_analytics::{
    analyze_structure, detect_clusters, importance_scores, AnalysisOptions, ImportanceOptions,
    CLUSTER_PALETTE,
};
use rg_model::{EdgeKind, KnowledgeEdge, KnowledgeNode, NodeId, NodeKind};

fn node(id: &str, kind: NodeKind) -> KnowledgeNode {
    KnowledgeNode::new(NodeId::new(id), id, kind)
}

fn link(source: &str, target: &str, kind: EdgeKind) -> KnowledgeEdge {
    KnowledgeEdge::new(NodeId::new(source), NodeId::new(target), kind)
}

#[test]
fn test_citation_chain_metrics() {
    let nodes: Vec<KnowledgeNode> = (0..4)
        .map(|i| node(&format!("paper_{i}"), NodeKind::Paper))
        .collect();
    let edges = vec![
        link("paper_0", "paper_1", EdgeKind::Cites),
        link("paper_1", "paper_2", EdgeKind::Cites),
        link("paper_2", "paper_3", EdgeKind::Cites),
    ];

    let report = analyze_structure(&nodes, &edges, &AnalysisOptions::default());
    assert_eq!(report.node_count, 4);
    assert_eq!(report.edge_count, 3);
    assert!(report.is_connected);
    assert_eq!(report.connected_components, 1);
    assert!((report.density - 0.5).abs() < 1e-12);
    assert_eq!(report.diameter, Some(3));
    let average = report.average_path_length.unwrap();
    assert!((average - 5.0 / 3.0).abs() < 1e-9, "{average}");

    // Chain ends touch one paper, the middle papers two.
    let centrality = report.centrality.unwrap();
    let degree = &centrality.degree;
    assert!((degree[&NodeId::new("paper_0")] - 1.0 / 3.0).abs() < 1e-12);
    assert!((degree[&NodeId::new("paper_1")] - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_collaboration_hub_dominates_importance() {
    let mut nodes = vec![node("author_hub", NodeKind::Author)];
    let mut edges = Vec::new();
    for i in 0..5 {
        let paper = format!("paper_{i}");
        nodes.push(node(&paper, NodeKind::Paper));
        edges.push(link("author_hub", &paper, EdgeKind::AuthoredBy));
    }

    let scores = importance_scores(&nodes, &edges, &ImportanceOptions::default());
    assert_eq!(scores.len(), 6);

    // Hub: full degree and full betweenness.
    let hub = scores[&NodeId::new("author_hub")];
    assert!((hub - 1.0).abs() < 1e-9, "{hub}");
    for i in 0..5 {
        let leaf = scores[&NodeId::new(format!("paper_{i}"))];
        assert!((leaf - 0.12).abs() < 1e-9, "{leaf}");
    }
}

#[test]
fn test_research_communities_form_clusters() {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    for i in 0..4 {
        nodes.push(node(&format!("paper_{i}"), NodeKind::Paper));
    }
    for i in 0..4 {
        nodes.push(node(&format!("keyword_{i}"), NodeKind::Keyword));
    }
    // Two 4-cliques.
    for i in 0..4 {
        for j in (i + 1)..4 {
            edges.push(link(
                &format!("paper_{i}"),
                &format!("paper_{j}"),
                EdgeKind::Cites,
            ));
            edges.push(link(
                &format!("keyword_{i}"),
                &format!("keyword_{j}"),
                EdgeKind::RelatedTo,
            ));
        }
    }
    // A weak bridge between them.
    edges.push(link("paper_0", "keyword_0", EdgeKind::RelatedTo).with_weight(0.1));

    let clusters = detect_clusters(&nodes, &edges);
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].size, 4);
    assert_eq!(clusters[1].size, 4);
    assert_eq!(clusters[0].name, "Paper Cluster 1");
    assert_eq!(clusters[1].name, "Keyword Cluster 2");
    assert_eq!(clusters[0].color, CLUSTER_PALETTE[0]);
    assert_eq!(clusters[1].color, CLUSTER_PALETTE[1]);
    assert_eq!(
        clusters[0].description,
        "Research cluster with 4 related entities"
    );
}

proptest! {
    #[test]
    fn prop_importance_scores_stay_in_unit_range(
        n in 1..25usize,
        raw_edges in proptest::collection::vec((0..25usize, 0..25usize), 0..60)
    ) {
        let nodes: Vec<KnowledgeNode> = (0..n)
            .map(|i| node(&format!("node_{i}"), NodeKind::Paper))
            .collect();
        let edges: Vec<KnowledgeEdge> = raw_edges
            .into_iter()
            .filter(|(a, b)| *a < n && *b < n && a != b)
            .map(|(a, b)| link(&format!("node_{a}"), &format!("node_{b}"), EdgeKind::Cites))
            .collect();

        let scores = importance_scores(&nodes, &edges, &ImportanceOptions::default());
        prop_assert_eq!(scores.len(), n);
        for score in scores.values() {
            prop_assert!((0.0..=1.0).contains(score), "out of range: {}", score);
        }
    }
}
