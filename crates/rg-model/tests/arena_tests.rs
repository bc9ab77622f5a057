use proptest::prelude::*;
use rg_model::{EdgeKind, GraphArena, KnowledgeEdge, KnowledgeNode, NodeId, NodeKind};

fn node(id: String) -> KnowledgeNode {
    KnowledgeNode::new(NodeId::new(id.clone()), id, NodeKind::Paper)
}

proptest! {
    #[test]
    fn prop_finalize_keeps_exactly_the_connected_edges(
        node_ids in proptest::collection::vec(0..30u8, 0..30),
        raw_edges in proptest::collection::vec((0..40u8, 0..40u8), 0..80)
    ) {
        let mut arena = GraphArena::new();
        for id in &node_ids {
            arena.insert_node(node(format!("n{id}")));
        }
        for (a, b) in &raw_edges {
            arena.push_edge(KnowledgeEdge::new(
                NodeId::new(format!("n{a}")),
                NodeId::new(format!("n{b}")),
                EdgeKind::Cites,
            ));
        }

        let before = arena.edge_count();
        let dropped = arena.finalize_edges();
        prop_assert_eq!(before, arena.edge_count() + dropped);

        // Survivors all resolve; no connected edge was lost.
        for edge in arena.edges() {
            prop_assert!(arena.contains(&edge.source));
            prop_assert!(arena.contains(&edge.target));
        }
        let connected = raw_edges
            .iter()
            .filter(|(a, b)| node_ids.contains(a) && node_ids.contains(b))
            .count();
        prop_assert_eq!(arena.edge_count(), connected);
    }

    #[test]
    fn prop_duplicate_ids_never_grow_the_arena(
        ids in proptest::collection::vec(0..10u8, 0..50)
    ) {
        let mut arena = GraphArena::new();
        let mut seen = std::collections::HashSet::new();
        for id in &ids {
            let fresh = arena.insert_node(node(format!("n{id}")));
            prop_assert_eq!(fresh, seen.insert(*id));
        }
        prop_assert_eq!(arena.node_count(), seen.len());
    }
}
