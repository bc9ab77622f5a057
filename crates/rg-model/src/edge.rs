//! Graph edges and their fixed set of relation tags.

use crate::node::{NodeId, PropertyBag};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Fixed set of relation tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Paper cites paper.
    Cites,
    /// Paper authored by author.
    AuthoredBy,
    /// Author affiliated with institution.
    AffiliatedWith,
    /// Paper published in journal.
    PublishedIn,
    /// Paper related to keyword or concept.
    RelatedTo,
    /// Entity studies entity.
    Studies,
    /// Drug treats disease.
    Treats,
    /// Protein interacts with protein.
    InteractsWith,
    /// Paper uses method.
    UsesMethod,
}

impl EdgeKind {
    /// Tag string as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cites => "cites",
            Self::AuthoredBy => "authored_by",
            Self::AffiliatedWith => "affiliated_with",
            Self::PublishedIn => "published_in",
            Self::RelatedTo => "related_to",
            Self::Studies => "studies",
            Self::Treats => "treats",
            Self::InteractsWith => "interacts_with",
            Self::UsesMethod => "uses_method",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, weighted edge referencing nodes by id only.
///
/// Endpoints are not owned; an edge whose endpoint never entered the node
/// set is dangling and gets dropped when the arena finalizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeEdge {
    /// Source node id.
    pub source: NodeId,
    /// Target node id.
    pub target: NodeId,
    /// Relation tag.
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    /// Non-negative strength, used as spring strength and propagation factor.
    pub weight: f64,
    /// Relation-specific attributes.
    #[serde(default)]
    pub properties: PropertyBag,
}

impl KnowledgeEdge {
    /// New edge with the default weight of 1.0.
    #[must_use]
    pub fn new(source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        Self {
            source,
            target,
            kind,
            weight: 1.0,
            properties: PropertyBag::new(),
        }
    }

    /// With an explicit weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// With one property bag entry.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_weight_is_one() {
        let edge = KnowledgeEdge::new(NodeId::new("a"), NodeId::new("b"), EdgeKind::Cites);
        assert!((edge.weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn relation_tag_round_trips() {
        let edge = KnowledgeEdge::new(NodeId::new("p"), NodeId::new("k"), EdgeKind::RelatedTo)
            .with_weight(0.5)
            .with_property("context", json!("methods section"));
        let value = serde_json::to_value(&edge).unwrap();
        assert_eq!(value["type"], json!("related_to"));
        let back: KnowledgeEdge = serde_json::from_value(value).unwrap();
        assert_eq!(back.kind, EdgeKind::RelatedTo);
        assert!((back.weight - 0.5).abs() < f64::EPSILON);
    }
}
