//! Graph nodes and their fixed set of type tags.

use crate::cluster::ClusterId;
use crate::geometry::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Open property bag attached to nodes and edges.
pub type PropertyBag = HashMap<String, Value>;

/// Stable node identity, unique within one graph build.
///
/// Ids are derived from record identity so repeated builds over the same
/// corpus produce the same keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Node id for a paper record.
    #[must_use]
    pub fn paper(id: Uuid) -> Self {
        Self(format!("paper_{id}"))
    }

    /// Node id for an author record.
    #[must_use]
    pub fn author(id: Uuid) -> Self {
        Self(format!("author_{id}"))
    }

    /// Node id for a keyword record.
    #[must_use]
    pub fn keyword(id: Uuid) -> Self {
        Self(format!("keyword_{id}"))
    }

    /// Arbitrary raw id.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw key.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed set of node type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A research paper.
    Paper,
    /// A paper author.
    Author,
    /// An abstract concept.
    Concept,
    /// A research institution.
    Institution,
    /// A journal or venue.
    Journal,
    /// A keyword term.
    Keyword,
    /// A gene.
    Gene,
    /// A protein.
    Protein,
    /// A disease.
    Disease,
    /// A drug or compound.
    Drug,
    /// A research method.
    Method,
}

impl NodeKind {
    /// Tag string as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Author => "author",
            Self::Concept => "concept",
            Self::Institution => "institution",
            Self::Journal => "journal",
            Self::Keyword => "keyword",
            Self::Gene => "gene",
            Self::Protein => "protein",
            Self::Disease => "disease",
            Self::Drug => "drug",
            Self::Method => "method",
        }
    }

    /// Capitalized label, used when naming clusters.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paper => "Paper",
            Self::Author => "Author",
            Self::Concept => "Concept",
            Self::Institution => "Institution",
            Self::Journal => "Journal",
            Self::Keyword => "Keyword",
            Self::Gene => "Gene",
            Self::Protein => "Protein",
            Self::Disease => "Disease",
            Self::Drug => "Drug",
            Self::Method => "Method",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed node in the knowledge graph.
///
/// Created once by the builder; `position`, `cluster`, and `importance` are
/// filled by a single assembly pass after the enrichment stages finish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeNode {
    /// Stable key, unique within this build.
    pub id: NodeId,
    /// Display label.
    pub label: String,
    /// Type tag.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Type-specific attributes.
    #[serde(default)]
    pub properties: PropertyBag,
    /// 3D position; absent until a layout ran.
    #[serde(default)]
    pub position: Option<Vec3>,
    /// Cluster membership; absent until clustering ran.
    #[serde(default)]
    pub cluster: Option<ClusterId>,
    /// Combined importance score, zero until scoring ran.
    #[serde(default)]
    pub importance: f64,
}

impl KnowledgeNode {
    /// New node with empty enrichment fields.
    #[must_use]
    pub fn new(id: NodeId, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            properties: PropertyBag::new(),
            position: None,
            cluster: None,
            importance: 0.0,
        }
    }

    /// With one property bag entry.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// With an importance score already set.
    #[must_use]
    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = importance;
        self
    }
}
