//! Source records as returned by a research corpus store.
//!
//! Papers arrive with their authors, keywords, and outgoing citations
//! pre-joined, so the builder never issues follow-up queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A paper with its relations pre-loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Record identity.
    pub id: Uuid,
    /// Paper title.
    pub title: String,
    /// Abstract text when available.
    #[serde(default)]
    pub abstract_text: Option<String>,
    /// DOI when available.
    #[serde(default)]
    pub doi: Option<String>,
    /// Publication date when known.
    #[serde(default)]
    pub publication_date: Option<DateTime<Utc>>,
    /// Times this paper has been cited overall.
    #[serde(default)]
    pub citation_count: u32,
    /// Research domain tags.
    #[serde(default)]
    pub research_domains: Vec<String>,
    /// Whether the paper reports null results.
    #[serde(default)]
    pub has_null_results: bool,
    /// Joined authors, in author-position order.
    #[serde(default)]
    pub authors: Vec<AuthorRecord>,
    /// Joined keywords.
    #[serde(default)]
    pub keywords: Vec<KeywordRecord>,
    /// Outgoing citations.
    #[serde(default)]
    pub citations: Vec<CitationRecord>,
}

impl PaperRecord {
    /// Minimal paper with a fresh id and no relations.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            abstract_text: None,
            doi: None,
            publication_date: None,
            citation_count: 0,
            research_domains: Vec::new(),
            has_null_results: false,
            authors: Vec::new(),
            keywords: Vec::new(),
            citations: Vec::new(),
        }
    }

    /// With an explicit record id.
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// With one more author.
    #[must_use]
    pub fn with_author(mut self, author: AuthorRecord) -> Self {
        self.authors.push(author);
        self
    }

    /// With one more keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: KeywordRecord) -> Self {
        self.keywords.push(keyword);
        self
    }

    /// With one more outgoing citation.
    #[must_use]
    pub fn with_citation(mut self, citation: CitationRecord) -> Self {
        self.citations.push(citation);
        self
    }

    /// With an overall citation count.
    #[must_use]
    pub fn with_citation_count(mut self, count: u32) -> Self {
        self.citation_count = count;
        self
    }

    /// With research domain tags.
    #[must_use]
    pub fn with_domains(mut self, domains: Vec<String>) -> Self {
        self.research_domains = domains;
        self
    }

    /// With a DOI.
    #[must_use]
    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    /// With a publication date.
    #[must_use]
    pub fn with_publication_date(mut self, date: DateTime<Utc>) -> Self {
        self.publication_date = Some(date);
        self
    }
}

/// An author joined onto a paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRecord {
    /// Record identity.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Home institution when known.
    #[serde(default)]
    pub institution: Option<String>,
    /// ORCID identifier when known.
    #[serde(default)]
    pub orcid: Option<String>,
    /// h-index.
    #[serde(default)]
    pub h_index: u32,
    /// Total citations across all works.
    #[serde(default)]
    pub total_citations: u32,
}

impl AuthorRecord {
    /// Minimal author with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            institution: None,
            orcid: None,
            h_index: 0,
            total_citations: 0,
        }
    }

    /// With an explicit record id.
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// With a home institution.
    #[must_use]
    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    /// With an h-index.
    #[must_use]
    pub fn with_h_index(mut self, h_index: u32) -> Self {
        self.h_index = h_index;
        self
    }
}

/// A keyword joined onto a paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRecord {
    /// Record identity.
    pub id: Uuid,
    /// Keyword term.
    pub term: String,
    /// Category tag when assigned.
    #[serde(default)]
    pub category: Option<String>,
    /// How many papers carry this keyword.
    #[serde(default)]
    pub usage_count: u32,
}

impl KeywordRecord {
    /// Minimal keyword with a fresh id.
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            term: term.into(),
            category: None,
            usage_count: 0,
        }
    }

    /// With an explicit record id.
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// With a category tag.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// An outgoing citation from one paper to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationRecord {
    /// Cited paper's record id.
    pub cited_paper: Uuid,
    /// Citing context sentence when extracted.
    #[serde(default)]
    pub context: Option<String>,
    /// Citation type tag (supportive, contradictory, ...).
    #[serde(default)]
    pub citation_type: Option<String>,
}

impl CitationRecord {
    /// Citation to a paper id.
    #[must_use]
    pub fn new(cited_paper: Uuid) -> Self {
        Self {
            cited_paper,
            context: None,
            citation_type: None,
        }
    }

    /// With a context sentence.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// With a citation type tag.
    #[must_use]
    pub fn with_citation_type(mut self, citation_type: impl Into<String>) -> Self {
        self.citation_type = Some(citation_type.into());
        self
    }
}
