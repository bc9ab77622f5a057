//! In-memory corpus store and snapshot sink.
//!
//! Backing for tests, benchmarks, and the CLI's self-contained demo mode.
//! [`MemoryCorpus`] serves records with the same filter semantics a real
//! store would, [`MemorySink`] keeps persisted snapshots in process, and
//! [`sample_corpus`] generates a reproducible citation network from a seed.

use crate::error::StoreError;
use crate::store::{GraphFilter, ResearchStore, SnapshotSink};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rg_model::{
    AuthorRecord, CitationRecord, GraphSnapshot, KeywordRecord, OwnerId, PaperRecord, SnapshotId,
    SnapshotSummary,
};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Insertion-ordered paper corpus.
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    papers: Vec<PaperRecord>,
    fail_next: AtomicBool,
}

impl MemoryCorpus {
    /// Empty corpus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Corpus pre-loaded with papers, kept in the given order.
    #[must_use]
    pub fn with_papers(papers: Vec<PaperRecord>) -> Self {
        Self {
            papers,
            fail_next: AtomicBool::new(false),
        }
    }

    /// Append one paper.
    pub fn add_paper(&mut self, paper: PaperRecord) {
        self.papers.push(paper);
    }

    /// Number of papers loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    /// Whether the corpus holds no papers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// Make the next `fetch_papers` call fail with a query error.
    pub fn fail_next_fetch(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn matches(paper: &PaperRecord, filter: &GraphFilter) -> bool {
        if let Some(ids) = &filter.papers {
            if !ids.contains(&paper.id) {
                return false;
            }
        }
        if let Some(ids) = &filter.authors {
            if !paper.authors.iter().any(|author| ids.contains(&author.id)) {
                return false;
            }
        }
        if let Some(terms) = &filter.keywords {
            if !paper
                .keywords
                .iter()
                .any(|keyword| terms.contains(&keyword.term))
            {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl ResearchStore for MemoryCorpus {
    async fn fetch_papers(&self, filter: &GraphFilter) -> Result<Vec<PaperRecord>, StoreError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Query("corpus store offline".to_string()));
        }
        Ok(self
            .papers
            .iter()
            .filter(|paper| Self::matches(paper, filter))
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}

/// Snapshot sink that keeps everything in process.
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: RwLock<Vec<(SnapshotId, GraphSnapshot)>>,
    fail_next: AtomicBool,
}

impl MemorySink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `persist` call fail with a persistence error.
    pub fn fail_next_persist(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of snapshots persisted so far.
    #[must_use]
    pub fn saved_count(&self) -> usize {
        self.saved.read().len()
    }

    /// Fetch a persisted snapshot back by id.
    #[must_use]
    pub fn snapshot(&self, id: SnapshotId) -> Option<GraphSnapshot> {
        self.saved
            .read()
            .iter()
            .find(|(saved_id, _)| *saved_id == id)
            .map(|(_, snapshot)| snapshot.clone())
    }
}

#[async_trait]
impl SnapshotSink for MemorySink {
    async fn persist(&self, snapshot: &GraphSnapshot) -> Result<SnapshotId, StoreError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Persist("snapshot sink offline".to_string()));
        }
        let id = SnapshotId::new();
        self.saved.write().push((id, snapshot.clone()));
        Ok(id)
    }

    async fn list(&self, owner: &OwnerId) -> Result<Vec<SnapshotSummary>, StoreError> {
        let mut rows: Vec<SnapshotSummary> = self
            .saved
            .read()
            .iter()
            .filter(|(_, snapshot)| snapshot.owner == *owner)
            .map(|(id, snapshot)| SnapshotSummary::of(*id, snapshot))
            .collect();
        // Ids sort by creation time, so newest first is a reverse id sort.
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }
}

const TOPICS: &[&str] = &[
    "sparse attention transformers",
    "graph neural message passing",
    "protein structure prediction",
    "federated gradient compression",
    "neural theorem proving",
    "reinforcement learning from preferences",
    "single-cell expression atlases",
    "quantum error correction codes",
    "diffusion model distillation",
    "retrieval-augmented generation",
];

const SURNAMES: &[&str] = &[
    "Okafor", "Lindqvist", "Tanaka", "Moreau", "Petrov", "Alvarez", "Whitfield", "Banerjee",
    "Costa", "Novak", "Haugen", "Demir",
];

const INSTITUTIONS: &[&str] = &[
    "Aalto University",
    "Institute for Computational Biology",
    "Pacific Research Lab",
    "University of Edinburgh",
    "Skolkovo Institute",
];

const TERMS: &[&str] = &[
    "machine learning",
    "graph theory",
    "optimization",
    "genomics",
    "cryptography",
    "distributed systems",
    "bayesian inference",
    "computer vision",
];

const CITATION_TYPES: &[&str] = &["supportive", "contradictory", "methodological"];

/// Generate a reproducible citation network of `papers` papers.
///
/// Papers share authors and keywords drawn from small pools and cite only
/// earlier papers, so the result is a connected-ish DAG whose shape is
/// fully determined by `seed`.
#[must_use]
pub fn sample_corpus(seed: u64, papers: usize) -> Vec<PaperRecord> {
    let mut rng = StdRng::seed_from_u64(seed);

    let author_pool: Vec<AuthorRecord> = (0..(papers / 2).max(3))
        .map(|i| {
            let surname = SURNAMES[i % SURNAMES.len()];
            AuthorRecord::new(format!("{} {surname}", initial(i)))
                .with_id(Uuid::from_u128(rng.gen()))
                .with_institution(INSTITUTIONS[i % INSTITUTIONS.len()])
                .with_h_index(rng.gen_range(1..60))
        })
        .collect();
    let keyword_pool: Vec<KeywordRecord> = TERMS
        .iter()
        .map(|term| KeywordRecord::new(*term).with_id(Uuid::from_u128(rng.gen())))
        .collect();

    let mut records: Vec<PaperRecord> = Vec::with_capacity(papers);
    let epoch = Utc
        .with_ymd_and_hms(2019, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default();
    for i in 0..papers {
        let topic = TOPICS[i % TOPICS.len()];
        let mut paper = PaperRecord::new(format!("Study {}: {topic}", i + 1))
            .with_id(Uuid::from_u128(rng.gen()))
            .with_doi(format!("10.5555/sample.{}", i + 1))
            .with_publication_date(epoch + Duration::days(rng.gen_range(0..2000)))
            .with_citation_count(rng.gen_range(0..250))
            .with_domains(vec![TERMS[i % TERMS.len()].to_string()]);

        let author_count = rng.gen_range(1..=3);
        for pick in rand::seq::index::sample(&mut rng, author_pool.len(), author_count) {
            paper = paper.with_author(author_pool[pick].clone());
        }
        let keyword_count = rng.gen_range(1..=3);
        for pick in rand::seq::index::sample(&mut rng, keyword_pool.len(), keyword_count) {
            paper = paper.with_keyword(keyword_pool[pick].clone());
        }

        // Cite backwards only, keeping the citation graph acyclic.
        let citation_count = rng.gen_range(0..=i.min(3));
        if citation_count > 0 {
            for pick in rand::seq::index::sample(&mut rng, i, citation_count) {
                let mut citation = CitationRecord::new(records[pick].id);
                if rng.gen_bool(0.5) {
                    citation = citation
                        .with_citation_type(CITATION_TYPES[pick % CITATION_TYPES.len()]);
                }
                paper = paper.with_citation(citation);
            }
        }
        records.push(paper);
    }
    records
}

fn initial(index: usize) -> String {
    let letter = char::from(b'A' + u8::try_from(index % 26).unwrap_or(0));
    format!("{letter}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_model::{GraphMeta, StructureReport};

    fn snapshot(owner: &str, name: &str) -> GraphSnapshot {
        GraphSnapshot {
            owner: OwnerId::new(owner),
            name: name.to_string(),
            description: String::new(),
            is_public: false,
            created_at: Utc::now(),
            nodes: Vec::new(),
            edges: Vec::new(),
            clusters: Vec::new(),
            analysis: StructureReport::default(),
            meta: GraphMeta::default(),
        }
    }

    #[tokio::test]
    async fn author_filter_keeps_insertion_order() {
        let shared = AuthorRecord::new("M. Okafor");
        let corpus = MemoryCorpus::with_papers(vec![
            PaperRecord::new("first").with_author(shared.clone()),
            PaperRecord::new("other"),
            PaperRecord::new("second").with_author(shared.clone()),
        ]);
        let filter = GraphFilter {
            authors: Some(vec![shared.id]),
            ..GraphFilter::default()
        };
        let fetched = corpus.fetch_papers(&filter).await.unwrap();
        let titles: Vec<&str> = fetched.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[tokio::test]
    async fn limit_applies_after_criteria() {
        let keyword = KeywordRecord::new("genomics");
        let corpus = MemoryCorpus::with_papers(vec![
            PaperRecord::new("off-topic"),
            PaperRecord::new("hit 1").with_keyword(keyword.clone()),
            PaperRecord::new("hit 2").with_keyword(keyword.clone()),
        ]);
        let filter = GraphFilter {
            keywords: Some(vec!["genomics".to_string()]),
            limit: Some(1),
            ..GraphFilter::default()
        };
        let fetched = corpus.fetch_papers(&filter).await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].title, "hit 1");
    }

    #[tokio::test]
    async fn fetch_failure_trips_once() {
        let corpus = MemoryCorpus::with_papers(vec![PaperRecord::new("p")]);
        corpus.fail_next_fetch();
        let filter = GraphFilter::default();
        assert!(corpus.fetch_papers(&filter).await.is_err());
        assert_eq!(corpus.fetch_papers(&filter).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn listing_is_per_owner_newest_first() {
        let sink = MemorySink::new();
        sink.persist(&snapshot("alice", "older")).await.unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        sink.persist(&snapshot("bob", "theirs")).await.unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        sink.persist(&snapshot("alice", "newer")).await.unwrap();

        let rows = sink.list(&OwnerId::new("alice")).await.unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["newer", "older"]);
    }

    #[tokio::test]
    async fn persist_failure_trips_once_and_saves_nothing() {
        let sink = MemorySink::new();
        sink.fail_next_persist();
        assert!(sink.persist(&snapshot("alice", "lost")).await.is_err());
        assert_eq!(sink.saved_count(), 0);
        let id = sink.persist(&snapshot("alice", "kept")).await.unwrap();
        assert_eq!(sink.snapshot(id).unwrap().name, "kept");
    }

    #[test]
    fn sample_corpus_is_reproducible() {
        let a = sample_corpus(7, 20);
        let b = sample_corpus(7, 20);
        assert_eq!(a.len(), 20);
        for (left, right) in a.iter().zip(&b) {
            assert_eq!(left.id, right.id);
            assert_eq!(left.title, right.title);
            assert_eq!(left.citations.len(), right.citations.len());
        }
    }

    #[test]
    fn sample_corpus_cites_backwards_only() {
        let papers = sample_corpus(3, 30);
        for (i, paper) in papers.iter().enumerate() {
            let earlier: Vec<Uuid> = papers[..i].iter().map(|p| p.id).collect();
            for citation in &paper.citations {
                assert!(earlier.contains(&citation.cited_paper));
            }
        }
    }
}
