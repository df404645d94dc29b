//! Core data models used throughout Repo QA.
//!
//! These types represent the issue documents, chunks, and search hits that
//! flow through the load → split → index → answer pipeline.

use chrono::{DateTime, Utc};

/// One GitHub issue, normalized into a document.
///
/// `body` is the document content; everything else is metadata carried
/// alongside it. Produced by the issue connector, consumed by the splitter.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Document {
    /// Repository the issue came from, as `"owner/repo"`.
    pub source: String,
    /// Issue number, as a string for stable identification.
    pub source_id: String,
    pub source_url: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Issue state: `"open"` or `"closed"`.
    pub state: String,
    /// The issues listing also returns pull requests; they are kept and
    /// flagged rather than filtered out.
    pub is_pull_request: bool,
    pub body: String,
}

impl Document {
    /// Length of the document content in characters.
    pub fn content_len(&self) -> usize {
        self.body.chars().count()
    }
}

/// A chunk of a document's body text.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Chunk {
    pub id: String,
    /// Position of the source document in the aggregated corpus.
    pub document_index: usize,
    /// Position of this chunk within its document, starting at 0.
    pub chunk_index: usize,
    pub text: String,
    pub hash: String,
}

/// A single nearest-neighbor match returned by the vector index.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub text: String,
    /// Cosine similarity against the query vector, in `[-1.0, 1.0]`.
    pub score: f32,
}
