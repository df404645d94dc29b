//! In-memory nearest-neighbor index over embedded chunk texts.
//!
//! The index is exact: every query scores every entry by cosine
//! similarity. It is built once per run from the full chunk set, never
//! updated incrementally, and never persisted.

use anyhow::{bail, Result};

use crate::config::EmbeddingConfig;
use crate::embedding::{embed_all, EmbeddingProvider};
use crate::models::SearchHit;

struct Entry {
    text: String,
    vector: Vec<f32>,
}

/// Exact in-memory vector index mapping chunk texts to embeddings.
pub struct VectorIndex {
    entries: Vec<Entry>,
    dims: usize,
}

impl VectorIndex {
    /// Build an index from parallel text/vector lists.
    ///
    /// All vectors must share one dimensionality; an empty input or a
    /// mismatched pair is rejected.
    pub fn from_vectors(texts: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<Self> {
        if texts.len() != vectors.len() {
            bail!(
                "Text/vector count mismatch: {} texts, {} vectors",
                texts.len(),
                vectors.len()
            );
        }
        if texts.is_empty() {
            bail!("Cannot build an index over zero texts");
        }

        let dims = vectors[0].len();
        if dims == 0 {
            bail!("Embedding vectors are empty");
        }
        for (i, v) in vectors.iter().enumerate() {
            if v.len() != dims {
                bail!(
                    "Embedding dimension mismatch at entry {}: expected {}, got {}",
                    i,
                    dims,
                    v.len()
                );
            }
        }

        let entries = texts
            .into_iter()
            .zip(vectors)
            .map(|(text, vector)| Entry { text, vector })
            .collect();

        Ok(Self { entries, dims })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding dimensionality shared by all entries.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Top-`k` entries by cosine similarity against `query`, best first.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .map(|entry| SearchHit {
                text: entry.text.clone(),
                score: cosine_similarity(query, &entry.vector),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        hits
    }
}

/// Embed all texts and build the index over them.
///
/// Only page content is embedded; any document metadata was dropped when
/// the chunk texts were extracted. Any embedding or construction error is
/// returned to the caller, which treats it as terminal for the run.
pub async fn build_index(
    provider: &dyn EmbeddingProvider,
    config: &EmbeddingConfig,
    texts: Vec<String>,
) -> Result<VectorIndex> {
    let vectors = embed_all(provider, config.batch_size, &texts).await?;
    VectorIndex::from_vectors(texts, vectors)
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`; `0.0` for empty vectors or vectors of
/// different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_empty_and_mismatched() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_from_vectors_rejects_dimension_mismatch() {
        let texts = vec!["a".to_string(), "b".to_string()];
        let vectors = vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]];
        assert!(VectorIndex::from_vectors(texts, vectors).is_err());
    }

    #[test]
    fn test_from_vectors_rejects_empty_input() {
        assert!(VectorIndex::from_vectors(vec![], vec![]).is_err());
    }

    #[test]
    fn test_top1_returns_nearest_text() {
        let texts = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let vectors = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let index = VectorIndex::from_vectors(texts, vectors).unwrap();

        // Query closest to B.
        let hits = index.search(&[0.1, 0.9, 0.1], 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "B");
    }

    #[test]
    fn test_search_orders_by_score_and_bounds_k() {
        let texts = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        let vectors = vec![
            vec![1.0, 0.0],
            vec![0.7, 0.7],
            vec![0.0, 1.0],
        ];
        let index = VectorIndex::from_vectors(texts, vectors).unwrap();

        let hits = index.search(&[1.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "x");
        assert_eq!(hits[1].text, "y");
        assert!(hits[0].score >= hits[1].score);

        let all = index.search(&[1.0, 0.0], 10);
        assert_eq!(all.len(), 3);
    }
}
