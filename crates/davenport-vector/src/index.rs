//! In-memory vector index with brute-force cosine similarity search.
//!
//! The corpus is a few dozen chunks of catalog JSON, so O(n) search is more
//! than adequate. All operations are thread-safe via an interior RwLock.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use uuid::Uuid;

use davenport_core::error::DavenportError;

/// A single hit returned from a vector search.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The ID of the matching entry.
    pub id: Uuid,
    /// Cosine similarity score.
    pub score: f64,
    /// Metadata associated with the entry (includes the chunk text).
    pub metadata: Value,
}

#[derive(Debug, Clone)]
struct VectorEntry {
    embedding: Vec<f32>,
    metadata: Value,
}

/// In-memory brute-force cosine index.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    entries: Arc<RwLock<HashMap<Uuid, VectorEntry>>>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vector with associated metadata, overwriting any existing
    /// entry with the same ID.
    pub fn insert(
        &self,
        id: Uuid,
        embedding: Vec<f32>,
        metadata: Value,
    ) -> Result<(), DavenportError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| DavenportError::Retrieval(format!("Lock poisoned: {}", e)))?;
        entries.insert(
            id,
            VectorEntry {
                embedding,
                metadata,
            },
        );
        Ok(())
    }

    /// The k nearest neighbors to the query vector by cosine similarity,
    /// sorted by descending score.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, DavenportError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| DavenportError::Retrieval(format!("Lock poisoned: {}", e)))?;

        let mut scored: Vec<SearchHit> = entries
            .iter()
            .map(|(id, entry)| SearchHit {
                id: *id,
                score: cosine_similarity(query, &entry.embedding),
                metadata: entry.metadata.clone(),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);

        Ok(scored)
    }

    /// Number of vectors currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cosine similarity, 0.0 for zero-magnitude or mismatched-length inputs.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();

    let mag_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_search() {
        let index = VectorIndex::new();
        let id1 = Uuid::new_v4();
        let id2 = Uuid::new_v4();

        index
            .insert(id1, vec![1.0f32; 16], serde_json::json!({"text": "sofa"}))
            .unwrap();
        index
            .insert(id2, vec![1.0f32; 16], serde_json::json!({"text": "bed"}))
            .unwrap();

        assert_eq!(index.len(), 2);

        let hits = index.search(&vec![1.0f32; 16], 5).unwrap();
        assert_eq!(hits.len(), 2);
        assert!((hits[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_search_empty_index() {
        let index = VectorIndex::new();
        assert!(index.search(&vec![1.0f32; 16], 10).unwrap().is_empty());
    }

    #[test]
    fn test_search_respects_k_limit() {
        let index = VectorIndex::new();
        for _ in 0..10 {
            index
                .insert(Uuid::new_v4(), vec![1.0f32; 16], serde_json::json!({}))
                .unwrap();
        }
        assert_eq!(index.search(&vec![1.0f32; 16], 3).unwrap().len(), 3);
    }

    #[test]
    fn test_search_ordering() {
        let index = VectorIndex::new();
        let close_id = Uuid::new_v4();
        let far_id = Uuid::new_v4();

        index
            .insert(close_id, vec![1.0f32; 16], serde_json::json!({}))
            .unwrap();
        index
            .insert(far_id, vec![-1.0f32; 16], serde_json::json!({}))
            .unwrap();

        let hits = index.search(&vec![1.0f32; 16], 10).unwrap();
        assert_eq!(hits[0].id, close_id);
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn test_insert_overwrites() {
        let index = VectorIndex::new();
        let id = Uuid::new_v4();
        index
            .insert(id, vec![1.0f32; 16], serde_json::json!({"v": 1}))
            .unwrap();
        index
            .insert(id, vec![2.0f32; 16], serde_json::json!({"v": 2}))
            .unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0f32; 8];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let mut a = vec![0.0f32; 8];
        let mut b = vec![0.0f32; 8];
        a[0] = 1.0;
        b[1] = 1.0;
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0; 8], &[1.0; 8]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch() {
        assert_eq!(cosine_similarity(&[1.0; 4], &[1.0; 8]), 0.0);
    }
}
