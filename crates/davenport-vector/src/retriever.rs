//! Corpus seeding and query-time retrieval.
//!
//! The retriever is seeded once at startup from the JSON-serialized catalog,
//! seed orders, and customer profiles. Until seeding completes the service
//! reports itself as initializing and free-text answers degrade to the
//! non-retrieval fallback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use davenport_core::catalog::SeedDocument;
use davenport_core::error::{DavenportError, Result};

use crate::chunk::split_text;
use crate::embedding::DynEmbeddingService;
use crate::index::VectorIndex;

/// Retrieval front-end over the vector index.
pub struct Retriever {
    index: VectorIndex,
    embedder: Arc<dyn DynEmbeddingService>,
    chunk_size: usize,
    chunk_overlap: usize,
    ready: AtomicBool,
}

impl Retriever {
    pub fn new(
        embedder: Arc<dyn DynEmbeddingService>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Self {
        Self {
            index: VectorIndex::new(),
            embedder,
            chunk_size,
            chunk_overlap,
            ready: AtomicBool::new(false),
        }
    }

    /// Whether seeding has completed successfully.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }

    /// Number of chunks in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Chunk, embed, and index the seed documents, then mark the retriever
    /// ready. Individual chunk failures abort seeding — a partially seeded
    /// index would silently skew retrieval.
    pub async fn seed(&self, documents: &[SeedDocument]) -> Result<usize> {
        let mut inserted = 0;

        for doc in documents {
            for (chunk_no, chunk) in split_text(&doc.text, self.chunk_size, self.chunk_overlap)
                .into_iter()
                .enumerate()
            {
                let embedding = self.embedder.embed_boxed(&chunk).await?;
                self.index.insert(
                    Uuid::new_v4(),
                    embedding,
                    serde_json::json!({
                        "source": doc.source,
                        "chunk": chunk_no,
                        "text": chunk,
                    }),
                )?;
                inserted += 1;
            }
        }

        self.ready.store(true, Ordering::Relaxed);
        info!(chunks = inserted, "Retrieval corpus seeded");
        Ok(inserted)
    }

    /// Seed, logging and swallowing failure so startup can continue in
    /// degraded (non-retrieval) mode.
    pub async fn seed_or_degrade(&self, documents: &[SeedDocument]) {
        if let Err(e) = self.seed(documents).await {
            warn!(error = %e, "Retrieval seeding failed; continuing without retrieval");
        }
    }

    /// The top-k most similar chunk texts for the query.
    ///
    /// Errors when the corpus has not been seeded, which the answer engine
    /// treats as a signal to fall back.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>> {
        if !self.is_ready() {
            return Err(DavenportError::Retrieval(
                "Retrieval corpus not seeded".to_string(),
            ));
        }

        let embedding = self.embedder.embed_boxed(query).await?;
        let hits = self.index.search(&embedding, k)?;
        debug!(query_len = query.len(), hits = hits.len(), "Retrieval query");

        Ok(hits
            .into_iter()
            .filter_map(|hit| {
                hit.metadata
                    .get("text")
                    .and_then(|t| t.as_str())
                    .map(str::to_string)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbedding;
    use davenport_core::catalog;

    fn retriever() -> Retriever {
        Retriever::new(Arc::new(MockEmbedding::new()), 1000, 200)
    }

    #[tokio::test]
    async fn test_retrieve_before_seed_fails() {
        let r = retriever();
        assert!(!r.is_ready());
        assert!(r.retrieve("modern sofa", 4).await.is_err());
    }

    #[tokio::test]
    async fn test_seed_marks_ready() {
        let r = retriever();
        let count = r.seed(&catalog::seed_documents()).await.unwrap();
        assert!(count > 0);
        assert!(r.is_ready());
        assert_eq!(r.len(), count);
    }

    #[tokio::test]
    async fn test_retrieve_returns_at_most_k() {
        let r = retriever();
        r.seed(&catalog::seed_documents()).await.unwrap();

        let chunks = r.retrieve("what does the modern sofa cost", 4).await.unwrap();
        assert!(!chunks.is_empty());
        assert!(chunks.len() <= 4);
    }

    #[tokio::test]
    async fn test_retrieved_chunks_come_from_corpus() {
        let r = retriever();
        let docs = catalog::seed_documents();
        r.seed(&docs).await.unwrap();

        let chunks = r.retrieve("storage bed", 2).await.unwrap();
        for chunk in &chunks {
            assert!(
                docs.iter().any(|d| d.text.contains(chunk.as_str())),
                "chunk not found in any seed document"
            );
        }
    }

    #[tokio::test]
    async fn test_seed_chunks_long_documents() {
        let r = Retriever::new(Arc::new(MockEmbedding::new()), 50, 10);
        let docs = vec![SeedDocument {
            source: "product",
            text: "x".repeat(200),
        }];
        let count = r.seed(&docs).await.unwrap();
        assert!(count > 1);
    }

    struct BrokenEmbedding;

    impl crate::embedding::EmbeddingService for BrokenEmbedding {
        async fn embed(&self, _text: &str) -> davenport_core::Result<Vec<f32>> {
            Err(DavenportError::Embedding("provider unreachable".to_string()))
        }

        fn dimensions(&self) -> usize {
            384
        }
    }

    #[tokio::test]
    async fn test_seed_or_degrade_swallows_failure() {
        let r = Retriever::new(Arc::new(BrokenEmbedding), 1000, 200);
        r.seed_or_degrade(&catalog::seed_documents()).await;
        assert!(!r.is_ready());
        assert!(r.is_empty());
    }

    #[tokio::test]
    async fn test_empty_documents_seed_cleanly() {
        let r = retriever();
        let count = r.seed(&[]).await.unwrap();
        assert_eq!(count, 0);
        assert!(r.is_ready());
    }
}
