//! Embedding service trait and implementations.
//!
//! - `GeminiEmbedding` calls the hosted Generative Language embedContent
//!   endpoint. This is the production backend.
//! - `MockEmbedding` provides deterministic hash-based vectors for testing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use reqwest::Client;
use serde::{Deserialize, Serialize};

use davenport_core::error::DavenportError;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Service for generating text embeddings.
///
/// Implementations convert text into fixed-dimensional vectors used for both
/// corpus seeding and query-time search.
pub trait EmbeddingService: Send + Sync {
    /// Generate an embedding vector for the given text.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, DavenportError>> + Send;

    /// Dimensionality of vectors produced by this service.
    fn dimensions(&self) -> usize;
}

/// Object-safe version of [`EmbeddingService`] for dynamic dispatch.
///
/// `EmbeddingService::embed` returns `impl Future` and is not object-safe;
/// this trait boxes the future so `Arc<dyn DynEmbeddingService>` can be
/// stored without generics. A blanket impl covers every `EmbeddingService`.
pub trait DynEmbeddingService: Send + Sync {
    fn embed_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, DavenportError>> + Send + 'a>,
    >;

    fn dimensions(&self) -> usize;
}

impl<T: EmbeddingService> DynEmbeddingService for T {
    fn embed_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, DavenportError>> + Send + 'a>,
    > {
        Box::pin(self.embed(text))
    }

    fn dimensions(&self) -> usize {
        EmbeddingService::dimensions(self)
    }
}

// ---------------------------------------------------------------------------
// GeminiEmbedding - hosted embedContent API
// ---------------------------------------------------------------------------

/// Embedding client for the Generative Language embedContent endpoint.
#[derive(Clone)]
pub struct GeminiEmbedding {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiEmbedding {
    /// Create a client for the given API key and embedding model
    /// (e.g. `embedding-001`).
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

impl std::fmt::Debug for GeminiEmbedding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiEmbedding")
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Serialize)]
struct EmbedContentRequest {
    model: String,
    content: ContentPayload,
}

#[derive(Serialize)]
struct ContentPayload {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

impl EmbeddingService for GeminiEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DavenportError> {
        if text.is_empty() {
            return Err(DavenportError::Embedding(
                "Cannot embed empty text".to_string(),
            ));
        }

        let url = format!(
            "{}/{model}:embedContent?key={key}",
            BASE_URL,
            model = self.model,
            key = self.api_key
        );

        let body = EmbedContentRequest {
            model: format!("models/{}", self.model),
            content: ContentPayload {
                parts: vec![TextPart {
                    text: text.to_string(),
                }],
            },
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DavenportError::Embedding(format!("embedContent request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response.text().await.unwrap_or_default();
            return Err(DavenportError::Embedding(format!(
                "embedContent returned {}: {}",
                status, body_text
            )));
        }

        let parsed: EmbedContentResponse = response.json().await.map_err(|e| {
            DavenportError::Embedding(format!("Failed to parse embedContent response: {}", e))
        })?;

        parsed
            .embedding
            .map(|e| e.values)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                DavenportError::Embedding("embedContent returned no values".to_string())
            })
    }

    fn dimensions(&self) -> usize {
        768
    }
}

// ---------------------------------------------------------------------------
// MockEmbedding - deterministic hash-based vectors for testing
// ---------------------------------------------------------------------------

/// Mock embedding service returning deterministic 384-dimensional unit
/// vectors derived from a hash of the input, so identical inputs always map
/// to identical vectors without a network call.
#[derive(Debug, Clone, Default)]
pub struct MockEmbedding;

impl MockEmbedding {
    pub fn new() -> Self {
        Self
    }

    fn hash_to_vector(text: &str) -> Vec<f32> {
        let mut result = Vec::with_capacity(384);
        for i in 0..384 {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            i.hash(&mut hasher);
            let h = hasher.finish();
            let val = ((h as f64) / (u64::MAX as f64)) * 2.0 - 1.0;
            result.push(val as f32);
        }

        // L2-normalize so cosine scores stay in a sane range.
        let norm: f32 = result.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in &mut result {
                *val /= norm;
            }
        }

        result
    }
}

impl EmbeddingService for MockEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DavenportError> {
        if text.is_empty() {
            return Err(DavenportError::Embedding(
                "Cannot embed empty text".to_string(),
            ));
        }
        Ok(Self::hash_to_vector(text))
    }

    fn dimensions(&self) -> usize {
        384
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_embedding_dimension() {
        let service = MockEmbedding::new();
        let vec = service.embed("modern sofa").await.unwrap();
        assert_eq!(vec.len(), 384);
    }

    #[tokio::test]
    async fn test_mock_embedding_deterministic() {
        let service = MockEmbedding::new();
        let v1 = service.embed("same text").await.unwrap();
        let v2 = service.embed("same text").await.unwrap();
        assert_eq!(v1, v2);
    }

    #[tokio::test]
    async fn test_mock_embedding_different_inputs() {
        let service = MockEmbedding::new();
        let v1 = service.embed("dining table").await.unwrap();
        let v2 = service.embed("storage bed").await.unwrap();
        assert_ne!(v1, v2);
    }

    #[tokio::test]
    async fn test_mock_embedding_empty_text() {
        let service = MockEmbedding::new();
        assert!(service.embed("").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_embedding_is_unit_vector() {
        let service = MockEmbedding::new();
        let vec = service.embed("normalize me").await.unwrap();
        let norm: f32 = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_dyn_dispatch() {
        let service: std::sync::Arc<dyn DynEmbeddingService> =
            std::sync::Arc::new(MockEmbedding::new());
        let vec = service.embed_boxed("boxed").await.unwrap();
        assert_eq!(vec.len(), service.dimensions());
    }
}
