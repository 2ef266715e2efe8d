//! Retrieval layer for Davenport.
//!
//! Seeds an in-memory vector index from the JSON-serialized catalog at
//! startup and answers top-k similarity queries for the answer engine.
//! Embeddings come from the hosted embedContent API in production and from
//! a deterministic hash-based mock in tests.

pub mod chunk;
pub mod embedding;
pub mod index;
pub mod retriever;

pub use embedding::{DynEmbeddingService, EmbeddingService, GeminiEmbedding, MockEmbedding};
pub use index::{SearchHit, VectorIndex};
pub use retriever::Retriever;
