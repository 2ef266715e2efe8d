//! Davenport application binary - composition root.
//!
//! Ties the workspace crates into a single executable:
//! 1. Load configuration from TOML
//! 2. Read the required LLM API key from the environment
//! 3. Build the in-memory stores (sessions + seeded orders)
//! 4. Seed the retrieval corpus from the catalog
//! 5. Start the axum REST API server

use std::path::PathBuf;
use std::sync::Arc;

use davenport_api::{routes, AppState};
use davenport_chat::{AnswerEngine, ConversationRouter, EngineTuning, GeminiClient};
use davenport_core::catalog;
use davenport_core::config::DavenportConfig;
use davenport_store::{MemoryOrderStore, MemorySessionStore, OrderStore, SessionStore};
use davenport_vector::{GeminiEmbedding, Retriever};

fn config_path() -> PathBuf {
    std::env::var("DAVENPORT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("davenport.toml"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Davenport v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = config_path();
    let config = DavenportConfig::load_or_default(&config_file);

    // The hosted LLM is not optional; refuse to start without a key.
    let api_key = match std::env::var("GOOGLE_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => {
            tracing::error!("GOOGLE_API_KEY not found in environment variables");
            std::process::exit(1);
        }
    };

    // Stores, preloaded with the sample orders.
    let sessions: Arc<dyn SessionStore> =
        Arc::new(MemorySessionStore::new(config.chat.history_cap));
    let orders: Arc<dyn OrderStore> = Arc::new(MemoryOrderStore::with_seed(catalog::seed_orders()));

    // Retrieval corpus: chunk + embed + index the catalog. A seeding failure
    // leaves retrieval degraded; the answer engine falls back to the direct
    // prompt and /api/status keeps reporting "initializing".
    let embedder = Arc::new(GeminiEmbedding::new(
        api_key.clone(),
        config.llm.embedding_model.clone(),
    ));
    let retriever = Arc::new(Retriever::new(
        embedder,
        config.retrieval.chunk_size,
        config.retrieval.chunk_overlap,
    ));
    retriever.seed_or_degrade(&catalog::seed_documents()).await;

    // Chat pipeline.
    let llm = Arc::new(
        GeminiClient::new(api_key, config.llm.model.clone())
            .with_temperature(config.llm.temperature),
    );
    let router = ConversationRouter::new(Arc::clone(&sessions), Arc::clone(&orders));
    let engine = AnswerEngine::new(
        llm,
        Arc::clone(&retriever),
        Arc::clone(&sessions),
        Arc::clone(&orders),
        EngineTuning {
            context_messages: config.chat.context_messages,
            fallback_context_messages: config.chat.fallback_context_messages,
            top_k: config.retrieval.top_k,
        },
    );

    let state = AppState::new(config, sessions, orders, router, engine, retriever);

    routes::start_server(state).await?;

    Ok(())
}
