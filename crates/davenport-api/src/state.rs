//! Application state shared across all route handlers.

use std::sync::Arc;

use davenport_chat::{AnswerEngine, ConversationRouter};
use davenport_core::config::DavenportConfig;
use davenport_store::{OrderStore, SessionStore};
use davenport_vector::Retriever;

/// Shared application state.
///
/// All fields are `Arc`s so the state clones cheaply into handler tasks.
/// The stores sit behind traits; handlers never see the concrete backing.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DavenportConfig>,
    pub sessions: Arc<dyn SessionStore>,
    pub orders: Arc<dyn OrderStore>,
    pub router: Arc<ConversationRouter>,
    pub engine: Arc<AnswerEngine>,
    pub retriever: Arc<Retriever>,
}

impl AppState {
    pub fn new(
        config: DavenportConfig,
        sessions: Arc<dyn SessionStore>,
        orders: Arc<dyn OrderStore>,
        router: ConversationRouter,
        engine: AnswerEngine,
        retriever: Arc<Retriever>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
            orders,
            router: Arc::new(router),
            engine: Arc::new(engine),
            retriever,
        }
    }
}
