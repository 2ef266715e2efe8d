//! The answer engine: retrieval-grounded generation with an ordered
//! fallback chain.
//!
//! Strategies are tried in sequence — retrieval-grounded, then the direct
//! prompt without retrieval, then a static apology — and the first success
//! wins. The engine never returns an error; the static strategy is
//! infallible, so the worst case a caller ever sees is the apology text.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use davenport_store::{OrderStore, SessionStore};
use davenport_vector::Retriever;

use crate::error::ChatError;
use crate::llm::LanguageModel;
use crate::prompt;

/// The apology returned when every generation strategy has failed.
const STATIC_APOLOGY: &str =
    "I'm experiencing technical difficulties. Please try again later or contact our support team.";

/// Which strategy produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    /// Retrieval-grounded LLM call succeeded.
    Retrieval,
    /// The direct (non-retrieval) prompt succeeded.
    Direct,
    /// Both LLM strategies failed; static apology.
    Static,
}

/// A free-text answer tagged with the strategy that produced it.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

/// Tuning knobs for prompt assembly.
#[derive(Debug, Clone, Copy)]
pub struct EngineTuning {
    /// History messages included in the grounded prompt.
    pub context_messages: usize,
    /// History messages included in the direct prompt.
    pub fallback_context_messages: usize,
    /// Chunks retrieved per query.
    pub top_k: usize,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            context_messages: 6,
            fallback_context_messages: 4,
            top_k: 4,
        }
    }
}

/// Assembles context, invokes the model, and degrades gracefully.
pub struct AnswerEngine {
    llm: Arc<dyn LanguageModel>,
    retriever: Arc<Retriever>,
    sessions: Arc<dyn SessionStore>,
    orders: Arc<dyn OrderStore>,
    tuning: EngineTuning,
}

impl AnswerEngine {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        retriever: Arc<Retriever>,
        sessions: Arc<dyn SessionStore>,
        orders: Arc<dyn OrderStore>,
        tuning: EngineTuning,
    ) -> Self {
        Self {
            llm,
            retriever,
            sessions,
            orders,
            tuning,
        }
    }

    /// Answer a free-text question in the context of a session.
    ///
    /// Walks the strategy chain; never errors.
    pub async fn answer(&self, session_id: &str, question: &str) -> Answer {
        match self.grounded(session_id, question).await {
            Ok(text) => {
                return Answer {
                    text,
                    source: AnswerSource::Retrieval,
                }
            }
            Err(e) => warn!(error = %e, "Grounded strategy failed; trying direct prompt"),
        }

        match self.direct(session_id, question).await {
            Ok(text) => {
                return Answer {
                    text,
                    source: AnswerSource::Direct,
                }
            }
            Err(e) => warn!(error = %e, "Direct strategy failed; returning static apology"),
        }

        Answer {
            text: STATIC_APOLOGY.to_string(),
            source: AnswerSource::Static,
        }
    }

    /// Strategy 1: retrieve top-k chunks and ask the model with history +
    /// context.
    async fn grounded(&self, session_id: &str, question: &str) -> Result<String, ChatError> {
        let chunks = self.retriever.retrieve(question, self.tuning.top_k).await?;
        let context = if chunks.is_empty() {
            "No relevant information found.".to_string()
        } else {
            chunks.join("\n\n")
        };

        let history = self.sessions.history(session_id, self.tuning.context_messages);
        let prompt = prompt::grounded_prompt(&history, &context, question);

        Ok(self.llm.generate(&prompt).await?)
    }

    /// Strategy 2: static store summary plus an order lookup when the
    /// question references an order number, no retrieval.
    async fn direct(&self, session_id: &str, question: &str) -> Result<String, ChatError> {
        let order_info = prompt::extract_order_number(question).map(|number| {
            match self.orders.find(&number) {
                Some(order) => prompt::order_details_block(&order),
                None => prompt::unknown_order_note(&number),
            }
        });

        let recent = self
            .sessions
            .history(session_id, self.tuning.fallback_context_messages);
        let prompt = prompt::direct_prompt(order_info.as_deref(), &recent, question);

        Ok(self.llm.generate(&prompt).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use davenport_core::catalog;
    use davenport_core::types::Message;
    use davenport_store::{MemoryOrderStore, MemorySessionStore};
    use davenport_vector::MockEmbedding;

    struct Fixture {
        engine: AnswerEngine,
        sessions: Arc<MemorySessionStore>,
        retriever: Arc<Retriever>,
    }

    async fn fixture(llm: MockLlm, seed_retrieval: bool) -> Fixture {
        let sessions = Arc::new(MemorySessionStore::new(50));
        let orders = Arc::new(MemoryOrderStore::with_seed(catalog::seed_orders()));
        let retriever = Arc::new(Retriever::new(Arc::new(MockEmbedding::new()), 1000, 200));
        if seed_retrieval {
            retriever.seed(&catalog::seed_documents()).await.unwrap();
        }

        let engine = AnswerEngine::new(
            Arc::new(llm),
            Arc::clone(&retriever),
            Arc::clone(&sessions) as Arc<dyn SessionStore>,
            orders as Arc<dyn OrderStore>,
            EngineTuning::default(),
        );

        Fixture {
            engine,
            sessions,
            retriever,
        }
    }

    // ---- Strategy selection ----

    #[tokio::test]
    async fn test_grounded_answer_when_everything_healthy() {
        let f = fixture(MockLlm::new("The Modern Sofa is $899."), true).await;
        let answer = f.engine.answer("s1", "how much is the sofa?").await;
        assert_eq!(answer.source, AnswerSource::Retrieval);
        assert_eq!(answer.text, "The Modern Sofa is $899.");
    }

    #[tokio::test]
    async fn test_degrades_to_direct_when_retrieval_unseeded() {
        let f = fixture(MockLlm::new("We sell sofas from $899."), false).await;
        assert!(!f.retriever.is_ready());

        let answer = f.engine.answer("s1", "what do you sell?").await;
        assert_eq!(answer.source, AnswerSource::Direct);
        assert_eq!(answer.text, "We sell sofas from $899.");
    }

    #[tokio::test]
    async fn test_degrades_to_static_when_llm_down() {
        let f = fixture(MockLlm::failing(), true).await;
        let answer = f.engine.answer("s1", "anything").await;
        assert_eq!(answer.source, AnswerSource::Static);
        assert_eq!(answer.text, STATIC_APOLOGY);
    }

    #[tokio::test]
    async fn test_answer_never_empty() {
        let f = fixture(MockLlm::failing(), false).await;
        let answer = f.engine.answer("s1", "anything").await;
        assert!(!answer.text.is_empty());
    }

    // ---- Context assembly ----

    #[tokio::test]
    async fn test_history_feeds_prompt_without_error() {
        let f = fixture(MockLlm::new("ok"), true).await;
        for i in 0..10 {
            f.sessions.append("s1", Message::user(format!("message {}", i)));
        }
        let answer = f.engine.answer("s1", "follow-up question").await;
        assert_eq!(answer.source, AnswerSource::Retrieval);
    }

    #[tokio::test]
    async fn test_unknown_session_still_answers() {
        let f = fixture(MockLlm::new("ok"), true).await;
        let answer = f.engine.answer("never-seen", "hello").await;
        assert_eq!(answer.source, AnswerSource::Retrieval);
    }

    // Order extraction feeds the direct prompt; verified through prompt
    // tests. Here we only confirm the direct strategy accepts questions
    // with order references end-to-end.
    #[tokio::test]
    async fn test_direct_strategy_with_order_reference() {
        let f = fixture(MockLlm::new("Order 12346 is on its way."), false).await;
        let answer = f.engine.answer("s1", "where is order #12346?").await;
        assert_eq!(answer.source, AnswerSource::Direct);
    }

    #[tokio::test]
    async fn test_direct_strategy_with_unknown_order_reference() {
        let f = fixture(MockLlm::new("I could not find that order."), false).await;
        let answer = f.engine.answer("s1", "where is order #99999?").await;
        assert_eq!(answer.source, AnswerSource::Direct);
        assert!(!answer.text.is_empty());
    }
}
