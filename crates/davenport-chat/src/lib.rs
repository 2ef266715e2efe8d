//! Conversational interface for Davenport.
//!
//! The scripted conversation tree, the pending-input router that drives the
//! order-management flows, the LLM clients, and the answer engine with its
//! ordered fallback chain.

pub mod engine;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod router;
pub mod script;

pub use engine::{Answer, AnswerEngine, AnswerSource, EngineTuning};
pub use error::ChatError;
pub use llm::{GeminiClient, LanguageModel, LlmError, MockLlm};
pub use router::{BotReply, ConversationRouter};
pub use script::ScriptedResponse;
