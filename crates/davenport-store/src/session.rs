//! Session store: per-session transcripts and conversation state.
//!
//! Sessions are keyed by an opaque client-generated string id and created
//! lazily on first contact. Each transcript is capped at a fixed number of
//! messages, oldest dropped first.

use std::collections::HashMap;
use std::sync::RwLock;

use davenport_core::types::{Message, PendingInput};

/// Storage seam for chat sessions.
///
/// Handlers and the chat router depend on this trait, not on the memory
/// implementation, so the backing can be swapped without touching call
/// sites.
pub trait SessionStore: Send + Sync {
    /// Append a message, creating the session if absent, and trim the
    /// transcript to the configured cap.
    fn append(&self, session_id: &str, message: Message);

    /// The last `n` messages, oldest-to-newest.
    fn history(&self, session_id: &str, n: usize) -> Vec<Message>;

    /// Whether the session has been created.
    fn exists(&self, session_id: &str) -> bool;

    /// Adopt a client-supplied transcript when the server session holds at
    /// most one message: the provided messages are placed ahead of the
    /// newest server message.
    fn seed_if_fresh(&self, session_id: &str, messages: Vec<Message>);

    /// What free-text input the bot is waiting for in this session.
    fn pending_input(&self, session_id: &str) -> PendingInput;

    fn set_pending_input(&self, session_id: &str, pending: PendingInput);

    /// The order id most recently referenced in this session, if any.
    fn active_order(&self, session_id: &str) -> Option<String>;

    fn set_active_order(&self, session_id: &str, order_id: &str);
}

#[derive(Debug, Default)]
struct SessionState {
    messages: Vec<Message>,
    pending: PendingInput,
    active_order: Option<String>,
}

/// RwLock-guarded in-memory session store.
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionState>>,
    cap: usize,
}

impl MemorySessionStore {
    /// Create a store that retains at most `cap` messages per session.
    pub fn new(cap: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            cap,
        }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_session<R>(&self, session_id: &str, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut sessions = match self.sessions.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let state = sessions.entry(session_id.to_string()).or_default();
        f(state)
    }

    fn read_session<R>(&self, session_id: &str, f: impl FnOnce(&SessionState) -> R) -> Option<R> {
        let sessions = match self.sessions.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sessions.get(session_id).map(f)
    }
}

fn trim_to_cap(state: &mut SessionState, cap: usize) {
    if state.messages.len() > cap {
        let excess = state.messages.len() - cap;
        state.messages.drain(..excess);
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(50)
    }
}

impl SessionStore for MemorySessionStore {
    fn append(&self, session_id: &str, message: Message) {
        let cap = self.cap;
        self.with_session(session_id, |state| {
            state.messages.push(message);
            trim_to_cap(state, cap);
        });
    }

    fn history(&self, session_id: &str, n: usize) -> Vec<Message> {
        self.read_session(session_id, |state| {
            let start = state.messages.len().saturating_sub(n);
            state.messages[start..].to_vec()
        })
        .unwrap_or_default()
    }

    fn exists(&self, session_id: &str) -> bool {
        self.read_session(session_id, |_| ()).is_some()
    }

    fn seed_if_fresh(&self, session_id: &str, messages: Vec<Message>) {
        let cap = self.cap;
        self.with_session(session_id, |state| {
            if state.messages.len() > 1 {
                return;
            }
            let newest = state.messages.pop();
            state.messages = messages;
            if let Some(msg) = newest {
                state.messages.push(msg);
            }
            trim_to_cap(state, cap);
        });
    }

    fn pending_input(&self, session_id: &str) -> PendingInput {
        self.read_session(session_id, |state| state.pending)
            .unwrap_or_default()
    }

    fn set_pending_input(&self, session_id: &str, pending: PendingInput) {
        self.with_session(session_id, |state| {
            state.pending = pending;
        });
    }

    fn active_order(&self, session_id: &str) -> Option<String> {
        self.read_session(session_id, |state| state.active_order.clone())
            .flatten()
    }

    fn set_active_order(&self, session_id: &str, order_id: &str) {
        self.with_session(session_id, |state| {
            state.active_order = Some(order_id.to_string());
        });
    }
}
