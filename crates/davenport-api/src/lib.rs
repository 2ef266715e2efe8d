//! Davenport API crate - axum HTTP server and route handlers.
//!
//! Exposes the chat endpoint (free-text answers), the scripted bot-response
//! endpoint, the readiness probe, and the four order operations.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
