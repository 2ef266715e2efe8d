//! In-memory state for Davenport: chat sessions and orders.
//!
//! Both stores sit behind traits so handlers and the chat engine never touch
//! the concrete containers; the memory implementations centralize all
//! mutation behind RwLocks. Nothing here is durable — state lives for the
//! process lifetime and vanishes on restart.

pub mod orders;
pub mod session;

pub use orders::{MemoryOrderStore, OrderStore};
pub use session::{MemorySessionStore, SessionStore};
