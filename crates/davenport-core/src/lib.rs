//! Core crate for Davenport — shared types, configuration, and errors.
//!
//! Every other crate in the workspace builds on the domain model defined
//! here: chat messages and sessions, orders with their status lifecycle,
//! the static product catalog, and the seed data used to populate the
//! retrieval corpus at startup.

pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use config::DavenportConfig;
pub use error::{DavenportError, Result};
pub use types::{
    CustomerProfile, Message, MessageOption, Order, OrderAction, OrderDraft, OrderItem,
    OrderStatus, PendingInput, Product, Sender,
};
