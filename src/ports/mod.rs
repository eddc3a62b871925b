//! Port interfaces at the system seams.
//!
//! Adapters implement these traits against the real external services;
//! tests substitute mocks.

pub mod history_store;
pub mod text_generation;

pub use history_store::{HistoryStore, StoreError};
pub use text_generation::{GenerationError, TextGenerator};
