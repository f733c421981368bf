//! `dawa-assistant`
//!
//! **Responsibility:** the rule-based pharmacy assistant — intent
//! classification over normalized query text and read-only query
//! resolution with fuzzy name suggestion.
//!
//! This crate is deliberately a boundary, not part of the POS domain:
//! - It never mutates store state; it consumes a read-only [`AssistantStore`].
//! - It emits human-readable replies, not domain values.
//! - Every branch terminates in a producible string; "no result" is a
//!   message, never an error. Only store failures propagate.

pub mod engine;
pub mod fuzzy;
pub mod intent;
pub mod transcript;

pub use engine::{
    Assistant, AssistantConfig, AssistantStore, ExpiryRow, LowStockRow, MedicineHit,
};
pub use fuzzy::{best_match, similarity};
pub use intent::{QueryIntent, classify, normalize};
pub use transcript::{Role, Transcript, Turn};
