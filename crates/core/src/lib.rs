//! `dawa-core` — shared domain primitives.
//!
//! This crate contains **pure domain** building blocks (no storage, no IO):
//! the domain error model and money handling for KES amounts.

pub mod error;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use money::Money;
