//! Medicine catalog domain module.
//!
//! This crate contains the business rules for the medicine catalog,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod expiry;
pub mod medicine;

pub use expiry::{ExpiryStatus, parse_expiry_date};
pub use medicine::{
    DosageForm, Medicine, MedicineId, NewMedicine, SalePolicy, UnitType,
};

/// Stock level at or below which a medicine is flagged for replenishment.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Day count defining "expiring soon".
pub const NEAR_EXPIRY_DAYS: i64 = 30;
