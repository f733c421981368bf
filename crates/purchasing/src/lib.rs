//! Purchasing domain module (stock-in).
//!
//! Validates a goods-in receipt before `dawa-store` records it; recording
//! inserts the purchase row and increments stock in one transaction.

pub mod goods_in;

pub use goods_in::PurchaseReceipt;
