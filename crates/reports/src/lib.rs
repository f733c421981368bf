//! Canned reports over store rows.
//!
//! Each report is a pure evaluation of rows the store hands over; the SQL
//! lives in `dawa-store`, the filtering/formatting lives here.

pub mod daily;
pub mod expiry;
pub mod low_stock;

pub use daily::DailySales;
pub use expiry::{ExpiryReport, ExpiryRow};
pub use low_stock::{LowStockReport, StockRow};
