//! Sales domain module.
//!
//! Pure sale-preparation logic for the two POS flows (quick OTC sale and
//! prescription dosage sale) plus receipt rendering. Recording a prepared
//! sale — the insert and the stock decrement — belongs to `dawa-store`.

pub mod receipt;
pub mod sale;

pub use receipt::Receipt;
pub use sale::{
    Dosage, PreparedSale, SaleType, SaleWarning, prepare_dosage_sale, prepare_quick_sale,
};
