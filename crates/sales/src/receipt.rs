//! Plain-text receipt for the most recent sale.

use serde::{Deserialize, Serialize};

use dawa_core::Money;

use crate::sale::SaleType;

/// Everything the printed receipt needs, joined from a sale row and its
/// medicine row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub sale_id: i64,
    pub medicine: String,
    pub quantity: i64,
    pub sale_type: SaleType,
    pub total: Money,
    pub sold_at: String,
}

impl core::fmt::Display for Receipt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "DAWA PHARMACY RECEIPT")?;
        writeln!(f, "--------------------------")?;
        writeln!(f, "Medicine: {}", self.medicine)?;
        writeln!(f, "Quantity: {}", self.quantity)?;
        writeln!(f, "Sale Type: {}", self.sale_type.as_str())?;
        writeln!(f, "--------------------------")?;
        writeln!(f, "TOTAL: {}", self.total)?;
        writeln!(f, "Date: {}", self.sold_at)?;
        writeln!(f, "--------------------------")?;
        write!(f, "Thank you!")
    }
}
