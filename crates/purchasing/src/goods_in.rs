use serde::{Deserialize, Serialize};

use dawa_catalog::{MedicineId, parse_expiry_date};
use dawa_core::{DomainError, DomainResult, Money};

/// A stock-in receipt: quantity received for one medicine, at a buy price,
/// optionally with supplier and batch expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub medicine_id: MedicineId,
    pub quantity: i64,
    pub buy_price: Money,
    pub supplier: Option<String>,
    pub expiry_date: Option<String>,
}

impl PurchaseReceipt {
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity < 1 {
            return Err(DomainError::validation("quantity received must be at least 1"));
        }
        if self.buy_price < Money::ZERO {
            return Err(DomainError::validation("buy price cannot be negative"));
        }
        // Expiry is optional, but when present it must be a real date:
        // unlike legacy rows already in the store, new input is checked.
        if let Some(text) = &self.expiry_date {
            if parse_expiry_date(text).is_none() {
                return Err(DomainError::validation(format!(
                    "expiry date must be YYYY-MM-DD, got {text:?}"
                )));
            }
        }
        Ok(())
    }

    /// Stock delta applied when the receipt is recorded.
    pub fn stock_delta(&self) -> i64 {
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(quantity: i64) -> PurchaseReceipt {
        PurchaseReceipt {
            medicine_id: MedicineId(3),
            quantity,
            buy_price: Money::from_shillings(4),
            supplier: Some("Kampala Wholesalers".to_string()),
            expiry_date: Some("2026-02-01".to_string()),
        }
    }

    #[test]
    fn accepts_a_valid_receipt() {
        assert!(receipt(100).validate().is_ok());
        assert_eq!(receipt(100).stock_delta(), 100);
    }

    #[test]
    fn rejects_zero_quantity() {
        assert!(receipt(0).validate().is_err());
    }

    #[test]
    fn rejects_malformed_expiry_on_new_input() {
        let mut bad = receipt(10);
        bad.expiry_date = Some("02/2026".to_string());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn expiry_is_optional() {
        let mut open_dated = receipt(10);
        open_dated.expiry_date = None;
        assert!(open_dated.validate().is_ok());
    }
}
