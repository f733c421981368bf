use serde::{Deserialize, Serialize};

use dawa_core::{DomainError, DomainResult, Money};

/// Medicine row identifier (SQLite integer primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicineId(pub i64);

impl core::fmt::Display for MedicineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// How a medicine may be dispensed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalePolicy {
    Otc,
    Advice,
    Prescription,
}

impl SalePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            SalePolicy::Otc => "OTC",
            SalePolicy::Advice => "ADVICE",
            SalePolicy::Prescription => "PRESCRIPTION",
        }
    }
}

impl core::str::FromStr for SalePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OTC" => Ok(SalePolicy::Otc),
            "ADVICE" => Ok(SalePolicy::Advice),
            "PRESCRIPTION" => Ok(SalePolicy::Prescription),
            other => Err(DomainError::validation(format!(
                "unknown sale policy: {other}"
            ))),
        }
    }
}

/// Physical form of the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DosageForm {
    Tablet,
    Capsule,
    Syrup,
    Injection,
    Other,
}

impl DosageForm {
    pub fn as_str(self) -> &'static str {
        match self {
            DosageForm::Tablet => "Tablet",
            DosageForm::Capsule => "Capsule",
            DosageForm::Syrup => "Syrup",
            DosageForm::Injection => "Injection",
            DosageForm::Other => "Other",
        }
    }
}

impl core::str::FromStr for DosageForm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Tablet" => Ok(DosageForm::Tablet),
            "Capsule" => Ok(DosageForm::Capsule),
            "Syrup" => Ok(DosageForm::Syrup),
            "Injection" => Ok(DosageForm::Injection),
            "Other" => Ok(DosageForm::Other),
            other => Err(DomainError::validation(format!(
                "unknown dosage form: {other}"
            ))),
        }
    }
}

/// Unit in which stock is counted and sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Tablet,
    Capsule,
    Ml,
    Vial,
}

impl UnitType {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitType::Tablet => "tablet",
            UnitType::Capsule => "capsule",
            UnitType::Ml => "ml",
            UnitType::Vial => "vial",
        }
    }
}

impl core::str::FromStr for UnitType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tablet" => Ok(UnitType::Tablet),
            "capsule" => Ok(UnitType::Capsule),
            "ml" => Ok(UnitType::Ml),
            "vial" => Ok(UnitType::Vial),
            other => Err(DomainError::validation(format!("unknown unit type: {other}"))),
        }
    }
}

/// A catalog record as stored (and returned by) `dawa-store`.
///
/// `expiry_date` stays raw text: rows written by older versions of the app
/// may hold unparseable values, and those must survive loading. Parsing
/// happens at the point of use (see [`crate::expiry`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: MedicineId,
    pub barcode: Option<String>,
    pub name: String,
    pub batch_no: Option<String>,
    pub strength: Option<String>,
    pub form: DosageForm,
    pub unit_type: UnitType,
    pub units_per_pack: Option<i64>,
    pub units_in_stock: i64,
    pub expiry_date: Option<String>,
    pub buy_price: Money,
    pub sell_price: Money,
    pub sale_policy: SalePolicy,
}

impl Medicine {
    /// Display label used by the POS screens, e.g. "Panadol 500mg".
    pub fn label(&self) -> String {
        match &self.strength {
            Some(s) if !s.is_empty() => format!("{} {}", self.name, s),
            _ => self.name.clone(),
        }
    }
}

/// Input for registering a new medicine. Stock always starts at zero;
/// units arrive through purchases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMedicine {
    pub barcode: Option<String>,
    pub name: String,
    pub batch_no: Option<String>,
    pub strength: Option<String>,
    pub form: DosageForm,
    pub unit_type: UnitType,
    pub units_per_pack: Option<i64>,
    pub expiry_date: Option<String>,
    pub buy_price: Money,
    pub sell_price: Money,
    pub sale_policy: SalePolicy,
}

impl NewMedicine {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("medicine name is required"));
        }
        if matches!(self.units_per_pack, Some(upp) if upp < 1) {
            return Err(DomainError::validation("units per pack must be at least 1"));
        }
        if self.buy_price < Money::ZERO || self.sell_price < Money::ZERO {
            return Err(DomainError::validation("prices cannot be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new(name: &str) -> NewMedicine {
        NewMedicine {
            barcode: None,
            name: name.to_string(),
            batch_no: Some("B-102".to_string()),
            strength: Some("500mg".to_string()),
            form: DosageForm::Tablet,
            unit_type: UnitType::Tablet,
            units_per_pack: Some(24),
            expiry_date: Some("2026-05-01".to_string()),
            buy_price: Money::from_shillings(5),
            sell_price: Money::from_shillings(8),
            sale_policy: SalePolicy::Otc,
        }
    }

    #[test]
    fn accepts_a_complete_record() {
        assert!(sample_new("Panadol").validate().is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let err = sample_new("   ").validate().unwrap_err();
        assert_eq!(err, DomainError::validation("medicine name is required"));
    }

    #[test]
    fn rejects_zero_units_per_pack() {
        let mut input = sample_new("Amoxil");
        input.units_per_pack = Some(0);
        assert!(input.validate().is_err());
    }

    #[test]
    fn rejects_negative_prices() {
        let mut input = sample_new("Amoxil");
        input.sell_price = Money::from_cents(-1);
        assert!(input.validate().is_err());
    }

    #[test]
    fn sale_policy_round_trips_through_text() {
        for policy in [SalePolicy::Otc, SalePolicy::Advice, SalePolicy::Prescription] {
            assert_eq!(policy.as_str().parse::<SalePolicy>().unwrap(), policy);
        }
        assert!("RETAIL".parse::<SalePolicy>().is_err());
    }

    #[test]
    fn label_joins_name_and_strength() {
        let mut med = Medicine {
            id: MedicineId(1),
            barcode: None,
            name: "Panadol".to_string(),
            batch_no: None,
            strength: Some("500mg".to_string()),
            form: DosageForm::Tablet,
            unit_type: UnitType::Tablet,
            units_per_pack: None,
            units_in_stock: 0,
            expiry_date: None,
            buy_price: Money::ZERO,
            sell_price: Money::ZERO,
            sale_policy: SalePolicy::Otc,
        };
        assert_eq!(med.label(), "Panadol 500mg");
        med.strength = None;
        assert_eq!(med.label(), "Panadol");
    }
}
