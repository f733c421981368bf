use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dawa_catalog::{
    ExpiryStatus, LOW_STOCK_THRESHOLD, Medicine, MedicineId, NEAR_EXPIRY_DAYS, SalePolicy,
};
use dawa_core::{DomainError, DomainResult, Money};

/// Which POS flow produced a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleType {
    Quick,
    Dosage,
}

impl SaleType {
    pub fn as_str(self) -> &'static str {
        match self {
            SaleType::Quick => "QUICK",
            SaleType::Dosage => "DOSAGE",
        }
    }
}

impl core::str::FromStr for SaleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUICK" => Ok(SaleType::Quick),
            "DOSAGE" => Ok(SaleType::Dosage),
            other => Err(DomainError::validation(format!("unknown sale type: {other}"))),
        }
    }
}

/// Non-blocking conditions the cashier must be told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleWarning {
    NearExpiry,
    LowStock,
    PrescriptionRequired,
}

impl SaleWarning {
    pub fn message(self) -> &'static str {
        match self {
            SaleWarning::NearExpiry => "near expiry (within 30 days)",
            SaleWarning::LowStock => "low stock warning",
            SaleWarning::PrescriptionRequired => "prescription-only medicine; confirm prescription",
        }
    }
}

/// A prescription dosage: dose per intake, intakes per day, day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dosage {
    pub dose: i64,
    pub times_per_day: i64,
    pub days: i64,
}

impl Dosage {
    /// Total units to dispense: dose x frequency x days.
    pub fn total_units(self) -> DomainResult<i64> {
        if self.dose < 1 || self.times_per_day < 1 || self.days < 1 {
            return Err(DomainError::validation(
                "dose, frequency and days must each be at least 1",
            ));
        }
        self.dose
            .checked_mul(self.times_per_day)
            .and_then(|units| units.checked_mul(self.days))
            .ok_or_else(|| DomainError::invariant("dosage unit count overflowed"))
    }
}

/// A sale that passed every guard and is ready to record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedSale {
    pub medicine_id: MedicineId,
    pub sale_type: SaleType,
    pub units: i64,
    pub total: Money,
    pub warnings: Vec<SaleWarning>,
}

/// Quick (OTC) sale of `quantity` units.
pub fn prepare_quick_sale(
    medicine: &Medicine,
    quantity: i64,
    today: NaiveDate,
) -> DomainResult<PreparedSale> {
    prepare(medicine, SaleType::Quick, quantity, today)
}

/// Prescription dosage sale; units come from the dosage arithmetic.
pub fn prepare_dosage_sale(
    medicine: &Medicine,
    dosage: Dosage,
    today: NaiveDate,
) -> DomainResult<PreparedSale> {
    if medicine.sale_policy != SalePolicy::Prescription {
        return Err(DomainError::validation(
            "dosage sale applies to prescription medicines only",
        ));
    }
    prepare(medicine, SaleType::Dosage, dosage.total_units()?, today)
}

fn prepare(
    medicine: &Medicine,
    sale_type: SaleType,
    units: i64,
    today: NaiveDate,
) -> DomainResult<PreparedSale> {
    if units < 1 {
        return Err(DomainError::validation("quantity must be at least 1"));
    }

    let expiry = ExpiryStatus::evaluate(medicine.expiry_date.as_deref(), today, NEAR_EXPIRY_DAYS);
    if expiry.is_expired() {
        return Err(DomainError::sale_blocked("expired medicine"));
    }
    if medicine.units_in_stock <= 0 {
        return Err(DomainError::sale_blocked("out of stock"));
    }
    if units > medicine.units_in_stock {
        return Err(DomainError::invariant("not enough stock"));
    }

    let mut warnings = Vec::new();
    if expiry == ExpiryStatus::NearExpiry {
        warnings.push(SaleWarning::NearExpiry);
    }
    if medicine.units_in_stock <= LOW_STOCK_THRESHOLD {
        warnings.push(SaleWarning::LowStock);
    }
    if medicine.sale_policy == SalePolicy::Prescription {
        warnings.push(SaleWarning::PrescriptionRequired);
    }

    Ok(PreparedSale {
        medicine_id: medicine.id,
        sale_type,
        units,
        total: medicine.sell_price.checked_mul(units)?,
        warnings,
    })
}
