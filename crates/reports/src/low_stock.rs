use serde::{Deserialize, Serialize};

/// A medicine row as the low-stock query returns it (ascending by stock).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRow {
    pub name: String,
    pub strength: Option<String>,
    pub units_in_stock: i64,
}

/// Low-stock alert report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockReport {
    pub threshold: i64,
    pub rows: Vec<StockRow>,
}

impl LowStockReport {
    pub fn new(threshold: i64, rows: Vec<StockRow>) -> Self {
        Self { threshold, rows }
    }

    /// True when nothing sits at or below the threshold.
    pub fn all_healthy(&self) -> bool {
        self.rows.is_empty()
    }
}

impl core::fmt::Display for LowStockReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.all_healthy() {
            return write!(f, "All stock levels are healthy.");
        }
        write!(f, "Low stock medicines (threshold {}):", self.threshold)?;
        for row in &self.rows {
            write!(f, "\n  ")?;
            match &row.strength {
                Some(s) if !s.is_empty() => write!(f, "{} {}", row.name, s)?,
                _ => write!(f, "{}", row.name)?,
            }
            write!(f, ": {} left", row.units_in_stock)?;
        }
        Ok(())
    }
}
