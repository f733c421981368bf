use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use dawa_catalog::parse_expiry_date;

/// A medicine row with a recorded expiry, as returned by the store
/// (`expiry_date` may still be unparseable text from legacy rows).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryRow {
    pub name: String,
    pub strength: Option<String>,
    pub expiry_date: String,
    pub units_in_stock: i64,
}

/// Near-expiry alert report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryReport {
    pub window_days: i64,
    pub rows: Vec<ExpiryRow>,
}

impl ExpiryReport {
    /// Keep rows whose expiry parses and falls on or before
    /// `today + window_days`. Unparseable rows are dropped silently;
    /// the input row order is preserved.
    pub fn evaluate(rows: Vec<ExpiryRow>, today: NaiveDate, window_days: i64) -> Self {
        let window_end = today
            .checked_add_days(Days::new(window_days.max(0) as u64))
            .unwrap_or(NaiveDate::MAX);
        let rows = rows
            .into_iter()
            .filter(|row| {
                parse_expiry_date(&row.expiry_date).is_some_and(|date| date <= window_end)
            })
            .collect();
        Self { window_days, rows }
    }

    pub fn none_expiring(&self) -> bool {
        self.rows.is_empty()
    }
}

impl core::fmt::Display for ExpiryReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.none_expiring() {
            return write!(f, "No medicines near expiry.");
        }
        write!(f, "Medicines expiring within {} days:", self.window_days)?;
        for row in &self.rows {
            write!(
                f,
                "\n  {} (expiry {}, {} in stock)",
                row.name, row.expiry_date, row.units_in_stock
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    fn row(name: &str, expiry: &str) -> ExpiryRow {
        ExpiryRow {
            name: name.to_string(),
            strength: None,
            expiry_date: expiry.to_string(),
            units_in_stock: 10,
        }
    }

    #[test]
    fn keeps_window_rows_drops_later_and_junk() {
        let report = ExpiryReport::evaluate(
            vec![
                row("Panadol", "2024-01-20"),
                row("Amoxil", "2025-01-01"),
                row("Brufen", "not-a-date"),
            ],
            day("2024-01-01"),
            30,
        );
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].name, "Panadol");
    }

    #[test]
    fn already_expired_rows_are_still_reported() {
        let report = ExpiryReport::evaluate(vec![row("Old", "2023-06-01")], day("2024-01-01"), 30);
        assert_eq!(report.rows.len(), 1);
    }

    #[test]
    fn empty_report_renders_the_fixed_message() {
        let report = ExpiryReport::evaluate(Vec::new(), day("2024-01-01"), 30);
        assert!(report.none_expiring());
        assert_eq!(report.to_string(), "No medicines near expiry.");
    }
}
