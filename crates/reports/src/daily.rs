use serde::{Deserialize, Serialize};

use dawa_core::Money;

/// One day of sales, newest first in the store's query order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    /// Calendar day as `YYYY-MM-DD`.
    pub date: String,
    pub transactions: i64,
    pub total: Money,
}

/// Render the daily totals as a small fixed-width table.
pub fn render_daily_sales(rows: &[DailySales]) -> String {
    if rows.is_empty() {
        return "No sales records found.".to_string();
    }
    let mut out = String::from("Date        Transactions  Total");
    for row in rows {
        out.push_str(&format!(
            "\n{}  {:>12}  {}",
            row.date, row.transactions, row.total
        ));
    }
    out
}
