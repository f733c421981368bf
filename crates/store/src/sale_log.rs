//! Sale recording and sales queries.

use chrono::{NaiveDate, Utc};
use sqlx::Row;

use dawa_core::{DomainError, Money};
use dawa_reports::{DailySales, ExpiryRow, StockRow};
use dawa_sales::{PreparedSale, Receipt, SaleType};

use crate::{PharmacyStore, StoreResult};

impl PharmacyStore {
    /// Record a prepared sale: decrement stock and insert the sale row in
    /// one transaction. The decrement re-checks stock at write time, so a
    /// concurrent sale cannot drive the count negative.
    pub async fn record_sale(&self, sale: &PreparedSale) -> StoreResult<i64> {
        let mut tx = self.pool().begin().await?;

        let updated = sqlx::query(
            "UPDATE medicines SET units_in_stock = units_in_stock - ? \
             WHERE id = ? AND units_in_stock >= ?",
        )
        .bind(sale.units)
        .bind(sale.medicine_id.0)
        .bind(sale.units)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Err(DomainError::invariant("not enough stock").into());
        }

        let result = sqlx::query(
            r#"
            INSERT INTO sales (medicine_id, quantity, sale_type, total_price, sale_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(sale.medicine_id.0)
        .bind(sale.units)
        .bind(sale.sale_type.as_str())
        .bind(sale.total.cents())
        .bind(Utc::now().format("%Y-%m-%d %H:%M:%S").to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        let sale_id = result.last_insert_rowid();
        tracing::info!(
            sale_id,
            medicine_id = sale.medicine_id.0,
            units = sale.units,
            total = %sale.total,
            "sale recorded"
        );
        Ok(sale_id)
    }

    /// The most recent sale, joined with its medicine, for the receipt
    /// screen. `None` when nothing has been sold yet.
    pub async fn latest_receipt(&self) -> StoreResult<Option<Receipt>> {
        let row = sqlx::query(
            r#"
            SELECT s.id, m.name, m.strength, s.quantity, s.sale_type, s.total_price, s.sale_date
            FROM sales s
            JOIN medicines m ON s.medicine_id = m.id
            ORDER BY s.id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool())
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let name: String = row.try_get("name")?;
        let strength: Option<String> = row.try_get("strength")?;
        let sale_type: String = row.try_get("sale_type")?;
        Ok(Some(Receipt {
            sale_id: row.try_get("id")?,
            medicine: match strength {
                Some(s) if !s.is_empty() => format!("{name} {s}"),
                _ => name,
            },
            quantity: row.try_get("quantity")?,
            sale_type: sale_type.parse::<SaleType>()?,
            total: Money::from_cents(row.try_get("total_price")?),
            sold_at: row.try_get("sale_date")?,
        }))
    }

    /// Per-day transaction counts and totals, newest day first.
    pub async fn daily_sales(&self) -> StoreResult<Vec<DailySales>> {
        let rows = sqlx::query(
            r#"
            SELECT substr(sale_date, 1, 10) AS day,
                   COUNT(*) AS transactions,
                   COALESCE(SUM(total_price), 0) AS total
            FROM sales
            GROUP BY day
            ORDER BY day DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;
        rows.iter()
            .map(|row| {
                Ok(DailySales {
                    date: row.try_get("day")?,
                    transactions: row.try_get("transactions")?,
                    total: Money::from_cents(row.try_get("total")?),
                })
            })
            .collect()
    }

    /// Total sold on one calendar day; zero when there are no rows.
    /// String-prefix match on the ISO date, per the stored text format.
    pub async fn sales_total_for(&self, date: NaiveDate) -> StoreResult<Money> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(total_price), 0) AS total FROM sales WHERE sale_date LIKE ?",
        )
        .bind(format!("{}%", date.format("%Y-%m-%d")))
        .fetch_one(self.pool())
        .await?;
        Ok(Money::from_cents(row.try_get("total")?))
    }

    /// Rows at or below the low-stock threshold, lowest first.
    pub async fn low_stock_rows(&self, threshold: i64) -> StoreResult<Vec<StockRow>> {
        let rows = sqlx::query(
            "SELECT name, strength, units_in_stock FROM medicines \
             WHERE units_in_stock <= ? ORDER BY units_in_stock ASC",
        )
        .bind(threshold)
        .fetch_all(self.pool())
        .await?;
        rows.iter()
            .map(|row| {
                Ok(StockRow {
                    name: row.try_get("name")?,
                    strength: row.try_get("strength")?,
                    units_in_stock: row.try_get("units_in_stock")?,
                })
            })
            .collect()
    }

    /// Every medicine with a recorded expiry, raw text included; the
    /// caller decides what parses and what falls in the window.
    pub async fn expiry_rows(&self) -> StoreResult<Vec<ExpiryRow>> {
        let rows = sqlx::query(
            "SELECT name, strength, expiry_date, units_in_stock FROM medicines \
             WHERE expiry_date IS NOT NULL",
        )
        .fetch_all(self.pool())
        .await?;
        rows.iter()
            .map(|row| {
                Ok(ExpiryRow {
                    name: row.try_get("name")?,
                    strength: row.try_get("strength")?,
                    expiry_date: row.try_get("expiry_date")?,
                    units_in_stock: row.try_get("units_in_stock")?,
                })
            })
            .collect()
    }
}
