//! The assistant's read-only view of the store.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Row;

use dawa_assistant::{AssistantStore, ExpiryRow, LowStockRow, MedicineHit};
use dawa_core::Money;

use crate::PharmacyStore;

#[async_trait]
impl AssistantStore for PharmacyStore {
    async fn list_all_medicine_names(&self) -> anyhow::Result<Vec<String>> {
        let rows = sqlx::query("SELECT name FROM medicines")
            .fetch_all(self.pool())
            .await?;
        Ok(rows
            .iter()
            .map(|row| row.try_get("name"))
            .collect::<Result<_, _>>()?)
    }

    async fn search_medicines(&self, term: &str) -> anyhow::Result<Vec<MedicineHit>> {
        // SQLite LIKE is already case-insensitive for ASCII.
        let pattern = format!("%{term}%");
        let rows = sqlx::query(
            "SELECT name, strength, units_in_stock, expiry_date, batch_no \
             FROM medicines WHERE name LIKE ? OR batch_no LIKE ?",
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.pool())
        .await?;
        rows.iter()
            .map(|row| {
                Ok(MedicineHit {
                    name: row.try_get("name")?,
                    strength: row.try_get("strength")?,
                    units_in_stock: row.try_get("units_in_stock")?,
                    expiry_date: row.try_get("expiry_date")?,
                    batch_no: row.try_get("batch_no")?,
                })
            })
            .collect()
    }

    async fn list_low_stock(&self, threshold: i64) -> anyhow::Result<Vec<LowStockRow>> {
        let rows = self.low_stock_rows(threshold).await?;
        Ok(rows
            .into_iter()
            .map(|row| LowStockRow {
                name: row.name,
                units_in_stock: row.units_in_stock,
            })
            .collect())
    }

    async fn sum_sales_for_date(&self, date: NaiveDate) -> anyhow::Result<Money> {
        Ok(self.sales_total_for(date).await?)
    }

    async fn list_medicines_with_expiry(&self) -> anyhow::Result<Vec<ExpiryRow>> {
        let rows = self.expiry_rows().await?;
        Ok(rows
            .into_iter()
            .map(|row| ExpiryRow {
                name: row.name,
                expiry_date: row.expiry_date,
            })
            .collect())
    }
}
