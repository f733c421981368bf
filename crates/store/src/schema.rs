//! Schema setup.
//!
//! Base tables are `CREATE TABLE IF NOT EXISTS`; columns added after the
//! first release (`batch_no`, `barcode`) are bolted on by inspecting
//! `PRAGMA table_info`, so databases written by any prior version open
//! cleanly.

use sqlx::Row;

use crate::{PharmacyStore, StoreResult};

impl PharmacyStore {
    pub(crate) async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS medicines (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                name           TEXT NOT NULL,
                strength       TEXT,
                form           TEXT NOT NULL DEFAULT 'Other',
                unit_type      TEXT NOT NULL DEFAULT 'tablet',
                units_per_pack INTEGER,
                units_in_stock INTEGER NOT NULL DEFAULT 0,
                expiry_date    TEXT,
                buy_price      INTEGER NOT NULL DEFAULT 0,
                sell_price     INTEGER NOT NULL DEFAULT 0,
                sale_policy    TEXT NOT NULL DEFAULT 'OTC'
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        for (column, column_type) in [("batch_no", "TEXT"), ("barcode", "TEXT")] {
            self.ensure_column("medicines", column, column_type).await?;
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sales (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                medicine_id INTEGER NOT NULL,
                quantity    INTEGER NOT NULL,
                sale_type   TEXT NOT NULL,
                total_price INTEGER NOT NULL,
                sale_date   TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS purchases (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                medicine_id   INTEGER NOT NULL,
                quantity      INTEGER NOT NULL,
                buy_price     INTEGER NOT NULL,
                supplier      TEXT,
                expiry_date   TEXT,
                purchase_date TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn column_exists(&self, table: &str, column: &str) -> StoreResult<bool> {
        // Table names here are compile-time constants; PRAGMA takes no binds.
        let rows = sqlx::query(&format!("PRAGMA table_info({table})"))
            .fetch_all(self.pool())
            .await?;
        Ok(rows
            .iter()
            .any(|row| row.get::<String, _>("name") == column))
    }

    async fn ensure_column(&self, table: &str, column: &str, column_type: &str) -> StoreResult<()> {
        if self.column_exists(table, column).await? {
            return Ok(());
        }
        tracing::info!(table, column, "adding missing column");
        sqlx::query(&format!("ALTER TABLE {table} ADD COLUMN {column} {column_type}"))
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
