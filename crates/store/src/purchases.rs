//! Purchase (stock-in) recording.

use chrono::Utc;

use dawa_purchasing::PurchaseReceipt;

use crate::{PharmacyStore, StoreError, StoreResult};

impl PharmacyStore {
    /// Record a goods-in receipt: insert the purchase row and increment
    /// the medicine's stock in one transaction.
    pub async fn record_purchase(&self, receipt: &PurchaseReceipt) -> StoreResult<i64> {
        receipt.validate()?;

        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO purchases
                (medicine_id, quantity, buy_price, supplier, expiry_date, purchase_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(receipt.medicine_id.0)
        .bind(receipt.quantity)
        .bind(receipt.buy_price.cents())
        .bind(&receipt.supplier)
        .bind(&receipt.expiry_date)
        .bind(Utc::now().format("%Y-%m-%d %H:%M:%S").to_string())
        .execute(&mut *tx)
        .await?;
        let purchase_id = result.last_insert_rowid();

        let updated = sqlx::query(
            "UPDATE medicines SET units_in_stock = units_in_stock + ? WHERE id = ?",
        )
        .bind(receipt.stock_delta())
        .bind(receipt.medicine_id.0)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls the insert back.
            return Err(StoreError::MedicineNotFound(receipt.medicine_id));
        }

        tx.commit().await?;
        tracing::info!(
            purchase_id,
            medicine_id = receipt.medicine_id.0,
            quantity = receipt.quantity,
            "purchase recorded"
        );
        Ok(purchase_id)
    }
}
