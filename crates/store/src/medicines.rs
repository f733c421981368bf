//! Medicine catalog queries.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use dawa_catalog::{DosageForm, Medicine, MedicineId, NewMedicine, SalePolicy, UnitType};
use dawa_core::Money;

use crate::{PharmacyStore, StoreError, StoreResult};

const MEDICINE_COLUMNS: &str = "id, barcode, name, batch_no, strength, form, unit_type, \
     units_per_pack, units_in_stock, expiry_date, buy_price, sell_price, sale_policy";

pub(crate) fn medicine_from_row(row: &SqliteRow) -> StoreResult<Medicine> {
    let form: String = row.try_get("form")?;
    let unit_type: String = row.try_get("unit_type")?;
    let sale_policy: String = row.try_get("sale_policy")?;
    Ok(Medicine {
        id: MedicineId(row.try_get("id")?),
        barcode: row.try_get("barcode")?,
        name: row.try_get("name")?,
        batch_no: row.try_get("batch_no")?,
        strength: row.try_get("strength")?,
        form: form.parse::<DosageForm>()?,
        unit_type: unit_type.parse::<UnitType>()?,
        units_per_pack: row.try_get("units_per_pack")?,
        units_in_stock: row.try_get("units_in_stock")?,
        expiry_date: row.try_get("expiry_date")?,
        buy_price: Money::from_cents(row.try_get("buy_price")?),
        sell_price: Money::from_cents(row.try_get("sell_price")?),
        sale_policy: sale_policy.parse::<SalePolicy>()?,
    })
}

impl PharmacyStore {
    /// Register a new medicine. Stock starts at zero.
    pub async fn add_medicine(&self, input: &NewMedicine) -> StoreResult<MedicineId> {
        input.validate()?;
        let result = sqlx::query(
            r#"
            INSERT INTO medicines
                (barcode, name, batch_no, strength, form, unit_type,
                 units_per_pack, units_in_stock, expiry_date,
                 buy_price, sell_price, sale_policy)
            VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.barcode)
        .bind(&input.name)
        .bind(&input.batch_no)
        .bind(&input.strength)
        .bind(input.form.as_str())
        .bind(input.unit_type.as_str())
        .bind(input.units_per_pack)
        .bind(&input.expiry_date)
        .bind(input.buy_price.cents())
        .bind(input.sell_price.cents())
        .bind(input.sale_policy.as_str())
        .execute(self.pool())
        .await?;
        Ok(MedicineId(result.last_insert_rowid()))
    }

    pub async fn get_medicine(&self, id: MedicineId) -> StoreResult<Medicine> {
        let row = sqlx::query(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines WHERE id = ?"
        ))
        .bind(id.0)
        .fetch_optional(self.pool())
        .await?
        .ok_or(StoreError::MedicineNotFound(id))?;
        medicine_from_row(&row)
    }

    /// Full catalog, alphabetical.
    pub async fn list_medicines(&self) -> StoreResult<Vec<Medicine>> {
        let rows = sqlx::query(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines ORDER BY name"
        ))
        .fetch_all(self.pool())
        .await?;
        rows.iter().map(medicine_from_row).collect()
    }

    /// Exact barcode hit, if any. Used by the scanner path before the
    /// manual-search fallback.
    pub async fn find_by_barcode(&self, barcode: &str) -> StoreResult<Option<Medicine>> {
        let row = sqlx::query(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines WHERE barcode = ?"
        ))
        .bind(barcode)
        .fetch_optional(self.pool())
        .await?;
        row.as_ref().map(medicine_from_row).transpose()
    }

    /// Whether a barcode is already registered; the add-medicine screen
    /// warns on duplicates but does not refuse them.
    pub async fn barcode_exists(&self, barcode: &str) -> StoreResult<bool> {
        let row = sqlx::query("SELECT id FROM medicines WHERE barcode = ?")
            .bind(barcode)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.is_some())
    }

    /// POS search: exact barcode, or substring on name/strength.
    pub async fn search_for_sale(&self, term: &str) -> StoreResult<Vec<Medicine>> {
        let pattern = format!("%{term}%");
        let rows = sqlx::query(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines \
             WHERE barcode = ? OR name LIKE ? OR strength LIKE ? \
             ORDER BY name"
        ))
        .bind(term)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.pool())
        .await?;
        rows.iter().map(medicine_from_row).collect()
    }

    /// Prescription-only medicines, for the dosage-sale flow.
    pub async fn list_prescription_medicines(&self) -> StoreResult<Vec<Medicine>> {
        let rows = sqlx::query(&format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicines \
             WHERE sale_policy = 'PRESCRIPTION' ORDER BY name"
        ))
        .fetch_all(self.pool())
        .await?;
        rows.iter().map(medicine_from_row).collect()
    }
}
