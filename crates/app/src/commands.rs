//! `/`-prefixed POS commands over the store.
//!
//! Expected operator mistakes (bad arguments, unknown ids, refused sales)
//! come back as reply strings; only unexpected store failures propagate.

use chrono::NaiveDate;

use dawa_catalog::{
    DosageForm, LOW_STOCK_THRESHOLD, Medicine, MedicineId, NEAR_EXPIRY_DAYS, NewMedicine,
    SalePolicy, UnitType,
};
use dawa_core::Money;
use dawa_purchasing::PurchaseReceipt;
use dawa_reports::{ExpiryReport, LowStockReport, daily::render_daily_sales};
use dawa_sales::{Dosage, PreparedSale, prepare_dosage_sale, prepare_quick_sale};
use dawa_store::{PharmacyStore, StoreError};

pub const COMMANDS: &str = "\
Commands:
  /add <name> <buy> <sell> [strength] [rx]   register a medicine (prices in KES; rx = prescription-only)
  /purchase <id> <qty>                       receive stock
  /sell <id> <qty>                           quick sale
  /dose <id> <dose> <times-per-day> <days>   prescription dosage sale
  /low-stock   low stock alerts
  /expiry      medicines nearing expiry
  /sales       daily sales totals
  /receipt     latest sale receipt
  /quit        exit
Anything else is sent to the assistant.";

/// Dispatch a `/`-prefixed command. `Ok(None)` means the input is not a
/// command and should go to the assistant instead.
pub async fn dispatch(
    store: &PharmacyStore,
    input: &str,
    today: NaiveDate,
) -> anyhow::Result<Option<String>> {
    let mut parts = input.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(None);
    };
    if !command.starts_with('/') {
        return Ok(None);
    }
    let args: Vec<&str> = parts.collect();

    let reply = match command {
        "/help" => COMMANDS.to_string(),
        "/add" => add_medicine(store, &args).await?,
        "/purchase" => receive_stock(store, &args).await?,
        "/sell" => quick_sale(store, &args, today).await?,
        "/dose" => dosage_sale(store, &args, today).await?,
        "/low-stock" => {
            let rows = store.low_stock_rows(LOW_STOCK_THRESHOLD).await?;
            LowStockReport::new(LOW_STOCK_THRESHOLD, rows).to_string()
        }
        "/expiry" => {
            let rows = store.expiry_rows().await?;
            ExpiryReport::evaluate(rows, today, NEAR_EXPIRY_DAYS).to_string()
        }
        "/sales" => render_daily_sales(&store.daily_sales().await?),
        "/receipt" => match store.latest_receipt().await? {
            Some(receipt) => receipt.to_string(),
            None => "No sales yet.".to_string(),
        },
        other => format!("Unknown command {other}. Type /help."),
    };
    Ok(Some(reply))
}

async fn add_medicine(store: &PharmacyStore, args: &[&str]) -> anyhow::Result<String> {
    let [name, buy, sell, rest @ ..] = args else {
        return Ok("Usage: /add <name> <buy-price> <sell-price> [strength] [rx]".to_string());
    };
    let (Ok(buy), Ok(sell)) = (buy.parse::<i64>(), sell.parse::<i64>()) else {
        return Ok("Prices must be whole shillings.".to_string());
    };

    let mut rest = rest.to_vec();
    let sale_policy = if rest.last() == Some(&"rx") {
        rest.pop();
        SalePolicy::Prescription
    } else {
        SalePolicy::Otc
    };
    let strength = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };

    let input = NewMedicine {
        barcode: None,
        name: name.to_string(),
        batch_no: None,
        strength,
        form: DosageForm::Tablet,
        unit_type: UnitType::Tablet,
        units_per_pack: None,
        expiry_date: None,
        buy_price: Money::from_shillings(buy),
        sell_price: Money::from_shillings(sell),
        sale_policy,
    };
    match store.add_medicine(&input).await {
        Ok(id) => Ok(format!(
            "Added {name} with id {id}. Stock starts at 0; use /purchase to receive units."
        )),
        Err(StoreError::Domain(err)) => Ok(format!("Cannot add medicine: {err}")),
        Err(err) => Err(err.into()),
    }
}

async fn receive_stock(store: &PharmacyStore, args: &[&str]) -> anyhow::Result<String> {
    let [id, quantity] = args else {
        return Ok("Usage: /purchase <medicine-id> <quantity>".to_string());
    };
    let (Ok(id), Ok(quantity)) = (id.parse::<i64>(), quantity.parse::<i64>()) else {
        return Ok("Medicine id and quantity must be whole numbers.".to_string());
    };
    let medicine = match medicine_or_message(store, id).await? {
        Ok(medicine) => medicine,
        Err(message) => return Ok(message),
    };

    let receipt = PurchaseReceipt {
        medicine_id: medicine.id,
        quantity,
        buy_price: medicine.buy_price,
        supplier: None,
        expiry_date: None,
    };
    match store.record_purchase(&receipt).await {
        Ok(_) => Ok(format!(
            "Received {quantity} units of {}. Stock is now {}.",
            medicine.label(),
            medicine.units_in_stock + quantity
        )),
        Err(StoreError::Domain(err)) => Ok(format!("Cannot record purchase: {err}")),
        Err(err) => Err(err.into()),
    }
}

async fn quick_sale(
    store: &PharmacyStore,
    args: &[&str],
    today: NaiveDate,
) -> anyhow::Result<String> {
    let [id, quantity] = args else {
        return Ok("Usage: /sell <medicine-id> <quantity>".to_string());
    };
    let (Ok(id), Ok(quantity)) = (id.parse::<i64>(), quantity.parse::<i64>()) else {
        return Ok("Medicine id and quantity must be whole numbers.".to_string());
    };
    let medicine = match medicine_or_message(store, id).await? {
        Ok(medicine) => medicine,
        Err(message) => return Ok(message),
    };

    match prepare_quick_sale(&medicine, quantity, today) {
        Ok(sale) => record_and_confirm(store, &medicine, sale).await,
        Err(err) => Ok(format!("Sale refused: {err}")),
    }
}

async fn dosage_sale(
    store: &PharmacyStore,
    args: &[&str],
    today: NaiveDate,
) -> anyhow::Result<String> {
    let [id, dose, times_per_day, days] = args else {
        return Ok("Usage: /dose <medicine-id> <dose> <times-per-day> <days>".to_string());
    };
    let (Ok(id), Ok(dose), Ok(times_per_day), Ok(days)) = (
        id.parse::<i64>(),
        dose.parse::<i64>(),
        times_per_day.parse::<i64>(),
        days.parse::<i64>(),
    ) else {
        return Ok("All dosage arguments must be whole numbers.".to_string());
    };
    let medicine = match medicine_or_message(store, id).await? {
        Ok(medicine) => medicine,
        Err(message) => return Ok(message),
    };

    let dosage = Dosage { dose, times_per_day, days };
    match prepare_dosage_sale(&medicine, dosage, today) {
        Ok(sale) => record_and_confirm(store, &medicine, sale).await,
        Err(err) => Ok(format!("Sale refused: {err}")),
    }
}

async fn record_and_confirm(
    store: &PharmacyStore,
    medicine: &Medicine,
    sale: PreparedSale,
) -> anyhow::Result<String> {
    let warnings = sale.warnings.clone();
    let sale_id = match store.record_sale(&sale).await {
        Ok(id) => id,
        Err(StoreError::Domain(err)) => return Ok(format!("Sale refused: {err}")),
        Err(err) => return Err(err.into()),
    };
    let mut reply = format!(
        "Sale {sale_id}: {} x {} for {}.",
        sale.units,
        medicine.label(),
        sale.total
    );
    for warning in warnings {
        reply.push_str(&format!("\nNote: {}", warning.message()));
    }
    Ok(reply)
}

async fn medicine_or_message(
    store: &PharmacyStore,
    id: i64,
) -> anyhow::Result<Result<Medicine, String>> {
    match store.get_medicine(MedicineId(id)).await {
        Ok(medicine) => Ok(Ok(medicine)),
        Err(StoreError::MedicineNotFound(id)) => Ok(Err(format!("No medicine with id {id}."))),
        Err(err) => Err(err.into()),
    }
}
