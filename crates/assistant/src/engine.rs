//! Query resolution: dispatch a classified intent to a read query and
//! format the reply.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use dawa_core::Money;

use crate::fuzzy::best_match;
use crate::intent::{QueryIntent, classify};

/// A medicine row as the assistant needs it for lookup replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineHit {
    pub name: String,
    pub strength: Option<String>,
    pub units_in_stock: i64,
    pub expiry_date: Option<String>,
    pub batch_no: Option<String>,
}

/// A medicine under the low-stock threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockRow {
    pub name: String,
    pub units_in_stock: i64,
}

/// A medicine with a recorded (possibly unparseable) expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryRow {
    pub name: String,
    pub expiry_date: String,
}

/// Read-only data access the assistant depends on. `dawa-store`
/// implements this over SQLite; tests use an in-memory fake.
#[async_trait]
pub trait AssistantStore: Send + Sync {
    async fn list_all_medicine_names(&self) -> anyhow::Result<Vec<String>>;

    /// Case-insensitive substring match on name OR batch number.
    async fn search_medicines(&self, term: &str) -> anyhow::Result<Vec<MedicineHit>>;

    async fn list_low_stock(&self, threshold: i64) -> anyhow::Result<Vec<LowStockRow>>;

    /// Total of all sales on the given calendar date; zero when no rows.
    async fn sum_sales_for_date(&self, date: NaiveDate) -> anyhow::Result<Money>;

    async fn list_medicines_with_expiry(&self) -> anyhow::Result<Vec<ExpiryRow>>;
}

/// Tunables, all defaulted to the values the pharmacy runs with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub low_stock_threshold: i64,
    pub near_expiry_days: i64,
    /// Minimum similarity for a "did you mean" suggestion. The app has
    /// shipped with both 0.5 and 0.6; 0.6 is the current value.
    pub suggestion_cutoff: f64,
    /// Cap on names in the inventory listing reply.
    pub inventory_list_limit: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 10,
            near_expiry_days: 30,
            suggestion_cutoff: 0.6,
            inventory_list_limit: 30,
        }
    }
}

const NOT_FOUND_REPLY: &str = "Drug not found. Try scanning the barcode or typing the full name.";

/// The assistant engine. Stateless between calls: each query is
/// classified, resolved and formatted from scratch. Conversation history
/// is the caller's concern (see [`crate::transcript`]).
pub struct Assistant<S> {
    store: S,
    config: AssistantConfig,
}

impl<S: AssistantStore> Assistant<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, AssistantConfig::default())
    }

    pub fn with_config(store: S, config: AssistantConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Answer a query against today's date.
    ///
    /// Returns `Ok(None)` for empty or whitespace-only input: no reply is
    /// produced and the caller must not render a turn. Every non-empty
    /// query yields a reply string; only store failures error out.
    pub async fn answer(&self, query: &str) -> anyhow::Result<Option<String>> {
        self.answer_on(Utc::now().date_naive(), query).await
    }

    /// Same as [`Assistant::answer`] with an explicit "today", which keeps
    /// date-sensitive behavior testable.
    pub async fn answer_on(&self, today: NaiveDate, query: &str) -> anyhow::Result<Option<String>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let intent = classify(trimmed);
        tracing::debug!(?intent, query = trimmed, "classified assistant query");
        self.resolve(intent, trimmed, today).await.map(Some)
    }

    /// Resolve a classified intent. Public so callers that already know
    /// the intent (e.g. canned report buttons) can reuse the formatting.
    pub async fn resolve(
        &self,
        intent: QueryIntent,
        raw_query: &str,
        today: NaiveDate,
    ) -> anyhow::Result<String> {
        match intent {
            QueryIntent::Greeting => Ok(
                "Hello! Ask me about stock levels, expiries, today's sales, or any medicine by name."
                    .to_string(),
            ),
            QueryIntent::Help => Ok(help_reply()),
            QueryIntent::LowStock => self.low_stock_reply().await,
            QueryIntent::Expiry => self.expiry_reply(today).await,
            QueryIntent::SalesToday => self.sales_today_reply(today).await,
            QueryIntent::Inventory => self.inventory_reply().await,
            QueryIntent::MedicineLookup => self.lookup_reply(raw_query).await,
        }
    }

    async fn low_stock_reply(&self) -> anyhow::Result<String> {
        let rows = self
            .store
            .list_low_stock(self.config.low_stock_threshold)
            .await?;
        if rows.is_empty() {
            return Ok("All medicines are sufficiently stocked.".to_string());
        }
        let mut reply = String::from("Running low:");
        for row in rows {
            reply.push_str(&format!("\n{} → {} left", row.name, row.units_in_stock));
        }
        Ok(reply)
    }

    async fn expiry_reply(&self, today: NaiveDate) -> anyhow::Result<String> {
        let window_end = today
            .checked_add_days(Days::new(self.config.near_expiry_days.max(0) as u64))
            .unwrap_or(NaiveDate::MAX);
        let rows = self.store.list_medicines_with_expiry().await?;
        // Unparseable expiry text is skipped, never an error; the store's
        // row order is preserved.
        let expiring: Vec<ExpiryRow> = rows
            .into_iter()
            .filter(|row| {
                NaiveDate::parse_from_str(row.expiry_date.trim(), "%Y-%m-%d")
                    .is_ok_and(|date| date <= window_end)
            })
            .collect();
        if expiring.is_empty() {
            return Ok("No drugs expiring soon.".to_string());
        }
        let mut reply = String::from("Drugs expiring soon:");
        for row in expiring {
            reply.push_str(&format!("\n- {} (expiry {})", row.name, row.expiry_date));
        }
        Ok(reply)
    }

    async fn sales_today_reply(&self, today: NaiveDate) -> anyhow::Result<String> {
        let total = self.store.sum_sales_for_date(today).await?;
        Ok(format!("Sales recorded today: {total}"))
    }

    async fn inventory_reply(&self) -> anyhow::Result<String> {
        let names = self.store.list_all_medicine_names().await?;
        if names.is_empty() {
            return Ok("The inventory is empty.".to_string());
        }
        let limit = self.config.inventory_list_limit;
        let shown = names.iter().take(limit).cloned().collect::<Vec<_>>();
        let mut listing = shown.join(", ");
        if names.len() > limit {
            listing.push_str(", ...");
        }
        Ok(format!("In stock ({} medicines): {listing}", names.len()))
    }

    async fn lookup_reply(&self, raw_query: &str) -> anyhow::Result<String> {
        let hits = self.store.search_medicines(raw_query).await?;
        if !hits.is_empty() {
            let mut reply = String::from("Medicine results:");
            for hit in hits {
                reply.push('\n');
                reply.push_str(&format_hit(&hit));
            }
            return Ok(reply);
        }

        // No substring hit: fall back to the closest known name, but only
        // when it clears the cutoff.
        let names = self.store.list_all_medicine_names().await?;
        match best_match(
            raw_query,
            names.iter().map(String::as_str),
            self.config.suggestion_cutoff,
        ) {
            Some(suggestion) => Ok(format!("Did you mean {suggestion}?")),
            None => Ok(NOT_FOUND_REPLY.to_string()),
        }
    }
}

fn help_reply() -> String {
    [
        "I can answer questions like:",
        "  - is panadol in stock?",
        "  - which drugs expire soon?",
        "  - what is low on stock?",
        "  - sales today",
        "  - show inventory",
        "Or type a medicine name or batch number to look it up.",
    ]
    .join("\n")
}

fn format_hit(hit: &MedicineHit) -> String {
    let label = match &hit.strength {
        Some(strength) if !strength.is_empty() => format!("{} {}", hit.name, strength),
        _ => hit.name.clone(),
    };
    let mut line = format!("{label}: {} in stock", hit.units_in_stock);
    if let Some(expiry) = &hit.expiry_date {
        line.push_str(&format!(" | expiry {expiry}"));
    }
    if let Some(batch) = &hit.batch_no {
        line.push_str(&format!(" | batch {batch}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory store fake: substring search over fixed rows.
    #[derive(Default)]
    struct FakeStore {
        medicines: Vec<MedicineHit>,
        low_stock: Vec<LowStockRow>,
        expiry: Vec<ExpiryRow>,
        sales_today: Money,
    }

    #[async_trait]
    impl AssistantStore for FakeStore {
        async fn list_all_medicine_names(&self) -> anyhow::Result<Vec<String>> {
            Ok(self.medicines.iter().map(|m| m.name.clone()).collect())
        }

        async fn search_medicines(&self, term: &str) -> anyhow::Result<Vec<MedicineHit>> {
            let needle = term.to_lowercase();
            Ok(self
                .medicines
                .iter()
                .filter(|m| {
                    m.name.to_lowercase().contains(&needle)
                        || m.batch_no
                            .as_deref()
                            .is_some_and(|b| b.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect())
        }

        async fn list_low_stock(&self, threshold: i64) -> anyhow::Result<Vec<LowStockRow>> {
            Ok(self
                .low_stock
                .iter()
                .filter(|row| row.units_in_stock <= threshold)
                .cloned()
                .collect())
        }

        async fn sum_sales_for_date(&self, _date: NaiveDate) -> anyhow::Result<Money> {
            Ok(self.sales_today)
        }

        async fn list_medicines_with_expiry(&self) -> anyhow::Result<Vec<ExpiryRow>> {
            Ok(self.expiry.clone())
        }
    }

    fn hit(name: &str, batch: Option<&str>) -> MedicineHit {
        MedicineHit {
            name: name.to_string(),
            strength: None,
            units_in_stock: 12,
            expiry_date: Some("2026-05-01".to_string()),
            batch_no: batch.map(str::to_string),
        }
    }

    fn day(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn empty_input_produces_no_reply() {
        let assistant = Assistant::new(FakeStore::default());
        assert_eq!(assistant.answer("   ").await.unwrap(), None);
        assert_eq!(assistant.answer("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn low_stock_lists_only_rows_below_threshold() {
        let store = FakeStore {
            low_stock: vec![
                LowStockRow { name: "Panadol".to_string(), units_in_stock: 5 },
                LowStockRow { name: "Amoxil".to_string(), units_in_stock: 20 },
            ],
            ..FakeStore::default()
        };
        let assistant = Assistant::new(store);
        let reply = assistant.answer("what is low on stock?").await.unwrap().unwrap();
        assert!(reply.contains("Panadol → 5 left"));
        assert!(!reply.contains("Amoxil"));
    }

    #[tokio::test]
    async fn fully_stocked_shelf_gets_the_fixed_message() {
        let assistant = Assistant::new(FakeStore::default());
        let reply = assistant.answer("anything running low?").await.unwrap().unwrap();
        assert_eq!(reply, "All medicines are sufficiently stocked.");
    }

    #[tokio::test]
    async fn expiry_keeps_rows_inside_the_window_and_skips_junk() {
        let store = FakeStore {
            expiry: vec![
                ExpiryRow { name: "Panadol".to_string(), expiry_date: "2024-01-20".to_string() },
                ExpiryRow { name: "Amoxil".to_string(), expiry_date: "2025-01-01".to_string() },
                ExpiryRow { name: "Brufen".to_string(), expiry_date: "not-a-date".to_string() },
            ],
            ..FakeStore::default()
        };
        let assistant = Assistant::new(store);
        let reply = assistant
            .answer_on(day("2024-01-01"), "which drugs expire soon?")
            .await
            .unwrap()
            .unwrap();
        assert!(reply.contains("Panadol (expiry 2024-01-20)"));
        assert!(!reply.contains("Amoxil"));
        assert!(!reply.contains("Brufen"));
    }

    #[tokio::test]
    async fn no_expiring_rows_is_a_message_not_an_error() {
        let assistant = Assistant::new(FakeStore::default());
        let reply = assistant
            .answer_on(day("2024-01-01"), "expiry report")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply, "No drugs expiring soon.");
    }

    #[tokio::test]
    async fn sales_today_with_no_rows_formats_zero() {
        let assistant = Assistant::new(FakeStore::default());
        let reply = assistant.answer("sales today").await.unwrap().unwrap();
        assert_eq!(reply, "Sales recorded today: KES 0.00");
    }

    #[tokio::test]
    async fn inventory_listing_caps_names_with_an_ellipsis() {
        let store = FakeStore {
            medicines: (0..35).map(|i| hit(&format!("Med{i}"), None)).collect(),
            ..FakeStore::default()
        };
        let assistant = Assistant::new(store);
        let reply = assistant.answer("show inventory").await.unwrap().unwrap();
        assert!(reply.contains("Med0"));
        assert!(reply.contains("Med29"));
        assert!(!reply.contains("Med30,"));
        assert!(reply.ends_with(", ..."));
    }

    #[tokio::test]
    async fn lookup_formats_substring_hits() {
        let store = FakeStore {
            medicines: vec![MedicineHit {
                name: "Panadol 500mg".to_string(),
                strength: None,
                units_in_stock: 12,
                expiry_date: Some("2026-05-01".to_string()),
                batch_no: Some("B-9".to_string()),
            }],
            ..FakeStore::default()
        };
        let assistant = Assistant::new(store);
        let reply = assistant.answer("panadol").await.unwrap().unwrap();
        assert!(reply.contains("Panadol 500mg: 12 in stock"));
        assert!(reply.contains("expiry 2026-05-01"));
        assert!(reply.contains("batch B-9"));
    }

    #[tokio::test]
    async fn lookup_matches_batch_numbers_too() {
        let store = FakeStore {
            medicines: vec![hit("Panadol 500mg", Some("BX-77"))],
            ..FakeStore::default()
        };
        let assistant = Assistant::new(store);
        let reply = assistant.answer("bx-77").await.unwrap().unwrap();
        assert!(reply.contains("Panadol 500mg"));
    }

    #[tokio::test]
    async fn near_miss_gets_a_suggestion() {
        let store = FakeStore {
            medicines: vec![hit("Panadol 500mg", None)],
            ..FakeStore::default()
        };
        let assistant = Assistant::new(store);
        let reply = assistant.answer("panadoll").await.unwrap().unwrap();
        assert_eq!(reply, "Did you mean Panadol 500mg?");
    }

    #[tokio::test]
    async fn hopeless_query_gets_the_fixed_not_found_message() {
        let store = FakeStore {
            medicines: vec![hit("Panadol 500mg", None)],
            ..FakeStore::default()
        };
        let assistant = Assistant::new(store);
        let reply = assistant.answer("xyzzyzzz").await.unwrap().unwrap();
        assert_eq!(reply, NOT_FOUND_REPLY);
    }

    #[tokio::test]
    async fn answering_twice_is_idempotent() {
        let store = FakeStore {
            medicines: vec![hit("Panadol 500mg", Some("B-9"))],
            low_stock: vec![LowStockRow { name: "Panadol".to_string(), units_in_stock: 5 }],
            ..FakeStore::default()
        };
        let assistant = Assistant::new(store);
        for query in ["panadol", "low stock?", "hi there", "sales today"] {
            let first = assistant.answer_on(day("2024-01-01"), query).await.unwrap();
            let second = assistant.answer_on(day("2024-01-01"), query).await.unwrap();
            assert_eq!(first, second);
        }
    }
}
