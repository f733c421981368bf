//! SQLite-backed data access for the pharmacy.
//!
//! One [`PharmacyStore`] over a `sqlx::SqlitePool` owns all SQL: schema
//! setup, medicine CRUD, transactional sale/purchase recording, the report
//! queries, and the assistant's read-only interface.

pub mod error;

mod assistant_impl;
mod medicines;
mod purchases;
mod sale_log;
mod schema;


use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use error::{StoreError, StoreResult};

/// Handle to the pharmacy database. Cheap to clone; the pool is shared.
#[derive(Debug, Clone)]
pub struct PharmacyStore {
    pool: SqlitePool,
}

impl PharmacyStore {
    /// Open (or create) the database file and prepare the schema.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        let store = Self { pool };
        store.init_schema().await?;
        tracing::info!(path = %path.display(), "pharmacy store ready");
        Ok(store)
    }

    /// Fresh in-memory database, used by tests.
    ///
    /// Pinned to a single connection: every pooled connection to
    /// `sqlite::memory:` would otherwise get its own empty database.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
