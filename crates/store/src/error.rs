//! Store error model.

use thiserror::Error;

use dawa_catalog::MedicineId;
use dawa_core::DomainError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Domain validation/guard failures surfaced through the store API
    /// (e.g. recording a sale that would overdraw stock).
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("medicine {0} not found")]
    MedicineNotFound(MedicineId),
}
