//! Expiry evaluation over stored date text.
//!
//! Expiry dates come out of the store as raw text (`YYYY-MM-DD` when the
//! row was written by this app, arbitrary junk when it wasn't). Anything
//! unparseable evaluates to [`ExpiryStatus::Unknown`] and is never an error.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Where a medicine sits relative to its expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// Expiry date is in the past. Sale must be blocked.
    Expired,
    /// Expiry falls within the near-expiry window. Sale allowed with warning.
    NearExpiry,
    /// Expiry is comfortably in the future.
    Current,
    /// No expiry recorded, or the recorded text does not parse.
    Unknown,
}

/// Parse stored expiry text in the app's fixed `YYYY-MM-DD` format.
pub fn parse_expiry_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

impl ExpiryStatus {
    /// Evaluate stored expiry text against `today` and a window in days.
    pub fn evaluate(expiry_text: Option<&str>, today: NaiveDate, window_days: i64) -> Self {
        let Some(date) = expiry_text.and_then(parse_expiry_date) else {
            return ExpiryStatus::Unknown;
        };
        if date < today {
            return ExpiryStatus::Expired;
        }
        let window_end = today
            .checked_add_days(Days::new(window_days.max(0) as u64))
            .unwrap_or(NaiveDate::MAX);
        if date <= window_end {
            ExpiryStatus::NearExpiry
        } else {
            ExpiryStatus::Current
        }
    }

    pub fn is_expired(self) -> bool {
        matches!(self, ExpiryStatus::Expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NEAR_EXPIRY_DAYS;

    fn day(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn yesterday_is_expired() {
        let status = ExpiryStatus::evaluate(Some("2023-12-31"), day("2024-01-01"), NEAR_EXPIRY_DAYS);
        assert_eq!(status, ExpiryStatus::Expired);
    }

    #[test]
    fn inside_the_window_is_near_expiry() {
        let status = ExpiryStatus::evaluate(Some("2024-01-20"), day("2024-01-01"), NEAR_EXPIRY_DAYS);
        assert_eq!(status, ExpiryStatus::NearExpiry);
    }

    #[test]
    fn window_boundary_counts_as_near_expiry() {
        let status = ExpiryStatus::evaluate(Some("2024-01-31"), day("2024-01-01"), 30);
        assert_eq!(status, ExpiryStatus::NearExpiry);
    }

    #[test]
    fn beyond_the_window_is_current() {
        let status = ExpiryStatus::evaluate(Some("2025-01-01"), day("2024-01-01"), NEAR_EXPIRY_DAYS);
        assert_eq!(status, ExpiryStatus::Current);
    }

    #[test]
    fn missing_or_junk_text_is_unknown_not_an_error() {
        let today = day("2024-01-01");
        assert_eq!(
            ExpiryStatus::evaluate(None, today, NEAR_EXPIRY_DAYS),
            ExpiryStatus::Unknown
        );
        assert_eq!(
            ExpiryStatus::evaluate(Some("not-a-date"), today, NEAR_EXPIRY_DAYS),
            ExpiryStatus::Unknown
        );
        assert_eq!(
            ExpiryStatus::evaluate(Some(""), today, NEAR_EXPIRY_DAYS),
            ExpiryStatus::Unknown
        );
    }
}
