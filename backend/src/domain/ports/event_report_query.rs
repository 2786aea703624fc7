//! Driving port for day and period event reports.
//!
//! Reports are visible to every authenticated user and include events from
//! all creators. The anchor date arrives as raw text so the port owns the
//! parse failure.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{DateRange, Error, Event, Period};

/// Failure of a report request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventReportError {
    /// The anchor date is not `YYYY-MM-DD`.
    #[error("Invalid date format.")]
    InvalidDate,
    #[error(transparent)]
    Failed(#[from] Error),
}

/// Events dated on a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    pub day: NaiveDate,
    pub events: Vec<Event>,
}

/// Events of a multi-day period bucketed per day.
///
/// ## Invariants
/// - `days` holds one bucket per day of `range`, in order, empty days
///   included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodReport {
    pub period: Period,
    pub range: DateRange,
    pub days: Vec<DayReport>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventReportQuery: Send + Sync {
    /// Events on `date`, or on today's date when `date` is absent or empty.
    async fn day_report(&self, date: Option<String>) -> Result<DayReport, EventReportError>;

    /// Events in the `period` containing `date` (today when absent or empty).
    async fn period_report(
        &self,
        period: Period,
        date: Option<String>,
    ) -> Result<PeriodReport, EventReportError>;
}
