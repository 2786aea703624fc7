//! Day and period event reports.
//!
//! Resolves an anchor date (explicit or today's UTC date from the injected
//! clock), fetches every event in the resulting range with one repository
//! call, and lays the events out in one bucket per calendar day.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    DayReport, EventReportError, EventReportQuery, EventRepository, EventRepositoryError,
    PeriodReport,
};
use crate::domain::{DateRange, Error, Event, Period, parse_date};

fn map_repository_error(error: EventRepositoryError) -> EventReportError {
    let error = match error {
        EventRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("event repository unavailable: {message}"))
        }
        EventRepositoryError::Query { message } => {
            Error::internal(format!("event repository error: {message}"))
        }
    };
    EventReportError::Failed(error)
}

/// Lay `events` out in one bucket per day of `range`.
///
/// Days without events get an empty bucket. Events dated outside `range` are
/// dropped; within a day the input order is kept.
pub fn bucket_by_day(range: DateRange, events: Vec<Event>) -> Vec<DayReport> {
    let mut by_day: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();
    for event in events {
        by_day.entry(event.date()).or_default().push(event);
    }
    range
        .days()
        .map(|day| DayReport {
            day,
            events: by_day.remove(&day).unwrap_or_default(),
        })
        .collect()
}

/// Report service implementing [`EventReportQuery`].
#[derive(Clone)]
pub struct EventReportService<R> {
    events: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> EventReportService<R> {
    pub fn new(events: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { events, clock }
    }

    /// The supplied date, or today when it is absent or empty.
    fn anchor(&self, date: Option<String>) -> Result<NaiveDate, EventReportError> {
        match date.as_deref().filter(|text| !text.is_empty()) {
            Some(text) => parse_date(text).map_err(|_| EventReportError::InvalidDate),
            None => Ok(self.clock.utc().date_naive()),
        }
    }
}

#[async_trait]
impl<R> EventReportQuery for EventReportService<R>
where
    R: EventRepository,
{
    async fn day_report(&self, date: Option<String>) -> Result<DayReport, EventReportError> {
        let day = self.anchor(date)?;
        let events = self
            .events
            .find_by_date(day)
            .await
            .map_err(map_repository_error)?;
        debug!(%day, events = events.len(), "day report built");
        Ok(DayReport { day, events })
    }

    async fn period_report(
        &self,
        period: Period,
        date: Option<String>,
    ) -> Result<PeriodReport, EventReportError> {
        let anchor = self.anchor(date)?;
        let range = period
            .range_for(anchor)
            .map_err(|_| EventReportError::InvalidDate)?;
        let events = self
            .events
            .find_by_date_range(range.start(), range.end())
            .await
            .map_err(map_repository_error)?;
        debug!(%period, %range, events = events.len(), "period report built");
        Ok(PeriodReport {
            period,
            range,
            days: bucket_by_day(range, events),
        })
    }
}

#[cfg(test)]
#[path = "event_reports_tests.rs"]
mod tests;
