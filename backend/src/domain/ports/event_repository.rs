//! Driven port for event persistence.
//!
//! Every read returns events with their creator's first name resolved.
//! Multi-event reads are ordered by date, then start time, then id, so day
//! buckets built from them are stable.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Event, EventId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by event repository adapters.
    pub enum EventRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "event repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "event repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event.
    async fn insert(&self, event: &Event) -> Result<(), EventRepositoryError>;

    /// Overwrite the editable fields of an existing event.
    async fn update(&self, event: &Event) -> Result<(), EventRepositoryError>;

    /// Remove an event, reporting whether a row was deleted.
    async fn delete(&self, id: &EventId) -> Result<bool, EventRepositoryError>;

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError>;

    /// Fetch an event only when `owner` created it.
    async fn find_owned(
        &self,
        id: &EventId,
        owner: &UserId,
    ) -> Result<Option<Event>, EventRepositoryError>;

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Event>, EventRepositoryError>;

    /// Every event dated `day`, from any creator.
    async fn find_by_date(&self, day: NaiveDate) -> Result<Vec<Event>, EventRepositoryError>;

    /// Every event dated within `start..=end`, from any creator.
    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Event>, EventRepositoryError>;
}
