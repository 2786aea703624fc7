//! Driving port for reading a requester's own events.

use async_trait::async_trait;

use crate::domain::{Error, Event, EventId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventQuery: Send + Sync {
    /// Fetch an event created by `requester`; anyone else's is not found.
    async fn get_owned(&self, requester: &UserId, id: EventId) -> Result<Event, Error>;

    /// Every event created by `requester`.
    async fn list_owned(&self, requester: &UserId) -> Result<Vec<Event>, Error>;
}
