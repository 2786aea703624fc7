//! Driving port for event mutations.
//!
//! Every mutation is performed on behalf of an authenticated requester. The
//! requester always becomes the creator of new events and must be the
//! creator of any event they change or delete.

use async_trait::async_trait;

use crate::domain::{Error, Event, EventChanges, EventDetails, EventId, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventCommand: Send + Sync {
    /// Create an event owned by `requester`.
    async fn create(&self, requester: &User, details: EventDetails) -> Result<Event, Error>;

    /// Replace every editable field of an owned event.
    async fn replace(
        &self,
        requester: &UserId,
        id: EventId,
        details: EventDetails,
    ) -> Result<Event, Error>;

    /// Change only the supplied fields of an owned event.
    async fn modify(
        &self,
        requester: &UserId,
        id: EventId,
        changes: EventChanges,
    ) -> Result<Event, Error>;

    async fn delete(&self, requester: &UserId, id: EventId) -> Result<(), Error>;
}
