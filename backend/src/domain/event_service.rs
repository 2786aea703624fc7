//! Event domain services.
//!
//! Implements the event command and query driving ports over the event
//! repository. Detail lookups are scoped to the requester first, then
//! checked again with [`ensure_creator`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{EventCommand, EventQuery, EventRepository, EventRepositoryError};
use crate::domain::{
    Error, Event, EventChanges, EventCreator, EventDetails, EventId, User, UserId, ensure_creator,
};

const EVENT_NOT_FOUND: &str = "No Event matches the given query.";

fn map_repository_error(error: EventRepositoryError) -> Error {
    match error {
        EventRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("event repository unavailable: {message}"))
        }
        EventRepositoryError::Query { message } => {
            Error::internal(format!("event repository error: {message}"))
        }
    }
}

/// Event service implementing [`EventCommand`] and [`EventQuery`].
#[derive(Clone)]
pub struct EventService<R> {
    events: Arc<R>,
}

impl<R> EventService<R> {
    pub fn new(events: Arc<R>) -> Self {
        Self { events }
    }
}

impl<R> EventService<R>
where
    R: EventRepository,
{
    async fn owned(&self, requester: &UserId, id: EventId) -> Result<Event, Error> {
        let event = self
            .events
            .find_owned(&id, requester)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(EVENT_NOT_FOUND))?;
        ensure_creator(&event, requester)?;
        Ok(event)
    }

    async fn store(&self, event: Event) -> Result<Event, Error> {
        self.events
            .update(&event)
            .await
            .map_err(map_repository_error)?;
        debug!(event_id = %event.id(), "event updated");
        Ok(event)
    }
}

#[async_trait]
impl<R> EventCommand for EventService<R>
where
    R: EventRepository,
{
    async fn create(&self, requester: &User, details: EventDetails) -> Result<Event, Error> {
        let event = Event::new(EventId::random(), EventCreator::from(requester), details);
        self.events
            .insert(&event)
            .await
            .map_err(map_repository_error)?;
        info!(event_id = %event.id(), creator = %requester.id(), "event created");
        Ok(event)
    }

    async fn replace(
        &self,
        requester: &UserId,
        id: EventId,
        details: EventDetails,
    ) -> Result<Event, Error> {
        let current = self.owned(requester, id).await?;
        self.store(current.with_details(details)).await
    }

    async fn modify(
        &self,
        requester: &UserId,
        id: EventId,
        changes: EventChanges,
    ) -> Result<Event, Error> {
        let current = self.owned(requester, id).await?;
        if changes.is_empty() {
            return Ok(current);
        }
        let details = changes.apply(current.details());
        self.store(current.with_details(details)).await
    }

    async fn delete(&self, requester: &UserId, id: EventId) -> Result<(), Error> {
        self.owned(requester, id).await?;
        let deleted = self
            .events
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(EVENT_NOT_FOUND));
        }
        info!(event_id = %id, "event deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> EventQuery for EventService<R>
where
    R: EventRepository,
{
    async fn get_owned(&self, requester: &UserId, id: EventId) -> Result<Event, Error> {
        self.owned(requester, id).await
    }

    async fn list_owned(&self, requester: &UserId) -> Result<Vec<Event>, Error> {
        self.events
            .find_by_owner(requester)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "event_service_tests.rs"]
mod tests;
