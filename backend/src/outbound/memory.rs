//! In-process store implementing every repository port.
//!
//! Used when no database is configured and by HTTP tests. One store backs
//! users, tokens and events together so deleting a user cascades to the
//! rows that reference them, matching the PostgreSQL foreign keys.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::ports::{
    EventRepository, EventRepositoryError, TokenRepository, TokenRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthToken, Email, Event, EventCreator, EventDetails, EventId, User, UserId,
};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    tokens: HashMap<AuthToken, UserId>,
    events: HashMap<EventId, EventRow>,
}

/// Stored event; the creator's name is resolved on read.
#[derive(Clone)]
struct EventRow {
    creator_id: UserId,
    details: EventDetails,
}

impl Tables {
    fn hydrate(&self, id: EventId, row: &EventRow) -> Event {
        let first_name = self
            .users
            .get(&row.creator_id)
            .map(|user| user.name().first_name().to_owned())
            .unwrap_or_default();
        let creator = EventCreator {
            id: row.creator_id.clone(),
            first_name,
        };
        Event::new(id, creator, row.details.clone())
    }

    fn select(&self, keep: impl Fn(&EventRow) -> bool) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .iter()
            .filter(|(_, row)| keep(row))
            .map(|(id, row)| self.hydrate(*id, row))
            .collect();
        events.sort_by_key(|event| (event.date(), event.start_event(), event.id()));
        events
    }
}

/// Mutex-guarded calendar store.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        if tables
            .users
            .values()
            .any(|existing| existing.email() == user.email())
        {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        tables.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        match tables.users.get_mut(user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(UserPersistenceError::query(format!(
                "user {} does not exist",
                user.id()
            ))),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        if tables.users.remove(id).is_none() {
            return Ok(false);
        }
        tables.tokens.retain(|_, owner| owner != id);
        tables.events.retain(|_, row| &row.creator_id != id);
        Ok(true)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }
}

#[async_trait]
impl TokenRepository for InMemoryStore {
    async fn get_or_insert(
        &self,
        user: &UserId,
        candidate: &AuthToken,
    ) -> Result<AuthToken, TokenRepositoryError> {
        let mut tables = self.lock().map_err(TokenRepositoryError::query)?;
        if let Some(existing) = tables
            .tokens
            .iter()
            .find_map(|(token, owner)| (owner == user).then(|| token.clone()))
        {
            return Ok(existing);
        }
        tables.tokens.insert(candidate.clone(), user.clone());
        Ok(candidate.clone())
    }

    async fn find_user_id(
        &self,
        token: &AuthToken,
    ) -> Result<Option<UserId>, TokenRepositoryError> {
        let tables = self.lock().map_err(TokenRepositoryError::query)?;
        Ok(tables.tokens.get(token).cloned())
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn insert(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let mut tables = self.lock().map_err(EventRepositoryError::query)?;
        if !tables.users.contains_key(&event.creator().id) {
            return Err(EventRepositoryError::query(format!(
                "creator {} does not exist",
                event.creator().id
            )));
        }
        tables.events.insert(
            event.id(),
            EventRow {
                creator_id: event.creator().id.clone(),
                details: event.details().clone(),
            },
        );
        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let mut tables = self.lock().map_err(EventRepositoryError::query)?;
        match tables.events.get_mut(&event.id()) {
            Some(row) => {
                row.details = event.details().clone();
                Ok(())
            }
            None => Err(EventRepositoryError::query(format!(
                "event {} does not exist",
                event.id()
            ))),
        }
    }

    async fn delete(&self, id: &EventId) -> Result<bool, EventRepositoryError> {
        let mut tables = self.lock().map_err(EventRepositoryError::query)?;
        Ok(tables.events.remove(id).is_some())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError> {
        let tables = self.lock().map_err(EventRepositoryError::query)?;
        Ok(tables.events.get(id).map(|row| tables.hydrate(*id, row)))
    }

    async fn find_owned(
        &self,
        id: &EventId,
        owner: &UserId,
    ) -> Result<Option<Event>, EventRepositoryError> {
        let tables = self.lock().map_err(EventRepositoryError::query)?;
        Ok(tables
            .events
            .get(id)
            .filter(|row| &row.creator_id == owner)
            .map(|row| tables.hydrate(*id, row)))
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Event>, EventRepositoryError> {
        let tables = self.lock().map_err(EventRepositoryError::query)?;
        Ok(tables.select(|row| &row.creator_id == owner))
    }

    async fn find_by_date(&self, day: NaiveDate) -> Result<Vec<Event>, EventRepositoryError> {
        let tables = self.lock().map_err(EventRepositoryError::query)?;
        Ok(tables.select(|row| row.details.date == day))
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Event>, EventRepositoryError> {
        let tables = self.lock().map_err(EventRepositoryError::query)?;
        Ok(tables.select(|row| start <= row.details.date && row.details.date <= end))
    }
}
