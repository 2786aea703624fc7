//! PostgreSQL-backed `EventRepository` implementation using Diesel ORM.
//!
//! Reads join `users` to resolve the creator's first name. Multi-row reads
//! order by date, start time and id.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{Event, EventId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{EventRow, EventUpdate, NewEventRow};
use super::pool::{DbPool, PoolError};
use super::schema::{events, users};

/// Diesel-backed implementation of the `EventRepository` port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EventRepositoryError {
    map_basic_pool_error(error, EventRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EventRepositoryError {
    map_basic_diesel_error(
        error,
        EventRepositoryError::query,
        EventRepositoryError::connection,
    )
}

fn hydrate((row, creator_name): (EventRow, String)) -> Result<Event, EventRepositoryError> {
    row.into_event(&creator_name)
        .map_err(EventRepositoryError::query)
}

fn hydrate_all(rows: Vec<(EventRow, String)>) -> Result<Vec<Event>, EventRepositoryError> {
    rows.into_iter().map(hydrate).collect()
}

/// Load every event matching `filter`, joined with its creator's name.
macro_rules! load_events {
    ($self:ident, $filter:expr) => {{
        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(EventRow, String)> = events::table
            .inner_join(users::table)
            .filter($filter)
            .select((EventRow::as_select(), users::name))
            .order_by((events::date.asc(), events::start_event.asc(), events::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        hydrate_all(rows)
    }};
}

/// Load at most one event matching `filter`.
macro_rules! load_event {
    ($self:ident, $filter:expr) => {{
        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(EventRow, String)> = events::table
            .inner_join(users::table)
            .filter($filter)
            .select((EventRow::as_select(), users::name))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(hydrate).transpose()
    }};
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn insert(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(events::table)
            .values(&NewEventRow::from(event))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(events::table.find(event.id().as_uuid()))
            .set(&EventUpdate::from(event))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            return Err(EventRepositoryError::query(format!(
                "event {} does not exist",
                event.id()
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: &EventId) -> Result<bool, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(events::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError> {
        load_event!(self, events::id.eq(id.as_uuid()))
    }

    async fn find_owned(
        &self,
        id: &EventId,
        owner: &UserId,
    ) -> Result<Option<Event>, EventRepositoryError> {
        load_event!(
            self,
            events::id
                .eq(id.as_uuid())
                .and(events::creator_id.eq(owner.as_uuid()))
        )
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Event>, EventRepositoryError> {
        load_events!(self, events::creator_id.eq(owner.as_uuid()))
    }

    async fn find_by_date(&self, day: NaiveDate) -> Result<Vec<Event>, EventRepositoryError> {
        load_events!(self, events::date.eq(day))
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Event>, EventRepositoryError> {
        load_events!(self, events::date.between(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, time};
    use rstest::rstest;
    use uuid::Uuid;

    fn row(name: &str) -> EventRow {
        EventRow {
            id: Uuid::new_v4(),
            creator_id: Uuid::new_v4(),
            name: name.to_owned(),
            description: "Planning".to_owned(),
            date: date("2024-08-15"),
            start_event: time("09:00"),
            end_event: time("10:00"),
        }
    }

    #[rstest]
    fn hydrate_all_keeps_row_order() {
        let events = hydrate_all(vec![
            (row("First"), "Ada Lovelace".to_owned()),
            (row("Second"), String::new()),
        ])
        .expect("rows convert");

        let names: Vec<&str> = events.iter().map(|e| e.name().as_ref()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(events[1].creator().first_name, "");
    }

    #[rstest]
    fn corrupt_row_fails_the_whole_read() {
        let err = hydrate_all(vec![(row("Fine"), "Ada".to_owned()), (row(""), "Ada".to_owned())])
            .expect_err("corrupt row");
        assert!(matches!(err, EventRepositoryError::Query { .. }));
    }
}
