//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions back into domain types
//! re-run domain validation and report a message on failure.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Email, Event, EventCreator, EventDescription, EventDetails, EventId, EventName, PasswordHash,
    User, UserFlags, UserId, UserName,
};

use super::schema::{auth_tokens, events, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    #[expect(dead_code, reason = "audit column not surfaced through the API")]
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(&row.email)
            .map_err(|err| format!("stored email for user {} is invalid: {err}", row.id))?;
        let name = if row.name.trim().is_empty() {
            UserName::empty()
        } else {
            UserName::new(row.name)
                .map_err(|err| format!("stored name for user {} is invalid: {err}", row.id))?
        };
        let flags = UserFlags {
            is_active: row.is_active,
            is_staff: row.is_staff,
            is_superuser: row.is_superuser,
        };
        Ok(User::new(
            UserId::from_uuid(row.id),
            email,
            name,
            PasswordHash::from_stored(row.password_hash),
            flags,
        ))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        let flags = user.flags();
        Self {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            name: user.name().as_ref(),
            password_hash: user.password_hash().as_str(),
            is_active: flags.is_active,
            is_staff: flags.is_staff,
            is_superuser: flags.is_superuser,
        }
    }
}

/// Changeset struct for updating existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub password_hash: &'a str,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl<'a> From<&'a User> for UserUpdate<'a> {
    fn from(user: &'a User) -> Self {
        let flags = user.flags();
        Self {
            name: user.name().as_ref(),
            password_hash: user.password_hash().as_str(),
            is_active: flags.is_active,
            is_staff: flags.is_staff,
            is_superuser: flags.is_superuser,
        }
    }
}

/// Insertable struct for the auth_tokens table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = auth_tokens)]
pub(crate) struct NewAuthTokenRow<'a> {
    pub key: &'a str,
    pub user_id: Uuid,
}

/// Row struct for reading from the events table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_event: NaiveTime,
    pub end_event: NaiveTime,
}

impl EventRow {
    /// Build the domain event, attaching the creator's stored name.
    pub(crate) fn into_event(self, creator_name: &str) -> Result<Event, String> {
        let name = EventName::new(self.name)
            .map_err(|err| format!("stored name for event {} is invalid: {err}", self.id))?;
        let description = EventDescription::new(self.description).map_err(|err| {
            format!("stored description for event {} is invalid: {err}", self.id)
        })?;
        let first_name = creator_name.split_whitespace().next().unwrap_or_default();
        let creator = EventCreator {
            id: UserId::from_uuid(self.creator_id),
            first_name: first_name.to_owned(),
        };
        let details = EventDetails {
            name,
            description,
            date: self.date,
            start_event: self.start_event,
            end_event: self.end_event,
        };
        Ok(Event::new(EventId::from_uuid(self.id), creator, details))
    }
}

/// Insertable struct for creating new event records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow<'a> {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub date: NaiveDate,
    pub start_event: NaiveTime,
    pub end_event: NaiveTime,
}

impl<'a> From<&'a Event> for NewEventRow<'a> {
    fn from(event: &'a Event) -> Self {
        Self {
            id: *event.id().as_uuid(),
            creator_id: *event.creator().id.as_uuid(),
            name: event.name().as_ref(),
            description: event.description().as_ref(),
            date: event.date(),
            start_event: event.start_event(),
            end_event: event.end_event(),
        }
    }
}

/// Changeset struct for the editable event columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = events)]
pub(crate) struct EventUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub date: NaiveDate,
    pub start_event: NaiveTime,
    pub end_event: NaiveTime,
}

impl<'a> From<&'a Event> for EventUpdate<'a> {
    fn from(event: &'a Event) -> Self {
        Self {
            name: event.name().as_ref(),
            description: event.description().as_ref(),
            date: event.date(),
            start_event: event.start_event(),
            end_event: event.end_event(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; database round trips live with the adapters.
    use super::*;
    use crate::test_support::{date, time};
    use rstest::rstest;

    fn user_row(email: &str, name: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            name: name.to_owned(),
            password_hash: "hash".to_owned(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn user_row_with_blank_name_converts() {
        let user = User::try_from(user_row("root@example.com", "")).expect("user");
        assert_eq!(user.name().as_ref(), "");
    }

    #[rstest]
    fn user_row_with_bad_email_is_rejected() {
        let err = User::try_from(user_row("not-an-email", "Ada")).expect_err("bad email");
        assert!(err.contains("stored email"));
    }

    #[rstest]
    fn event_row_takes_first_word_of_creator_name() {
        let row = EventRow {
            id: Uuid::new_v4(),
            creator_id: Uuid::new_v4(),
            name: "Standup".to_owned(),
            description: "Daily sync".to_owned(),
            date: date("2024-08-15"),
            start_event: time("09:00"),
            end_event: time("09:15"),
        };

        let event = row.into_event("Ada Lovelace").expect("event");

        assert_eq!(event.creator().first_name, "Ada");
        assert_eq!(event.end_event(), time("09:15"));
    }

    #[rstest]
    fn event_row_with_blank_name_is_rejected() {
        let row = EventRow {
            id: Uuid::new_v4(),
            creator_id: Uuid::new_v4(),
            name: "  ".to_owned(),
            description: "Daily sync".to_owned(),
            date: date("2024-08-15"),
            start_event: time("09:00"),
            end_event: time("09:15"),
        };

        assert!(row.into_event("Ada").is_err());
    }
}
