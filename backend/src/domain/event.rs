//! Calendar event model and the creator ownership policy.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use super::Error;
use super::user::{User, UserId};

/// Maximum length of an event name, in characters.
pub const EVENT_NAME_MAX: usize = 50;

/// Wire formats accepted for event times, most specific first.
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Validation errors raised by event value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventValidationError {
    #[error("event id must be a valid UUID")]
    InvalidId,
    #[error("name must not be blank")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("description must not be blank")]
    EmptyDescription,
    #[error("time must use HH:MM or HH:MM:SS")]
    InvalidTime,
}

/// Stable event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(Uuid);

impl EventId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = EventValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| EventValidationError::InvalidId)
    }
}

/// Short event title.
///
/// ## Invariants
/// - Trimmed, non-blank and at most [`EVENT_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventName(String);

impl EventName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, EventValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(EventValidationError::EmptyName);
        }
        if name.chars().count() > EVENT_NAME_MAX {
            return Err(EventValidationError::NameTooLong {
                max: EVENT_NAME_MAX,
            });
        }
        Ok(Self(name.to_owned()))
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Free-form event description, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDescription(String);

impl EventDescription {
    pub fn new(description: impl AsRef<str>) -> Result<Self, EventValidationError> {
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(EventValidationError::EmptyDescription);
        }
        Ok(Self(description.to_owned()))
    }
}

impl AsRef<str> for EventDescription {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Parse an event time written as `HH:MM` or `HH:MM:SS`.
///
/// # Examples
/// ```
/// use calendar_backend::domain::parse_event_time;
///
/// assert_eq!(parse_event_time("09:30").unwrap().to_string(), "09:30:00");
/// assert!(parse_event_time("9.30am").is_err());
/// ```
pub fn parse_event_time(value: &str) -> Result<NaiveTime, EventValidationError> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
        .ok_or(EventValidationError::InvalidTime)
}

/// Owner of an event as exposed to readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCreator {
    pub id: UserId,
    /// First word of the owner's name.
    pub first_name: String,
}

impl From<&User> for EventCreator {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            first_name: user.name().first_name().to_owned(),
        }
    }
}

/// Owner-editable content of an event.
///
/// `start_event` is not required to precede `end_event`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub name: EventName,
    pub description: EventDescription,
    pub date: NaiveDate,
    pub start_event: NaiveTime,
    pub end_event: NaiveTime,
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventChanges {
    pub name: Option<EventName>,
    pub description: Option<EventDescription>,
    pub date: Option<NaiveDate>,
    pub start_event: Option<NaiveTime>,
    pub end_event: Option<NaiveTime>,
}

impl EventChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overlay these changes on `current`.
    pub fn apply(self, current: &EventDetails) -> EventDetails {
        EventDetails {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            date: self.date.unwrap_or(current.date),
            start_event: self.start_event.unwrap_or(current.start_event),
            end_event: self.end_event.unwrap_or(current.end_event),
        }
    }
}

/// Calendar event owned by exactly one user.
///
/// ## Invariants
/// - `creator` is fixed at creation; updates only ever replace `details`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    id: EventId,
    creator: EventCreator,
    details: EventDetails,
}

impl Event {
    pub fn new(id: EventId, creator: EventCreator, details: EventDetails) -> Self {
        Self {
            id,
            creator,
            details,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn creator(&self) -> &EventCreator {
        &self.creator
    }

    pub fn details(&self) -> &EventDetails {
        &self.details
    }

    pub fn name(&self) -> &EventName {
        &self.details.name
    }

    pub fn description(&self) -> &EventDescription {
        &self.details.description
    }

    pub fn date(&self) -> NaiveDate {
        self.details.date
    }

    pub fn start_event(&self) -> NaiveTime {
        self.details.start_event
    }

    pub fn end_event(&self) -> NaiveTime {
        self.details.end_event
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.creator.id == user
    }

    /// Replace the editable content, keeping identity and creator.
    pub fn with_details(self, details: EventDetails) -> Self {
        Self { details, ..self }
    }
}

/// Object-level permission check for mutating or reading an event.
///
/// # Examples
/// ```
/// # use calendar_backend::domain::{ensure_creator, ErrorCode, UserId};
/// # fn check(event: &calendar_backend::domain::Event) {
/// let stranger = UserId::random();
/// let err = ensure_creator(event, &stranger).unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Forbidden);
/// # }
/// ```
pub fn ensure_creator(event: &Event, requester: &UserId) -> Result<(), Error> {
    if event.is_owned_by(requester) {
        Ok(())
    } else {
        Err(Error::forbidden(
            "You do not have permission to perform this action.",
        ))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date")
    }

    fn time(value: &str) -> NaiveTime {
        parse_event_time(value).expect("time")
    }

    #[fixture]
    fn details() -> EventDetails {
        EventDetails {
            name: EventName::new("Standup").expect("name"),
            description: EventDescription::new("Daily sync").expect("description"),
            date: date("2024-08-15"),
            start_event: time("09:00"),
            end_event: time("09:15"),
        }
    }

    #[fixture]
    fn event(details: EventDetails) -> Event {
        let creator = EventCreator {
            id: UserId::random(),
            first_name: "Ada".to_owned(),
        };
        Event::new(EventId::random(), creator, details)
    }

    #[rstest]
    #[case("", EventValidationError::EmptyName)]
    #[case("   ", EventValidationError::EmptyName)]
    fn rejects_blank_names(#[case] raw: &str, #[case] expected: EventValidationError) {
        assert_eq!(EventName::new(raw).expect_err("blank"), expected);
    }

    #[rstest]
    fn name_length_counts_characters() {
        assert!(EventName::new("é".repeat(EVENT_NAME_MAX)).is_ok());
        assert_eq!(
            EventName::new("x".repeat(EVENT_NAME_MAX + 1)).expect_err("too long"),
            EventValidationError::NameTooLong {
                max: EVENT_NAME_MAX
            }
        );
    }

    #[rstest]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(EventName::new("  Standup ").expect("name").as_ref(), "Standup");
        assert!(EventName::new(format!(" {} ", "x".repeat(EVENT_NAME_MAX))).is_ok());
        assert_eq!(
            EventDescription::new("\tDaily sync\n").expect("description").as_ref(),
            "Daily sync"
        );
    }

    #[rstest]
    fn rejects_blank_description() {
        assert_eq!(
            EventDescription::new(" \n").expect_err("blank"),
            EventValidationError::EmptyDescription
        );
    }

    #[rstest]
    #[case("09:30", "09:30:00")]
    #[case("09:30:15", "09:30:15")]
    #[case("23:59:59", "23:59:59")]
    fn parses_supported_time_formats(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(time(raw).to_string(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("25:00")]
    #[case("9.30")]
    #[case("noon")]
    fn rejects_unsupported_times(#[case] raw: &str) {
        assert_eq!(
            parse_event_time(raw).expect_err("invalid"),
            EventValidationError::InvalidTime
        );
    }

    #[rstest]
    fn event_id_parses_uuid_text() {
        let id = EventId::random();
        assert_eq!(id.to_string().parse::<EventId>(), Ok(id));
        assert_eq!(
            "nope".parse::<EventId>(),
            Err(EventValidationError::InvalidId)
        );
    }

    #[rstest]
    fn changes_overlay_only_supplied_fields(details: EventDetails) {
        let changes = EventChanges {
            name: Some(EventName::new("Retro").expect("name")),
            end_event: Some(time("10:00")),
            ..EventChanges::default()
        };

        let updated = changes.apply(&details);

        assert_eq!(updated.name.as_ref(), "Retro");
        assert_eq!(updated.end_event, time("10:00"));
        assert_eq!(updated.description, details.description);
        assert_eq!(updated.date, details.date);
        assert_eq!(updated.start_event, details.start_event);
    }

    #[rstest]
    fn default_changes_are_empty() {
        assert!(EventChanges::default().is_empty());
    }

    #[rstest]
    fn with_details_keeps_identity_and_creator(event: Event, details: EventDetails) {
        let replacement = EventDetails {
            date: date("2024-09-01"),
            ..details
        };
        let updated = event.clone().with_details(replacement);

        assert_eq!(updated.id(), event.id());
        assert_eq!(updated.creator(), event.creator());
        assert_eq!(updated.date(), date("2024-09-01"));
    }

    #[rstest]
    fn creator_passes_ownership_check(event: Event) {
        let owner = event.creator().id.clone();
        assert!(ensure_creator(&event, &owner).is_ok());
    }

    #[rstest]
    fn stranger_is_forbidden(event: Event) {
        let err = ensure_creator(&event, &UserId::random()).expect_err("forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn end_before_start_is_accepted(details: EventDetails) {
        let inverted = EventDetails {
            start_event: time("18:00"),
            end_event: time("08:00"),
            ..details
        };
        assert!(inverted.start_event > inverted.end_event);
    }
}
