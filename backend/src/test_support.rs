//! Shared builders and doubles for unit tests. Only compiled under `cfg(test)`.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Email, Event, EventCreator, EventDescription, EventDetails, EventId, EventName, PasswordHash,
    User, UserFlags, UserId, UserName, parse_event_time,
};

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock reading noon UTC on `day`.
    pub fn at_noon(day: NaiveDate) -> Self {
        let noon = day.and_time(NaiveTime::from_hms_opt(12, 0, 0).expect("valid noon"));
        Self(Utc.from_utc_datetime(&noon))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("test date")
}

pub fn time(value: &str) -> NaiveTime {
    parse_event_time(value).expect("test time")
}

/// Active user with a placeholder password hash.
pub fn user(email: &str, name: &str) -> User {
    User::new(
        UserId::random(),
        Email::new(email).expect("test email"),
        UserName::new(name).expect("test name"),
        PasswordHash::from_stored("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
        UserFlags::regular(),
    )
}

pub fn details(name: &str, day: &str, start: &str) -> EventDetails {
    EventDetails {
        name: EventName::new(name).expect("test event name"),
        description: EventDescription::new(format!("{name} description"))
            .expect("test description"),
        date: date(day),
        start_event: time(start),
        end_event: time(start),
    }
}

pub fn event_for(owner: &User, name: &str, day: &str, start: &str) -> Event {
    Event::new(
        EventId::random(),
        EventCreator::from(owner),
        details(name, day, start),
    )
}
