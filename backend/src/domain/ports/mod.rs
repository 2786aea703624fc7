//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters.
//! Driving ports (`EventCommand`, `EventQuery`, `EventReportQuery`,
//! `UserAccounts`) are implemented by domain services and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod event_command;
mod event_query;
mod event_report_query;
mod event_repository;
mod token_repository;
mod user_accounts;
mod user_repository;

#[cfg(test)]
pub use event_command::MockEventCommand;
pub use event_command::EventCommand;
#[cfg(test)]
pub use event_query::MockEventQuery;
pub use event_query::EventQuery;
#[cfg(test)]
pub use event_report_query::MockEventReportQuery;
pub use event_report_query::{DayReport, EventReportError, EventReportQuery, PeriodReport};
#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use event_repository::{EventRepository, EventRepositoryError};
#[cfg(test)]
pub use token_repository::MockTokenRepository;
pub use token_repository::{TokenRepository, TokenRepositoryError};
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::{ProfileChanges, Registration, UserAccounts};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
