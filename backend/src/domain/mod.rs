//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed calendar entities used by the HTTP and
//! persistence adapters, the ports between them, and the services that
//! implement the driving ports. Nothing here depends on Actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - User, Email, UserName, UserId: account identity.
//! - LoginCredentials, Password, PasswordHash, AuthToken: authentication.
//! - Event and its value types, plus the [`ensure_creator`] policy.
//! - DateRange / Period: calendar range arithmetic for reports.
//! - EventService, EventReportService, UserAccountsService.

pub mod auth;
pub mod date_range;
pub mod error;
pub mod event;
pub mod event_reports;
pub mod event_service;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_accounts;

pub use self::auth::{
    AuthToken, CredentialsValidationError, LoginCredentials, Password, PasswordHash,
    PasswordHashError, TokenFormatError,
};
pub use self::date_range::{DateRange, DateRangeError, Period, parse_date};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::event::{
    EVENT_NAME_MAX, Event, EventChanges, EventCreator, EventDescription, EventDetails, EventId,
    EventName, EventValidationError, ensure_creator, parse_event_time,
};
pub use self::event_reports::{EventReportService, bucket_by_day};
pub use self::event_service::EventService;
pub use self::trace_id::TraceId;
pub use self::user::{Email, User, UserFlags, UserId, UserName, UserValidationError};
pub use self::user_accounts::UserAccountsService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use calendar_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
