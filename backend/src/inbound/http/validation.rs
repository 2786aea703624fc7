//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field failures become `invalid_request` errors whose details name the
//! offending field and a machine-readable code.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{
    CredentialsValidationError, Error, EventValidationError, UserValidationError, parse_date,
};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const DESCRIPTION: FieldName = FieldName::new("description");
pub(crate) const DATE: FieldName = FieldName::new("date");
pub(crate) const START_EVENT: FieldName = FieldName::new("start_event");
pub(crate) const END_EVENT: FieldName = FieldName::new("end_event");

/// Build an `invalid_request` error tagged with `field` and `code`.
pub(crate) fn field_error(field: FieldName, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(field, "missing_field", format!("{name}: This field is required."))
}

/// Require a field that is optional at the serde level.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn map_user_validation_error(field: FieldName, err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyId | UserValidationError::InvalidId => "invalid_id",
        UserValidationError::EmptyEmail | UserValidationError::EmptyName => "blank",
        UserValidationError::InvalidEmail => "invalid_email",
        UserValidationError::EmailTooLong { .. } | UserValidationError::NameTooLong { .. } => {
            "max_length"
        }
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::Email(inner) => map_user_validation_error(EMAIL, inner),
        CredentialsValidationError::EmptyPassword => {
            field_error(PASSWORD, "blank", "password: This field may not be blank.")
        }
    }
}

pub(crate) fn map_event_validation_error(field: FieldName, err: EventValidationError) -> Error {
    let code = match err {
        EventValidationError::InvalidId => "invalid_id",
        EventValidationError::EmptyName | EventValidationError::EmptyDescription => "blank",
        EventValidationError::NameTooLong { .. } => "max_length",
        EventValidationError::InvalidTime => "invalid_time",
    };
    field_error(field, code, err.to_string())
}

/// Parse an event body date, reporting the field on failure.
pub(crate) fn parse_body_date(value: &str) -> Result<NaiveDate, Error> {
    parse_date(value).map_err(|_| {
        field_error(
            DATE,
            "invalid_date",
            "date: Date has wrong format. Use YYYY-MM-DD.",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn missing_field_names_the_field() {
        let err = require::<String>(None, NAME).expect_err("missing");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "name", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case(UserValidationError::EmptyEmail, "blank")]
    #[case(UserValidationError::InvalidEmail, "invalid_email")]
    #[case(UserValidationError::EmailTooLong { max: 255 }, "max_length")]
    fn user_errors_map_to_codes(#[case] err: UserValidationError, #[case] code: &str) {
        let mapped = map_user_validation_error(EMAIL, err);
        assert_eq!(mapped.details(), Some(&json!({"field": "email", "code": code})));
    }

    #[rstest]
    fn empty_email_keeps_account_message() {
        let mapped = map_credentials_error(CredentialsValidationError::Email(
            UserValidationError::EmptyEmail,
        ));
        assert_eq!(mapped.message(), "Users must have an email address.");
    }

    #[rstest]
    #[case("2024-13-01")]
    #[case("15/08/2024")]
    fn body_dates_must_be_iso(#[case] raw: &str) {
        let err = parse_body_date(raw).expect_err("bad date");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "date", "code": "invalid_date"}))
        );
    }
}
