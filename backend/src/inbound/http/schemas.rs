//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! Domain types stay framework-agnostic, so their schemas are described by
//! wrappers registered under the domain path. The period report envelopes
//! are serialised by hand and get one wrapper per period.

use utoipa::ToSchema;

use super::reports::DayReportResponse;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "No Event matches the given query.")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, e.g. `{"field": "name", "code": "blank"}`.
    details: Option<serde_json::Value>,
}

/// Body returned by report endpoints for a malformed `date`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InvalidDateSchema {
    #[schema(example = "Invalid date format.")]
    error: String,
}

/// Week report envelope.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct WeekReportSchema {
    #[schema(example = "2024-08-12 - 2024-08-18")]
    week: String,
    days: Vec<DayReportResponse>,
}

/// Month report envelope.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MonthReportSchema {
    #[schema(example = "2024-02-01 - 2024-02-29")]
    month: String,
    days: Vec<DayReportResponse>,
}

/// Year report envelope.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct YearReportSchema {
    #[schema(example = "2024-01-01 - 2024-12-31")]
    year: String,
    days: Vec<DayReportResponse>,
}
