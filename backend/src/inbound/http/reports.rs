//! Period report handlers.
//!
//! ```text
//! GET /api/v1/events/day?date=2024-08-15
//! GET /api/v1/events/week?date=2024-08-15
//! GET /api/v1/events/month
//! GET /api/v1/events/year?date=2024-01-01
//! ```
//!
//! Every authenticated user sees every event in the period. Without a
//! `date` the period containing today is reported. A malformed `date`
//! yields `400 {"error": "Invalid date format."}`.

use actix_web::{get, web};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::IntoParams;

use crate::domain::Period;
use crate::domain::ports::{DayReport, EventReportError, PeriodReport};
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::events::EventResponse;
use crate::inbound::http::schemas::{
    ErrorSchema, InvalidDateSchema, MonthReportSchema, WeekReportSchema, YearReportSchema,
};
use crate::inbound::http::state::HttpState;

/// Optional anchor date shared by every report endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// Anchor date as `YYYY-MM-DD`; defaults to today.
    #[param(example = "2024-08-15")]
    pub date: Option<String>,
}

/// Raw query pairs; repeated keys are kept so the last `date` can win.
type QueryPairs = web::Query<Vec<(String, String)>>;

impl ReportQuery {
    /// Build from raw query pairs. A repeated `date` resolves to its last
    /// value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            date: pairs
                .into_iter()
                .filter(|(key, _)| key == "date")
                .map(|(_, value)| value)
                .last(),
        }
    }
}

/// Events of a single calendar day.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DayReportResponse {
    #[schema(example = "2024-08-15")]
    pub day: String,
    pub events: Vec<EventResponse>,
}

impl From<&DayReport> for DayReportResponse {
    fn from(report: &DayReport) -> Self {
        Self {
            day: report.day.to_string(),
            events: report.events.iter().map(EventResponse::from).collect(),
        }
    }
}

/// Period envelope: `{"<period>": "<start> - <end>", "days": [...]}`.
#[derive(Debug, Clone)]
pub struct PeriodReportResponse {
    pub period: Period,
    pub range: String,
    pub days: Vec<DayReportResponse>,
}

impl From<&PeriodReport> for PeriodReportResponse {
    fn from(report: &PeriodReport) -> Self {
        Self {
            period: report.period,
            range: report.range.to_string(),
            days: report.days.iter().map(DayReportResponse::from).collect(),
        }
    }
}

impl Serialize for PeriodReportResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.period.label(), &self.range)?;
        map.serialize_entry("days", &self.days)?;
        map.end()
    }
}

async fn period_events(
    state: &HttpState,
    period: Period,
    query: ReportQuery,
) -> Result<web::Json<PeriodReportResponse>, EventReportError> {
    let report = state.reports.period_report(period, query.date).await?;
    Ok(web::Json(PeriodReportResponse::from(&report)))
}

/// Events on one day.
#[utoipa::path(
    get,
    path = "/api/v1/events/day",
    params(ReportQuery),
    responses(
        (status = 200, description = "Events on the day", body = DayReportResponse),
        (status = 400, description = "Malformed date", body = InvalidDateSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "dayEvents"
)]
#[get("/events/day")]
pub async fn day_events(
    state: web::Data<HttpState>,
    _auth: Authenticated,
    query: QueryPairs,
) -> Result<web::Json<DayReportResponse>, EventReportError> {
    let date = ReportQuery::from_pairs(query.into_inner()).date;
    let report = state.reports.day_report(date).await?;
    Ok(web::Json(DayReportResponse::from(&report)))
}

/// Events of the Monday-to-Sunday week, bucketed by day.
#[utoipa::path(
    get,
    path = "/api/v1/events/week",
    params(ReportQuery),
    responses(
        (status = 200, description = "Week report", body = WeekReportSchema),
        (status = 400, description = "Malformed date", body = InvalidDateSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "weekEvents"
)]
#[get("/events/week")]
pub async fn week_events(
    state: web::Data<HttpState>,
    _auth: Authenticated,
    query: QueryPairs,
) -> Result<web::Json<PeriodReportResponse>, EventReportError> {
    period_events(&state, Period::Week, ReportQuery::from_pairs(query.into_inner())).await
}

/// Events of the calendar month, bucketed by day.
#[utoipa::path(
    get,
    path = "/api/v1/events/month",
    params(ReportQuery),
    responses(
        (status = 200, description = "Month report", body = MonthReportSchema),
        (status = 400, description = "Malformed date", body = InvalidDateSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "monthEvents"
)]
#[get("/events/month")]
pub async fn month_events(
    state: web::Data<HttpState>,
    _auth: Authenticated,
    query: QueryPairs,
) -> Result<web::Json<PeriodReportResponse>, EventReportError> {
    period_events(&state, Period::Month, ReportQuery::from_pairs(query.into_inner())).await
}

/// Events of the calendar year, bucketed by day.
#[utoipa::path(
    get,
    path = "/api/v1/events/year",
    params(ReportQuery),
    responses(
        (status = 200, description = "Year report", body = YearReportSchema),
        (status = 400, description = "Malformed date", body = InvalidDateSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "yearEvents"
)]
#[get("/events/year")]
pub async fn year_events(
    state: web::Data<HttpState>,
    _auth: Authenticated,
    query: QueryPairs,
) -> Result<web::Json<PeriodReportResponse>, EventReportError> {
    period_events(&state, Period::Year, ReportQuery::from_pairs(query.into_inner())).await
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
