//! Event CRUD handlers.
//!
//! ```text
//! POST   /api/v1/events       {"name":"Standup","description":"Daily sync","date":"2024-08-15","start_event":"09:00","end_event":"09:15"}
//! GET    /api/v1/events
//! GET    /api/v1/events/{id}
//! PUT    /api/v1/events/{id}
//! PATCH  /api/v1/events/{id}
//! DELETE /api/v1/events/{id}
//! ```
//!
//! Detail routes only resolve events owned by the requester; anyone else's
//! event, or an id that is not a UUID, is a 404.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, Event, EventChanges, EventDescription, EventDetails, EventId, EventName,
    parse_event_time,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    DATE, DESCRIPTION, END_EVENT, FieldName, NAME, START_EVENT, map_event_validation_error,
    parse_body_date, require,
};

/// Wire format for event times.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Event body for create, replace and partial update.
///
/// Any `creator` field sent by clients is ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct EventRequest {
    #[schema(example = "Standup")]
    pub name: Option<String>,
    #[schema(example = "Daily sync")]
    pub description: Option<String>,
    #[schema(example = "2024-08-15")]
    pub date: Option<String>,
    #[schema(example = "09:00:00")]
    pub start_event: Option<String>,
    #[schema(example = "09:15:00")]
    pub end_event: Option<String>,
}

fn parse_name(raw: String) -> Result<EventName, Error> {
    EventName::new(raw).map_err(|err| map_event_validation_error(NAME, err))
}

fn parse_description(raw: String) -> Result<EventDescription, Error> {
    EventDescription::new(raw).map_err(|err| map_event_validation_error(DESCRIPTION, err))
}

fn parse_time(raw: &str, field: FieldName) -> Result<NaiveTime, Error> {
    parse_event_time(raw).map_err(|err| map_event_validation_error(field, err))
}

impl TryFrom<EventRequest> for EventDetails {
    type Error = Error;

    fn try_from(value: EventRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: parse_name(require(value.name, NAME)?)?,
            description: parse_description(require(value.description, DESCRIPTION)?)?,
            date: parse_body_date(&require(value.date, DATE)?)?,
            start_event: parse_time(&require(value.start_event, START_EVENT)?, START_EVENT)?,
            end_event: parse_time(&require(value.end_event, END_EVENT)?, END_EVENT)?,
        })
    }
}

impl TryFrom<EventRequest> for EventChanges {
    type Error = Error;

    fn try_from(value: EventRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name.map(parse_name).transpose()?,
            description: value.description.map(parse_description).transpose()?,
            date: value.date.as_deref().map(parse_body_date).transpose()?,
            start_event: value
                .start_event
                .as_deref()
                .map(|raw| parse_time(raw, START_EVENT))
                .transpose()?,
            end_event: value
                .end_event
                .as_deref()
                .map(|raw| parse_time(raw, END_EVENT))
                .transpose()?,
        })
    }
}

/// Serialized event. `first_name` is derived from the creator's name.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EventResponse {
    #[schema(example = "0b6f3c4e-3f0e-4a4c-9d59-7a4f8c3f1e2a")]
    pub id: String,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Standup")]
    pub name: String,
    #[schema(example = "Daily sync")]
    pub description: String,
    #[schema(example = "2024-08-15")]
    pub date: String,
    #[schema(example = "09:00:00")]
    pub start_event: String,
    #[schema(example = "09:15:00")]
    pub end_event: String,
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id().to_string(),
            first_name: event.creator().first_name.clone(),
            name: event.name().as_ref().to_owned(),
            description: event.description().as_ref().to_owned(),
            date: event.date().to_string(),
            start_event: event.start_event().format(TIME_FORMAT).to_string(),
            end_event: event.end_event().format(TIME_FORMAT).to_string(),
        }
    }
}

/// Resolve a path segment to an event id; anything else cannot match.
fn event_id(raw: &str) -> Result<EventId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found("No Event matches the given query."))
}

/// Create an event owned by the requester.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "createEvent"
)]
#[post("/events")]
pub async fn create_event(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<EventRequest>,
) -> ApiResult<HttpResponse> {
    let details = EventDetails::try_from(payload.into_inner())?;
    let event = state.events.create(auth.user(), details).await?;
    Ok(HttpResponse::Created().json(EventResponse::from(&event)))
}

/// List the requester's own events.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    responses(
        (status = 200, description = "Owned events", body = [EventResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "listEvents"
)]
#[get("/events")]
pub async fn list_events(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<Vec<EventResponse>>> {
    let events = state.event_queries.list_owned(auth.user().id()).await?;
    Ok(web::Json(events.iter().map(EventResponse::from).collect()))
}

/// Fetch one of the requester's events.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Event", body = EventResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the creator", body = ErrorSchema),
        (status = 404, description = "No such owned event", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "getEvent"
)]
#[get("/events/{id}")]
pub async fn get_event(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<EventResponse>> {
    let id = event_id(&path)?;
    let event = state.event_queries.get_owned(auth.user().id(), id).await?;
    Ok(web::Json(EventResponse::from(&event)))
}

/// Replace every editable field of one of the requester's events.
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Updated event", body = EventResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the creator", body = ErrorSchema),
        (status = 404, description = "No such owned event", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "replaceEvent"
)]
#[put("/events/{id}")]
pub async fn replace_event(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
    payload: web::Json<EventRequest>,
) -> ApiResult<web::Json<EventResponse>> {
    let id = event_id(&path)?;
    let details = EventDetails::try_from(payload.into_inner())?;
    let event = state
        .events
        .replace(auth.user().id(), id, details)
        .await?;
    Ok(web::Json(EventResponse::from(&event)))
}

/// Update selected fields of one of the requester's events.
#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Updated event", body = EventResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the creator", body = ErrorSchema),
        (status = 404, description = "No such owned event", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "modifyEvent"
)]
#[patch("/events/{id}")]
pub async fn modify_event(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
    payload: web::Json<EventRequest>,
) -> ApiResult<web::Json<EventResponse>> {
    let id = event_id(&path)?;
    let changes = EventChanges::try_from(payload.into_inner())?;
    let event = state.events.modify(auth.user().id(), id, changes).await?;
    Ok(web::Json(EventResponse::from(&event)))
}

/// Delete one of the requester's events.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the creator", body = ErrorSchema),
        (status = 404, description = "No such owned event", body = ErrorSchema)
    ),
    tags = ["events"],
    operation_id = "deleteEvent"
)]
#[delete("/events/{id}")]
pub async fn delete_event(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = event_id(&path)?;
    state.events.delete(auth.user().id(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
