//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers that describe domain payloads without coupling
//! domain types to utoipa. Authenticated endpoints use the `Authorization:
//! Token <key>` header scheme.

use crate::inbound::http::events::{EventRequest, EventResponse};
use crate::inbound::http::reports::DayReportResponse;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, InvalidDateSchema, MonthReportSchema, WeekReportSchema,
    YearReportSchema,
};
use crate::inbound::http::users::{
    RegisterRequest, TokenRequest, TokenResponse, UpdateProfileRequest, UserResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the token security scheme in the generated document.
pub const TOKEN_SECURITY_SCHEME: &str = "TokenAuth";

/// Enrich the generated document with the token header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            TOKEN_SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "`Token <key>` where the key is issued by POST /api/v1/users/token.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API, served by Swagger UI at `/docs`.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Calendar backend API",
        description = "Personal calendars: accounts, events and day, week, month and year reports."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenAuth" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::issue_token,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_current_user,
        crate::inbound::http::users::delete_current_user,
        crate::inbound::http::events::create_event,
        crate::inbound::http::events::list_events,
        crate::inbound::http::events::get_event,
        crate::inbound::http::events::replace_event,
        crate::inbound::http::events::modify_event,
        crate::inbound::http::events::delete_event,
        crate::inbound::http::reports::day_events,
        crate::inbound::http::reports::week_events,
        crate::inbound::http::reports::month_events,
        crate::inbound::http::reports::year_events,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        InvalidDateSchema,
        RegisterRequest,
        TokenRequest,
        TokenResponse,
        UpdateProfileRequest,
        UserResponse,
        EventRequest,
        EventResponse,
        DayReportResponse,
        WeekReportSchema,
        MonthReportSchema,
        YearReportSchema,
    )),
    tags(
        (name = "users", description = "Registration, tokens and the current account"),
        (name = "events", description = "Events owned by the requester"),
        (name = "reports", description = "Everyone's events for a day, week, month or year"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
