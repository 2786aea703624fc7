//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use tracing::debug;

use crate::domain::Error;

pub mod auth;
pub mod error;
pub mod events;
pub mod health;
pub mod reports;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// Report routes are registered before `/events/{id}` so `day`, `week`,
/// `month` and `year` are never parsed as identifiers.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use calendar_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::issue_token)
        .service(users::current_user)
        .service(users::update_current_user)
        .service(users::delete_current_user)
        .service(reports::day_events)
        .service(reports::week_events)
        .service(reports::month_events)
        .service(reports::year_events)
        .service(events::create_event)
        .service(events::list_events)
        .service(events::get_event)
        .service(events::replace_event)
        .service(events::modify_event)
        .service(events::delete_event);
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON payload");
    Error::invalid_request(format!("JSON parse error - {err}")).into()
}

/// JSON extractor configuration returning the domain error envelope for
/// malformed bodies.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
