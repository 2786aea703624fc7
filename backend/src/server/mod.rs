//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::{bootstrap_superuser, build_http_state};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use calendar_backend::Trace;
use calendar_backend::config::SuperuserSettings;
use calendar_backend::doc::ApiDoc;
use calendar_backend::inbound::http::health::{HealthState, live, ready};
use calendar_backend::inbound::http::state::HttpState;
use calendar_backend::inbound::http::{configure_api, json_config};

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(json_config())
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
        .service(ready)
        .service(live)
        .service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// When `superuser` is set the account is created before the listener
/// binds; an existing account with that email is left untouched.
///
/// # Errors
/// Propagates [`std::io::Error`] when bootstrapping the superuser, binding
/// the socket or starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    superuser: Option<SuperuserSettings>,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    if let Some(superuser) = superuser {
        bootstrap_superuser(http_state.accounts.as_ref(), &superuser)
            .await
            .map_err(std::io::Error::other)?;
    }

    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
