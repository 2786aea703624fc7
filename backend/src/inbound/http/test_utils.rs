//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use crate::Trace;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{configure_api, json_config};
use crate::outbound::memory::InMemoryStore;
use crate::test_support::{FixedClock, date};

/// Date the test clock reports as today (a Thursday).
pub const TODAY: &str = "2024-08-15";

pub const PASSWORD: &str = "correct horse battery staple";

/// Handler state over a fresh in-memory store and a clock frozen on [`TODAY`].
pub fn test_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::from_repositories(
        store.clone(),
        store.clone(),
        store,
        Arc::new(FixedClock::at_noon(date(TODAY))),
    )
}

/// Full `/api/v1` application wrapped in the tracing middleware.
pub fn test_app(
    state: HttpState,
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
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
}

/// `Authorization` header for `token`.
pub fn token_header(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Token {token}"))
}

/// Register an account named `name` and return its API token.
pub async fn sign_up<S, B>(app: &S, email: &str, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let register = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({"email": email, "password": PASSWORD, "name": name}))
        .to_request();
    let res = actix_test::call_service(app, register).await;
    assert!(res.status().is_success(), "registration failed: {}", res.status());

    let login = actix_test::TestRequest::post()
        .uri("/api/v1/users/token")
        .set_json(json!({"email": email, "password": PASSWORD}))
        .to_request();
    let body: Value = actix_test::read_body_json(actix_test::call_service(app, login).await).await;
    body["token"]
        .as_str()
        .expect("token in response")
        .to_owned()
}

/// Create an event through the API and return its id.
pub async fn create_event<S, B>(app: &S, token: &str, name: &str, day: &str, start: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/events")
        .insert_header(token_header(token))
        .set_json(json!({
            "name": name,
            "description": format!("{name} description"),
            "date": day,
            "start_event": start,
            "end_event": start,
        }))
        .to_request();
    let res = actix_test::call_service(app, req).await;
    assert!(res.status().is_success(), "event creation failed: {}", res.status());
    let body: Value = actix_test::read_body_json(res).await;
    body["id"].as_str().expect("event id").to_owned()
}
