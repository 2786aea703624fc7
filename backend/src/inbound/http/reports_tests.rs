//! Tests for period report handlers.

use super::*;
use crate::inbound::http::test_utils::{
    TODAY, create_event, sign_up, test_app, test_state, token_header,
};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

async fn get_report<S, B>(app: &S, token: &str, uri: &str) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    let req = actix_test::TestRequest::get()
        .uri(uri)
        .insert_header(token_header(token))
        .to_request();
    let res = actix_test::call_service(app, req).await;
    let status = res.status();
    (status, actix_test::read_body_json(res).await)
}

#[rstest]
#[case("/api/v1/events/day?date=not-a-date")]
#[case("/api/v1/events/week?date=not-a-date")]
#[case("/api/v1/events/month?date=2024-02-30")]
#[case("/api/v1/events/year?date=2024/01/01")]
#[case("/api/v1/events/week?date=%202024-08-15")]
#[case("/api/v1/events/week?date=%2B2024-08-15")]
#[case("/api/v1/events/day?date=02024-08-15")]
#[actix_web::test]
async fn malformed_dates_use_the_fixed_body(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(test_state())).await;
    let token = sign_up(&app, "ada@example.com", "Ada Lovelace").await;

    let (status, body) = get_report(&app, &token, uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid date format."}));
}

#[rstest]
#[actix_web::test]
async fn reports_require_authentication() {
    let app = actix_test::init_service(test_app(test_state())).await;

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/events/week")
        .to_request();

    assert_eq!(
        actix_test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[rstest]
#[actix_web::test]
async fn week_report_has_seven_buckets_and_everyones_events() {
    let app = actix_test::init_service(test_app(test_state())).await;
    let ada = sign_up(&app, "ada@example.com", "Ada Lovelace").await;
    let grace = sign_up(&app, "grace@example.com", "Grace Hopper").await;
    create_event(&app, &ada, "Standup", "2024-08-15", "09:00").await;
    create_event(&app, &grace, "Lunch", "2024-08-15", "12:00").await;
    create_event(&app, &grace, "Next week", "2024-08-19", "09:00").await;

    let (status, body) = get_report(&app, &ada, "/api/v1/events/week?date=2024-08-15").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["week"], "2024-08-12 - 2024-08-18");
    let days = body["days"].as_array().expect("days array");
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["day"], "2024-08-12");
    assert_eq!(days[6]["day"], "2024-08-18");
    let thursday = days[3]["events"].as_array().expect("events array");
    let names: Vec<&str> = thursday
        .iter()
        .filter_map(|event| event["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Standup", "Lunch"]);
    assert_eq!(thursday[1]["first_name"], "Grace");
    assert!(days[0]["events"].as_array().is_some_and(Vec::is_empty));
}

#[rstest]
#[case("2024-02-15", "2024-02-01 - 2024-02-29", 29)]
#[case("2023-02-15", "2023-02-01 - 2023-02-28", 28)]
#[actix_web::test]
async fn month_report_covers_the_whole_month(
    #[case] date: &str,
    #[case] range: &str,
    #[case] buckets: usize,
) {
    let app = actix_test::init_service(test_app(test_state())).await;
    let token = sign_up(&app, "ada@example.com", "Ada Lovelace").await;

    let (status, body) =
        get_report(&app, &token, &format!("/api/v1/events/month?date={date}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["month"], range);
    assert_eq!(body["days"].as_array().map(Vec::len), Some(buckets));
}

#[rstest]
#[actix_web::test]
async fn year_report_defaults_to_the_current_year() {
    let app = actix_test::init_service(test_app(test_state())).await;
    let token = sign_up(&app, "ada@example.com", "Ada Lovelace").await;

    let (status, body) = get_report(&app, &token, "/api/v1/events/year").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], "2024-01-01 - 2024-12-31");
    assert_eq!(body["days"].as_array().map(Vec::len), Some(366));
}

#[rstest]
#[case("/api/v1/events/day")]
#[case("/api/v1/events/day?date=")]
#[actix_web::test]
async fn day_report_defaults_to_today(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(test_state())).await;
    let token = sign_up(&app, "ada@example.com", "Ada Lovelace").await;
    create_event(&app, &token, "Standup", TODAY, "09:00").await;
    create_event(&app, &token, "Tomorrow", "2024-08-16", "09:00").await;

    let (status, body) = get_report(&app, &token, uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["day"], TODAY);
    let events = body["events"].as_array().expect("events array");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["name"], "Standup");
}

#[rstest]
#[actix_web::test]
async fn repeated_date_uses_the_last_value() {
    let app = actix_test::init_service(test_app(test_state())).await;
    let token = sign_up(&app, "ada@example.com", "Ada Lovelace").await;

    let (status, body) = get_report(
        &app,
        &token,
        "/api/v1/events/week?date=2024-08-15&date=2024-08-20",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["week"], "2024-08-19 - 2024-08-25");
}

#[rstest]
#[actix_web::test]
async fn unpadded_day_is_reported_in_canonical_form() {
    let app = actix_test::init_service(test_app(test_state())).await;
    let token = sign_up(&app, "ada@example.com", "Ada Lovelace").await;
    create_event(&app, &token, "Dentist", "2024-08-05", "15:00").await;

    let (status, body) = get_report(&app, &token, "/api/v1/events/day?date=2024-8-5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["day"], "2024-08-05");
    assert_eq!(body["events"].as_array().map(Vec::len), Some(1));
}

#[rstest]
#[case(vec![], None)]
#[case(vec![("other", "x")], None)]
#[case(vec![("date", "2024-01-01"), ("other", "x"), ("date", "2024-02-01")], Some("2024-02-01"))]
fn query_pairs_keep_the_last_date(
    #[case] pairs: Vec<(&str, &str)>,
    #[case] expected: Option<&str>,
) {
    let pairs = pairs
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect();

    assert_eq!(ReportQuery::from_pairs(pairs).date.as_deref(), expected);
}

#[rstest]
fn period_envelope_is_keyed_by_period() {
    let response = PeriodReportResponse {
        period: Period::Month,
        range: "2024-02-01 - 2024-02-29".to_owned(),
        days: Vec::new(),
    };

    assert_eq!(
        serde_json::to_value(&response).expect("serialises"),
        json!({"month": "2024-02-01 - 2024-02-29", "days": []})
    );
}
