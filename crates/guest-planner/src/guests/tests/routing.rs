use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::guests::router::{guest_router, OWNER_HEADER};
use crate::guests::service::GuestService;

fn request(method: Method, uri: &str, owner: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(owner) = owner {
        builder = builder.header(OWNER_HEADER, owner);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

fn emma() -> Value {
    json!({
        "name": "Emma Thompson",
        "category": "Close Friends",
        "groom_rating": 10,
        "bridesmaid_rating": 10,
        "attendance_possibility": 10,
        "notes": "Maid of honor"
    })
}

async fn seeded_router() -> Router {
    let (service, _) = build_service();
    let router = guest_router_with_service(service);
    for guest in party() {
        let body = serde_json::to_value(guest.to_draft()).expect("draft json");
        let response = router
            .clone()
            .oneshot(request(Method::POST, "/api/v1/guests", Some("owner-1"), Some(body)))
            .await
            .expect("seed request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    router
}

#[tokio::test]
async fn missing_owner_header_is_unauthorized() {
    let (service, _) = build_service();
    let router = guest_router_with_service(service);
    let response = router
        .oneshot(request(Method::GET, "/api/v1/guests", None, None))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "user not authenticated");
}

#[tokio::test]
async fn create_returns_the_graded_guest() {
    let (service, _) = build_service();
    let router = guest_router_with_service(service);
    let response = router
        .oneshot(request(
            Method::POST,
            "/api/v1/guests",
            Some("owner-1"),
            Some(emma()),
        ))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], "guest-1");
    assert_eq!(payload["final_grade"], "A");
    assert_eq!(payload["category"], "Close Friends");
    assert_eq!(payload["confirmation"], false);
}

#[tokio::test]
async fn out_of_range_rating_is_unprocessable() {
    let (service, _) = build_service();
    let router = guest_router_with_service(service);
    let mut body = emma();
    body["attendance_possibility"] = json!(11);
    let response = router
        .oneshot(request(Method::POST, "/api/v1/guests", Some("owner-1"), Some(body)))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        "attendance_possibility must be between 1 and 10, got 11"
    );
}

#[tokio::test]
async fn listing_applies_filter_search_and_sort() {
    let router = seeded_router().await;
    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/guests?category=Friends&sort=name-desc",
            Some("owner-1"),
            None,
        ))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["showing"], 2);
    assert_eq!(payload["total"], 6);
    assert_eq!(payload["sort"], "name-desc");
    assert_eq!(payload["guests"][0]["name"], "Rachel Green");
    assert_eq!(payload["guests"][1]["name"], "Brian Miller");
}

#[tokio::test]
async fn unknown_sort_is_unprocessable() {
    let router = seeded_router().await;
    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/guests?sort=height",
            Some("owner-1"),
            None,
        ))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn confirmation_and_invite_flags_are_set() {
    let router = seeded_router().await;
    let response = router
        .clone()
        .oneshot(request(
            Method::POST,
            "/api/v1/guests/guest-3/confirmation",
            Some("owner-1"),
            Some(json!({ "confirmation": true })),
        ))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["confirmation"], true);
    assert_eq!(payload["final_grade"], "C");

    let response = router
        .oneshot(request(
            Method::POST,
            "/api/v1/guests/guest-3/invite",
            Some("owner-1"),
            Some(json!({ "invite_sent": true })),
        ))
        .await
        .expect("route response");
    let payload = read_json_body(response).await;
    assert_eq!(payload["invite_sent"], true);
    assert_eq!(payload["confirmation"], true);
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let router = seeded_router().await;
    let mut body = emma();
    body["name"] = json!("Photographer Team");
    body["category"] = json!("Vendors");
    let response = router
        .clone()
        .oneshot(request(
            Method::PUT,
            "/api/v1/guests/guest-4",
            Some("owner-1"),
            Some(body),
        ))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["final_grade"], "A");

    let response = router
        .clone()
        .oneshot(request(
            Method::DELETE,
            "/api/v1/guests/guest-4",
            Some("owner-1"),
            None,
        ))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/guests/guest-4",
            Some("owner-1"),
            None,
        ))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_owners_cannot_reach_a_guest() {
    let router = seeded_router().await;
    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/guests/guest-1",
            Some("owner-2"),
            None,
        ))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn statistics_summarize_the_collection() {
    let router = seeded_router().await;
    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/guests/statistics",
            Some("owner-1"),
            None,
        ))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["total_guests"], 6);
    assert_eq!(payload["high_priority_guests"], 3);
    assert_eq!(payload["top_category_label"], "Close Friends");
    assert_eq!(payload["grade_distribution"].as_array().map(Vec::len), Some(5));
    assert_eq!(payload["top_rated"][0]["name"], "Emma Thompson");
}

#[tokio::test]
async fn statistics_for_an_empty_list_is_not_found() {
    let (service, _) = build_service();
    let router = guest_router_with_service(service);
    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/guests/statistics",
            Some("owner-1"),
            None,
        ))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_streams_a_dated_csv() {
    let router = seeded_router().await;
    let response = router
        .oneshot(request(
            Method::GET,
            "/api/v1/guests/export",
            Some("owner-1"),
            None,
        ))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    assert_eq!(content_type.as_deref(), Some("text/csv; charset=utf-8"));

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .expect("content disposition");
    assert!(disposition.starts_with("attachment; filename=\"wedding-guest-list-"));
    assert!(disposition.ends_with(".csv\""));

    let body = read_text_body(response).await;
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("Name,Category,Groom Rating,Bridesmaid Rating,Attendance Possibility,Final Grade,Invite Sent,Confirmed,Notes")
    );
    assert_eq!(
        lines.next(),
        Some("Margaret Wilson,Groom's Family,9,6,8,B,No,No,Aunt from Denver")
    );
    assert_eq!(body.lines().count(), 7);
}

#[tokio::test]
async fn store_outage_is_an_internal_error() {
    let router = guest_router(Arc::new(GuestService::new(Arc::new(UnavailableRepository))));
    let response = router
        .oneshot(request(Method::GET, "/api/v1/guests", Some("owner-1"), None))
        .await
        .expect("route response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
