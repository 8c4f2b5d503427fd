use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use doctor_cell::router::doctor_routes;
use shared_database::InMemoryRecordStore;
use shared_utils::test_utils::TestDoctor;

fn create_test_app() -> Router {
    let store = InMemoryRecordStore::with_doctors(vec![
        TestDoctor::surgeon("DOC001", &["Monday"], &[("09:00", "13:00")]),
        TestDoctor::anesthesiologist("DOC002", &["Monday", "Tuesday"], &[("08:00", "16:00")]),
        TestDoctor::new("DOC003", "Dr. Priya Nair", "Orthopedic Surgeon", &["Friday"], &[]),
    ]);
    doctor_routes(Arc::new(store))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_list_doctors_by_role() {
    let (status, json) = get_json(create_test_app(), "/?role=anesthesiologist").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["doctors"][0]["doctorId"], "DOC002");
}

#[tokio::test]
async fn test_list_doctors_with_search() {
    let (status, json) = get_json(create_test_app(), "/?search=priya").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["doctors"][0]["name"], "Dr. Priya Nair");
}

#[tokio::test]
async fn test_list_doctors_rejects_unknown_role() {
    let (status, _) = get_json(create_test_app(), "/?role=nurse").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_doctor_by_storage_id() {
    let (status, json) = get_json(create_test_app(), "/doc-doc001").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["doctorId"], "DOC001");
    assert_eq!(json["availableDays"][0], "Monday");
}

#[tokio::test]
async fn test_get_unknown_doctor() {
    let (status, json) = get_json(create_test_app(), "/DOC404").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("DOC404"));
}

#[tokio::test]
async fn test_availability_endpoint() {
    let (status, json) = get_json(
        create_test_app(),
        "/DOC001/availability?date=2024-06-03&start=10:00&end=11:00",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["available"], true);
    assert_eq!(json["weekday"], "Monday");

    let (_, json) = get_json(
        create_test_app(),
        "/DOC001/availability?date=2024-06-03&start=07:00&end=08:00",
    )
    .await;

    assert_eq!(json["available"], false);
    assert_eq!(json["reason"], "TimeMismatch");
    assert_eq!(json["slots"][0]["from"], "09:00");
}

#[tokio::test]
async fn test_theatre_suggestions() {
    let (status, json) = get_json(create_test_app(), "/DOC003/theatres").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["specialization"], "Orthopedic Surgeon");
    assert_eq!(json["theatres"][0], "OT-4 – Orthopedic OT");
}
