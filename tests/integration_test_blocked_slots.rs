mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_vehicle(app: &TestApp, vin: &str) -> String {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/vehicles")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "vin": vin, "make": "Ford", "model": "F-150", "year": 2023,
                "price_cents": 4_890_000, "mileage": 5_000
            }).to_string())).unwrap()
    ).await.unwrap();
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

fn future_date(days: i64) -> String {
    (Utc::now() + Duration::days(days)).format("%Y-%m-%d").to_string()
}

async fn book(app: &TestApp, vehicle_id: &str, date: &str, time: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/test-drives")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "vehicle_id": vehicle_id,
                "name": "Eve", "email": "eve@example.com",
                "date": date, "time": time
            }).to_string())).unwrap()
    ).await.unwrap()
}

async fn block(app: &TestApp, body: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/blocked-slots")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_booking_into_blocked_range_rejected_with_reason() {
    let app = TestApp::new().await;
    let vehicle_id = create_vehicle(&app, "VIN-BLK-1").await;
    let date = future_date(7);

    let res = block(&app, json!({
        "date": date, "start_time": "13:00", "end_time": "15:00"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    for time in ["13:00", "14:00", "15:00"] {
        let res = book(&app, &vehicle_id, &date, time).await;
        assert_eq!(res.status(), StatusCode::CONFLICT, "{} should be blocked", time);
        let body = parse_body(res).await;
        assert_eq!(body["reason"], "BLOCKED");
    }

    // just outside the inclusive range
    let res = book(&app, &vehicle_id, &date, "16:00").await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_all_day_block_rejects_every_slot() {
    let app = TestApp::new().await;
    let vehicle_id = create_vehicle(&app, "VIN-BLK-2").await;
    let date = future_date(8);

    let res = block(&app, json!({"date": date, "all_day": true})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let created = parse_body(res).await;
    assert_eq!(created["all_day"], true);
    assert_eq!(created["start_time"], "09:00");
    assert_eq!(created["end_time"], "19:00");

    for time in ["09:00", "12:00", "18:00"] {
        let res = book(&app, &vehicle_id, &date, time).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(parse_body(res).await["reason"], "BLOCKED");
    }
}

#[tokio::test]
async fn test_deleting_block_reopens_booking() {
    let app = TestApp::new().await;
    let vehicle_id = create_vehicle(&app, "VIN-BLK-3").await;
    let date = future_date(7);

    let res = block(&app, json!({
        "date": date, "start_time": "10:00", "end_time": "11:00"
    })).await;
    let slot_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let rejected = book(&app, &vehicle_id, &date, "10:00").await;
    assert_eq!(rejected.status(), StatusCode::CONFLICT);

    let del = app.router.clone().oneshot(
        Request::builder().method("DELETE")
            .uri(format!("/api/v1/admin/blocked-slots/{}", slot_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(del.status(), StatusCode::OK);

    let allowed = book(&app, &vehicle_id, &date, "10:00").await;
    assert_eq!(allowed.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_blocked_slots_by_range() {
    let app = TestApp::new().await;
    let d1 = future_date(7);
    let d2 = future_date(9);
    let d3 = future_date(30);

    block(&app, json!({"date": d1, "start_time": "09:00", "end_time": "10:00"})).await;
    block(&app, json!({"date": d2, "all_day": true})).await;
    block(&app, json!({"date": d3, "all_day": true})).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/admin/blocked-slots?start={}&end={}", d1, future_date(10)))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_partial_block_requires_both_bounds() {
    let app = TestApp::new().await;
    let res = block(&app, json!({
        "date": future_date(7), "start_time": "10:00"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_edit_may_move_into_blocked_time() {
    let app = TestApp::new().await;
    let vehicle_id = create_vehicle(&app, "VIN-BLK-4").await;
    let date = future_date(7);

    let res = book(&app, &vehicle_id, &date, "09:00").await;
    let booking_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    block(&app, json!({
        "date": date, "start_time": "16:00", "end_time": "17:00"
    })).await;

    // staff edits skip the availability checker: moving into blocked time is allowed
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT")
            .uri(format!("/api/v1/admin/test-drives/{}", booking_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"time": "16:00"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["time"], "16:00");
}

#[tokio::test]
async fn test_admin_edit_onto_occupied_slot_rejected() {
    let app = TestApp::new().await;
    let v1 = create_vehicle(&app, "VIN-BLK-5").await;
    let v2 = create_vehicle(&app, "VIN-BLK-6").await;
    let date = future_date(7);

    book(&app, &v1, &date, "09:00").await;
    let res = book(&app, &v2, &date, "10:00").await;
    let second_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    // the active-slot unique index still guards exclusivity on edits
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT")
            .uri(format!("/api/v1/admin/test-drives/{}", second_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"time": "09:00"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["reason"], "BOOKED");
}
