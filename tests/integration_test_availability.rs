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
                "vin": vin, "make": "Honda", "model": "Civic", "year": 2021,
                "price_cents": 2_150_000, "mileage": 30_000
            }).to_string())).unwrap()
    ).await.unwrap();
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

fn future_date(days: i64) -> String {
    (Utc::now() + Duration::days(days)).format("%Y-%m-%d").to_string()
}

async fn get_slots(app: &TestApp, date: &str) -> Vec<String> {
    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/test-drives/slots?date={}", date))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["slots"]
        .as_array().unwrap()
        .iter().map(|s| s.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_open_day_lists_all_business_hour_slots() {
    let app = TestApp::new().await;
    let slots = get_slots(&app, &future_date(7)).await;

    // 09:00 through 18:00 hourly, close at 19:00
    assert_eq!(slots.len(), 10);
    assert_eq!(slots.first().map(String::as_str), Some("09:00"));
    assert_eq!(slots.last().map(String::as_str), Some("18:00"));
    assert!(!slots.contains(&"19:00".to_string()));
}

#[tokio::test]
async fn test_booked_slot_disappears_from_listing() {
    let app = TestApp::new().await;
    let vehicle_id = create_vehicle(&app, "VIN-AV-1").await;
    let date = future_date(7);

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/test-drives")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "vehicle_id": vehicle_id,
                "name": "Cara", "email": "cara@example.com",
                "date": date, "time": "12:00"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let slots = get_slots(&app, &date).await;
    assert!(!slots.contains(&"12:00".to_string()));
    assert_eq!(slots.len(), 9);
}

#[tokio::test]
async fn test_blocked_range_removes_covered_slots() {
    let app = TestApp::new().await;
    let date = future_date(7);

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/blocked-slots")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "date": date, "start_time": "10:00", "end_time": "12:00",
                "reason": "staff meeting"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let slots = get_slots(&app, &date).await;
    // inclusive bounds: 10:00, 11:00 and 12:00 are all gone
    for hidden in ["10:00", "11:00", "12:00"] {
        assert!(!slots.contains(&hidden.to_string()), "{} should be blocked", hidden);
    }
    assert!(slots.contains(&"09:00".to_string()));
    assert!(slots.contains(&"13:00".to_string()));
}

#[tokio::test]
async fn test_all_day_block_empties_listing() {
    let app = TestApp::new().await;
    let date = future_date(7);

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/blocked-slots")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "date": date, "all_day": true, "reason": "closed for holiday"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let slots = get_slots(&app, &date).await;
    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_slots_require_date_param() {
    let app = TestApp::new().await;
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/test-drives/slots")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancelled_booking_reopens_slot_in_listing() {
    let app = TestApp::new().await;
    let vehicle_id = create_vehicle(&app, "VIN-AV-2").await;
    let date = future_date(7);

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/test-drives")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "vehicle_id": vehicle_id,
                "name": "Dan", "email": "dan@example.com",
                "date": date, "time": "15:00"
            }).to_string())).unwrap()
    ).await.unwrap();
    let booking_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    assert!(!get_slots(&app, &date).await.contains(&"15:00".to_string()));

    app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/v1/admin/test-drives/{}/cancel", booking_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({}).to_string())).unwrap()
    ).await.unwrap();

    assert!(get_slots(&app, &date).await.contains(&"15:00".to_string()));
}
