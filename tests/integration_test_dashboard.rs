mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Datelike, Duration, Utc};
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
                "vin": vin, "make": "Hyundai", "model": "Tucson", "year": 2021,
                "price_cents": 2_300_000, "mileage": 25_000
            }).to_string())).unwrap()
    ).await.unwrap();
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

async fn record_sale(app: &TestApp, vehicle_id: &str, amount_cents: i64) {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/transactions")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "vehicle_id": vehicle_id, "kind": "SALE",
                "amount_cents": amount_cents,
                "occurred_on": Utc::now().format("%Y-%m-%d").to_string()
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_recompute_sums_current_month() {
    let app = TestApp::new().await;
    let v1 = create_vehicle(&app, "VIN-DB-1").await;
    let v2 = create_vehicle(&app, "VIN-DB-2").await;
    let v3 = create_vehicle(&app, "VIN-DB-3").await;

    record_sale(&app, &v1, 2_000_000).await;
    record_sale(&app, &v2, 3_000_000).await;

    // a booked test drive and an intake form for the month's counters
    let date = (Utc::now() + Duration::days(7)).format("%Y-%m-%d").to_string();
    let booked_in_month = date[..7] == Utc::now().format("%Y-%m").to_string();
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/test-drives")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "vehicle_id": v3,
                "name": "Metrics Tester", "email": "metrics@example.com",
                "date": date, "time": "10:00"
            }).to_string())).unwrap()
    ).await.unwrap();

    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/sell-trade")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Seller", "email": "seller@example.com",
                "make": "Audi", "model": "A4", "year": 2016, "mileage": 90_000,
                "condition": "FAIR", "kind": "SELL"
            }).to_string())).unwrap()
    ).await.unwrap();

    let now = Utc::now();
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/dashboard/recompute")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"year": now.year(), "month": now.month()}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let metric = parse_body(res).await;

    assert_eq!(metric["vehicles_sold"], 2);
    assert_eq!(metric["gross_revenue_cents"], 5_000_000);
    assert_eq!(metric["avg_sale_price_cents"], 2_500_000);
    if booked_in_month {
        assert_eq!(metric["test_drives_booked"], 1);
    }
    assert_eq!(metric["submissions_received"], 1);
}

#[tokio::test]
async fn test_recompute_is_idempotent() {
    let app = TestApp::new().await;
    let v1 = create_vehicle(&app, "VIN-DB-4").await;
    record_sale(&app, &v1, 1_000_000).await;

    let now = Utc::now();
    let payload = json!({"year": now.year(), "month": now.month()}).to_string();

    for _ in 0..2 {
        let res = app.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/v1/admin/dashboard/recompute")
                .header("Content-Type", "application/json")
                .body(Body::from(payload.clone())).unwrap()
        ).await.unwrap();
        let metric = parse_body(res).await;
        assert_eq!(metric["vehicles_sold"], 1);
        assert_eq!(metric["gross_revenue_cents"], 1_000_000);
    }
}

#[tokio::test]
async fn test_empty_month_recomputes_to_zeroes() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/dashboard/recompute")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"year": 2020, "month": 1}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let metric = parse_body(res).await;
    assert_eq!(metric["vehicles_sold"], 0);
    assert_eq!(metric["gross_revenue_cents"], 0);
    assert_eq!(metric["avg_sale_price_cents"], 0);
}

#[tokio::test]
async fn test_invalid_month_rejected() {
    let app = TestApp::new().await;
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/dashboard/recompute")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"year": 2024, "month": 13}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_endpoint_refreshes_and_lists() {
    let app = TestApp::new().await;
    let v1 = create_vehicle(&app, "VIN-DB-5").await;
    record_sale(&app, &v1, 2_100_000).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/dashboard/metrics")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let list = parse_body(res).await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["vehicles_sold"], 1);
}
