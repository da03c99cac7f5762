mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_vehicle(app: &TestApp, vin: &str, make: &str) -> Value {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/vehicles")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "vin": vin, "make": make, "model": "Outback", "year": 2020,
                "price_cents": 2_400_000, "mileage": 42_000,
                "description": "One owner, clean title"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await
}

#[tokio::test]
async fn test_vehicle_crud() {
    let app = TestApp::new().await;

    let created = create_vehicle(&app, "VIN-CRUD-1", "Subaru").await;
    assert_eq!(created["status"], "AVAILABLE");
    let id = created["id"].as_str().unwrap();

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/vehicles/{}", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["vin"], "VIN-CRUD-1");

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/admin/vehicles/{}", id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"price_cents": 2_200_000, "status": "RESERVED"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["price_cents"], 2_200_000);
    assert_eq!(updated["status"], "RESERVED");

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/admin/vehicles/{}", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/vehicles/{}", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vehicle_listing_with_status_filter() {
    let app = TestApp::new().await;
    let v1 = create_vehicle(&app, "VIN-LIST-1", "Kia").await;
    create_vehicle(&app, "VIN-LIST-2", "Kia").await;

    app.router.clone().oneshot(
        Request::builder().method("PUT")
            .uri(format!("/api/v1/admin/vehicles/{}", v1["id"].as_str().unwrap()))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "SOLD"}).to_string())).unwrap()
    ).await.unwrap();

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/vehicles?status=AVAILABLE")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["vin"], "VIN-LIST-2");

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/vehicles?status=PARKED")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_vin_rejected() {
    let app = TestApp::new().await;
    create_vehicle(&app, "VIN-DUP-1", "Nissan").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/vehicles")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "vin": "VIN-DUP-1", "make": "Nissan", "model": "Altima", "year": 2019,
                "price_cents": 1_700_000, "mileage": 60_000
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_customer_crud() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/admin/customers")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Frank Ocean", "email": "frank@example.com", "phone": "555-0100"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/admin/customers/{}", id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"notes": "interested in SUVs"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await["notes"], "interested in SUVs");

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/customers")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/admin/customers/{}", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_submission_intake_and_review() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/sell-trade")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "Grace Lee", "email": "grace@example.com",
                "make": "Volvo", "model": "XC60", "year": 2018, "mileage": 78_000,
                "condition": "GOOD", "asking_price_cents": 1_500_000,
                "kind": "TRADE_IN"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let created = parse_body(res).await;
    assert_eq!(created["status"], "NEW");
    let id = created["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT")
            .uri(format!("/api/v1/admin/submissions/{}", id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "OFFER_MADE", "notes": "offered 14k"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "OFFER_MADE");

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/submissions?status=OFFER_MADE")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/submissions?status=NEW")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_submission_rejects_unknown_kind_and_status() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/sell-trade")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "name": "H", "email": "h@example.com",
                "make": "BMW", "model": "i3", "year": 2017, "mileage": 50_000,
                "condition": "FAIR", "kind": "LEASE"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri("/api/v1/admin/submissions/nope")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "REVIEWED"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
