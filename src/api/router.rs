use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{
    health, vehicle, customer, test_drive, blocked_slot, submission, transaction,
    dashboard, cron,
};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Public inventory
        .route("/api/v1/vehicles", get(vehicle::list_vehicles))
        .route("/api/v1/vehicles/{vehicle_id}", get(vehicle::get_vehicle))

        // Public booking flow
        .route("/api/v1/test-drives/slots", get(test_drive::get_slots))
        .route("/api/v1/test-drives", post(test_drive::create_test_drive))

        // Public sell/trade intake
        .route("/api/v1/sell-trade", post(submission::create_submission))

        // Cron (shared-secret bearer)
        .route("/api/v1/cron/reminders", post(cron::run_reminders))

        // Admin - Inventory
        .route("/api/v1/admin/vehicles", post(vehicle::create_vehicle))
        .route("/api/v1/admin/vehicles/{vehicle_id}", axum::routing::put(vehicle::update_vehicle).delete(vehicle::delete_vehicle))

        // Admin - Customers
        .route("/api/v1/admin/customers", get(customer::list_customers).post(customer::create_customer))
        .route("/api/v1/admin/customers/{customer_id}", get(customer::get_customer).put(customer::update_customer).delete(customer::delete_customer))

        // Admin - Appointments
        .route("/api/v1/admin/test-drives", get(test_drive::list_test_drives).post(test_drive::admin_create_test_drive))
        .route("/api/v1/admin/test-drives/{test_drive_id}", get(test_drive::get_test_drive).put(test_drive::update_test_drive).delete(test_drive::delete_test_drive))
        .route("/api/v1/admin/test-drives/{test_drive_id}/cancel", post(test_drive::cancel_test_drive))

        // Admin - Blocked time
        .route("/api/v1/admin/blocked-slots", get(blocked_slot::list_blocked_slots).post(blocked_slot::create_blocked_slot))
        .route("/api/v1/admin/blocked-slots/{slot_id}", axum::routing::delete(blocked_slot::delete_blocked_slot))

        // Admin - Sell/trade review
        .route("/api/v1/admin/submissions", get(submission::list_submissions))
        .route("/api/v1/admin/submissions/{submission_id}", get(submission::get_submission).put(submission::update_submission).delete(submission::delete_submission))

        // Admin - Transactions
        .route("/api/v1/admin/transactions", get(transaction::list_transactions).post(transaction::create_transaction))
        .route("/api/v1/admin/transactions/{transaction_id}", get(transaction::get_transaction).delete(transaction::delete_transaction))

        // Admin - Dashboard
        .route("/api/v1/admin/dashboard/metrics", get(dashboard::get_metrics))
        .route("/api/v1/admin/dashboard/recompute", post(dashboard::recompute_metrics))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
