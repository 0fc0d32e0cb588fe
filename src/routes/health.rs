use axum::response::Json;
use serde_json::json;

/// Health check endpoint handler.
///
/// Returns a static JSON response indicating the server is operational,
/// for load balancers, uptime monitors, and container probes. No auth,
/// no store round-trip.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/ping`
/// - **Response**: `{"status":"pong"}` with 200 OK
pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "status": "pong" }))
}
