//! Health check handlers

use axum::Json;
use serde::Serialize;

use shared::calendar;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub calendar: String,
}

/// Health check endpoint handler
pub async fn health_check() -> Json<HealthResponse> {
    let calendar_status = match calendar::validate() {
        Ok(()) => "valid".to_string(),
        Err(e) => format!("invalid: {}", e),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        calendar: calendar_status,
    })
}
