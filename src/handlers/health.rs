//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use crate::models::MaintenanceSettings;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    maintenance: bool,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let settings = MaintenanceSettings::load_or_default(state.settings.as_ref()).await;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        maintenance: settings.active,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
