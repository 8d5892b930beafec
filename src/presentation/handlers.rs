// HTTP request handlers
use crate::application::error::GatewayError;
use crate::domain::dashboard::DashboardStats;
use crate::domain::validation::parse_complaint;
use crate::presentation::app_state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const SERVICE_STATUS: &str = "Complaint Gateway Online";

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoggedComplaint {
    pub message: &'static str,
    pub data: Vec<Value>,
}

/// Liveness and version probe
pub async fn root_status() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: SERVICE_STATUS,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Validate and store a citizen complaint
pub async fn log_complaint(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<LoggedComplaint>), GatewayError> {
    // Validation runs before any store call
    let complaint = parse_complaint(&body)?;
    let data = state.complaint_service.log_complaint(complaint).await?;

    Ok((
        StatusCode::CREATED,
        Json(LoggedComplaint {
            message: "Logged Successfully",
            data,
        }),
    ))
}

/// Aggregate counts for the operations dashboard
pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardStats>, GatewayError> {
    let stats = state.dashboard_service.get_stats().await?;
    Ok(Json(stats))
}
