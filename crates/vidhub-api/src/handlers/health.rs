//! Health check handlers.

use axum::extract::State;

use vidhub_core::error::AppError;
use vidhub_service::HealthReport;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /
pub async fn welcome() -> &'static str {
    "Welcome to VidHub"
}

/// GET /api/v1/healthcheck
pub async fn healthcheck(
    State(state): State<AppState>,
) -> Result<ApiResponse<HealthReport>, ApiError> {
    let report = state.health_service.check().await;
    if !report.is_healthy() {
        return Err(AppError::service_unavailable(format!(
            "Service is degraded (database: {}, storage: {})",
            report.database, report.storage
        ))
        .into());
    }
    Ok(ApiResponse::ok(report, "Service is running"))
}
