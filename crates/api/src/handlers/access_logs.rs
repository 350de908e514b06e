//! Handlers for the append-only `/access-logs` resource.

use axum::extract::State;
use axum::Json;
use condo_core::models::{AccessLog, Capability, Resource};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::authorize;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub summary: String,
    pub total_logs: usize,
}

/// GET /api/v1/access-logs
///
/// Newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<AccessLog>>>> {
    authorize(&state, &user, Resource::Parking, Capability::View).await?;
    let logs = state.store.list_access_logs().await?;
    Ok(Json(DataResponse { data: logs }))
}

/// GET /api/v1/access-logs/analysis
pub async fn analysis(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<AnalysisResponse>>> {
    authorize(&state, &user, Resource::Parking, Capability::View).await?;
    let logs = state.store.list_access_logs().await?;
    let summary = state.notifier.analyze_access_logs(&logs).await;
    Ok(Json(DataResponse {
        data: AnalysisResponse {
            summary,
            total_logs: logs.len(),
        },
    }))
}
