//! Handler for `/dashboard/stats`.

use axum::extract::State;
use axum::Json;
use condo_core::dashboard::{compute_stats, DashboardStats};
use condo_core::models::{AccessLog, Capability, Resource};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::authorize;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of access logs shown on the dashboard.
const RECENT_LOGS: usize = 5;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_logs: Vec<AccessLog>,
}

/// GET /api/v1/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    authorize(&state, &user, Resource::Dashboard, Capability::View).await?;

    let spots = state.store.list_parking_spots().await?;
    let packages = state.store.list_packages().await?;
    let people = state.store.list_people().await?;
    let mut logs = state.store.list_access_logs().await?;
    logs.truncate(RECENT_LOGS);

    Ok(Json(DataResponse {
        data: DashboardResponse {
            stats: compute_stats(&spots, &packages, &people),
            recent_logs: logs,
        },
    }))
}
