//! Handlers for the `/permissions` resource (the role permission matrix).

use axum::extract::{Path, State};
use axum::Json;
use condo_core::error::CoreError;
use condo_core::models::{Capability, Resource, RolePermission};
use condo_core::optimistic::Optimistic;
use condo_core::permissions::{group_by_role, toggle, RolePermissionGroup};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{authorize, RequireAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /permissions/{id}/toggle`.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub capability: Capability,
}

/// GET /api/v1/permissions
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<RolePermission>>>> {
    authorize(&state, &user, Resource::AccessControl, Capability::View).await?;
    let rows = state.store.list_permissions().await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/permissions/grouped
pub async fn grouped(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<RolePermissionGroup>>>> {
    authorize(&state, &user, Resource::AccessControl, Capability::View).await?;
    let rows = state.store.list_permissions().await?;
    Ok(Json(DataResponse {
        data: group_by_role(&rows),
    }))
}

/// POST /api/v1/permissions/{id}/toggle
///
/// Flips one capability of one row and writes only that column. On a
/// failed write the error body carries the last known-good row under
/// `restored`, so the client can revert its matrix.
pub async fn toggle_capability(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(input): Json<ToggleRequest>,
) -> AppResult<Json<DataResponse<RolePermission>>> {
    let row = state.store.find_permission(&id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "RolePermission",
            id: id.clone(),
        })
    })?;

    let (toggled, value) = toggle(&row, input.capability);
    let pending = Optimistic::confirmed(row).apply(move |r| *r = toggled);

    let outcome = state
        .store
        .update_permission(&id, input.capability, value)
        .await;

    match pending.settle(outcome) {
        Ok(stored) => {
            tracing::info!(
                permission_id = %id,
                capability = input.capability.as_str(),
                value,
                admin_id = %admin.person_id,
                "Permission toggled"
            );
            Ok(Json(DataResponse { data: stored }))
        }
        Err((restored, err)) => {
            tracing::warn!(
                permission_id = %id,
                capability = input.capability.as_str(),
                restored = restored.allows(input.capability),
                error = %err,
                "Permission toggle failed, rolled back"
            );
            Err(AppError::rolled_back(err, &restored))
        }
    }
}
