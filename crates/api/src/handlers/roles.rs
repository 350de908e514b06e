//! Handlers for the `/roles` resource.
//!
//! Listing needs `role_management:view`; every change is admin only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use condo_core::error::{require_non_blank, CoreError};
use condo_core::models::{Capability, NewRole, Resource, RoleDefinition, RoleUpdate};
use serde::Deserialize;

use super::double_option;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{authorize, RequireAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /roles/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// GET /api/v1/roles
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<RoleDefinition>>>> {
    authorize(&state, &user, Resource::RoleManagement, Capability::View).await?;
    let roles = state.store.list_roles().await?;
    Ok(Json(DataResponse { data: roles }))
}

/// POST /api/v1/roles
///
/// The new role starts with one deny-all permission row per resource.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<NewRole>,
) -> AppResult<(StatusCode, Json<DataResponse<RoleDefinition>>)> {
    let name = normalize_role_name(&input.name)?;
    ensure_name_free(&state, &name, None).await?;

    let role = state
        .store
        .add_role(NewRole {
            name,
            description: input.description,
        })
        .await?;

    tracing::info!(role_id = %role.id, name = %role.name, admin_id = %admin.person_id, "Role created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: role })))
}

/// PUT /api/v1/roles/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<DataResponse<RoleDefinition>>> {
    let name = match input.name.as_deref() {
        Some(raw) => {
            let name = normalize_role_name(raw)?;
            ensure_name_free(&state, &name, Some(&id)).await?;
            Some(name)
        }
        None => None,
    };

    let role = state
        .store
        .update_role(
            &id,
            RoleUpdate {
                name,
                description: input.description,
            },
        )
        .await?;

    tracing::info!(role_id = %id, admin_id = %admin.person_id, "Role updated");
    Ok(Json(DataResponse { data: role }))
}

/// DELETE /api/v1/roles/{id}
///
/// Rejected while any person still holds the role.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let holders = state
        .store
        .list_people()
        .await?
        .into_iter()
        .filter(|p| p.role_id == id)
        .count();
    if holders > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Role is assigned to {holders} person(s)"
        ))));
    }

    state.store.delete_role(&id).await?;
    tracing::info!(role_id = %id, admin_id = %admin.person_id, "Role deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalize_role_name(raw: &str) -> AppResult<String> {
    require_non_blank("name", raw)?;
    Ok(raw.trim().to_uppercase())
}

async fn ensure_name_free(state: &AppState, name: &str, except_id: Option<&str>) -> AppResult<()> {
    let taken = state
        .store
        .list_roles()
        .await?
        .iter()
        .any(|r| r.name.eq_ignore_ascii_case(name) && Some(r.id.as_str()) != except_id);
    if taken {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Role '{name}' already exists"
        ))));
    }
    Ok(())
}
