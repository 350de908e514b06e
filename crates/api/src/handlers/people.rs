//! Handlers for the `/people` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use condo_core::auth::{reset_password_update, DEFAULT_PASSWORD, MIN_PASSWORD_LENGTH};
use condo_core::error::{require_non_blank, CoreError};
use condo_core::models::{Capability, NewPerson, Person, PersonResponse, PersonUpdate, Resource};
use condo_core::password::{hash_password, validate_password_strength};
use condo_core::people::{unit_for_role, validate_registration};
use condo_core::roles::is_resident;
use serde::Deserialize;

use super::double_option;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{authorize, RequireAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /people`.
#[derive(Debug, Deserialize)]
pub struct CreatePersonRequest {
    pub name: String,
    pub role_id: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub unit_id: Option<String>,
    pub avatar_url: Option<String>,
    /// Optional login. Without `password` the default one is assigned.
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request body for `PUT /people/{id}`. Absent fields are left unchanged;
/// `null` clears a nullable field.
#[derive(Debug, Deserialize)]
pub struct UpdatePersonRequest {
    pub name: Option<String>,
    pub role_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub unit_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
}

/// Request body for `PUT /people/{id}/active`.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/people
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<PersonResponse>>>> {
    authorize(&state, &user, Resource::People, Capability::View).await?;
    let people = state.store.list_people().await?;
    Ok(Json(DataResponse {
        data: people.iter().map(PersonResponse::from).collect(),
    }))
}

/// POST /api/v1/people
///
/// Only residents keep a unit. A login gets the given password (minimum
/// length enforced) or the default one; either way it must be changed at
/// first access.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreatePersonRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PersonResponse>>)> {
    authorize(&state, &user, Resource::People, Capability::Create).await?;
    validate_registration(&input.name, &input.email)?;

    let role_name = resolve_role_name(&state, &input.role_id).await?;
    let unit_id = unit_for_role(&role_name, input.unit_id);

    let username = input
        .username
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
    let password_hash = match &username {
        Some(username) => {
            ensure_username_free(&state, username).await?;
            let password = input.password.as_deref().unwrap_or(DEFAULT_PASSWORD);
            if input.password.is_some() {
                validate_password_strength(password, MIN_PASSWORD_LENGTH)
                    .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
            }
            Some(hash_password(password).map_err(|e| {
                AppError::InternalError(format!("Password hashing error: {e}"))
            })?)
        }
        None => None,
    };

    let person = state
        .store
        .add_person(NewPerson {
            name: input.name.trim().to_string(),
            role_id: input.role_id,
            email: input.email.trim().to_string(),
            phone: input.phone.trim().to_string(),
            unit_id,
            avatar_url: input.avatar_url,
            must_change_password: username.is_some(),
            username,
            password_hash,
            active: true,
        })
        .await?;

    tracing::info!(person_id = %person.id, role = %role_name, "Person registered");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PersonResponse::from(&person),
        }),
    ))
}

/// PUT /api/v1/people/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<UpdatePersonRequest>,
) -> AppResult<Json<DataResponse<PersonResponse>>> {
    authorize(&state, &user, Resource::People, Capability::Edit).await?;

    let current = find_person(&state, &id).await?;
    if let Some(name) = &input.name {
        require_non_blank("name", name)?;
    }
    if let Some(email) = &input.email {
        validate_registration(input.name.as_deref().unwrap_or(&current.name), email)?;
    }

    let role_name = match &input.role_id {
        Some(role_id) => resolve_role_name(&state, role_id).await?,
        None => current.role_name.clone().unwrap_or_default(),
    };
    // Moving away from a resident role drops the unit binding.
    let unit_id = match input.unit_id {
        Some(unit) => Some(unit_for_role(&role_name, unit)),
        None if !is_resident(&role_name) && current.unit_id.is_some() => Some(None),
        None => None,
    };

    let update = PersonUpdate {
        name: input.name.map(|n| n.trim().to_string()),
        role_id: input.role_id,
        email: input.email.map(|e| e.trim().to_string()),
        phone: input.phone,
        unit_id,
        avatar_url: input.avatar_url,
        ..Default::default()
    };
    let person = state.store.update_person(&id, update).await?;

    tracing::info!(person_id = %id, "Person updated");
    Ok(Json(DataResponse {
        data: PersonResponse::from(&person),
    }))
}

/// PUT /api/v1/people/{id}/active
pub async fn set_active(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<SetActiveRequest>,
) -> AppResult<Json<DataResponse<PersonResponse>>> {
    authorize(&state, &user, Resource::People, Capability::Edit).await?;
    if id == user.person_id && !input.active {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot deactivate your own account".into(),
        )));
    }

    let update = PersonUpdate {
        active: Some(input.active),
        ..Default::default()
    };
    let person = state.store.update_person(&id, update).await?;

    tracing::info!(person_id = %id, active = input.active, "Person active flag changed");
    Ok(Json(DataResponse {
        data: PersonResponse::from(&person),
    }))
}

/// POST /api/v1/people/{id}/reset-password
///
/// Admin only. Sets the default password and forces a change at next login.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<PersonResponse>>> {
    let current = find_person(&state, &id).await?;
    if current.username.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Person has no login to reset".into(),
        )));
    }

    let person = state.store.update_person(&id, reset_password_update()?).await?;

    tracing::info!(person_id = %id, admin_id = %admin.person_id, "Password reset to default");
    Ok(Json(DataResponse {
        data: PersonResponse::from(&person),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_person(state: &AppState, id: &str) -> AppResult<Person> {
    state.store.find_person(id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Person",
            id: id.to_string(),
        })
    })
}

async fn resolve_role_name(state: &AppState, role_id: &str) -> AppResult<String> {
    state
        .store
        .find_role(role_id)
        .await?
        .map(|role| role.name)
        .ok_or_else(|| AppError::Core(CoreError::Validation(format!("Unknown role '{role_id}'"))))
}

async fn ensure_username_free(state: &AppState, username: &str) -> AppResult<()> {
    if state.store.find_person_by_username(username).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Username '{username}' is already taken"
        ))));
    }
    Ok(())
}
