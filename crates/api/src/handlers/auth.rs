//! Handlers for the `/auth` resource (login, first-access password change, me).

use axum::extract::State;
use axum::Json;
use condo_core::auth::{authenticate, password_change_update};
use condo_core::error::CoreError;
use condo_core::models::{Person, PersonResponse};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, SessionUser};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

/// Successful authentication response returned by login and change-password.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    /// When true the token is only accepted by `/auth/change-password`.
    pub must_change_password: bool,
    pub user: PersonResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Unknown user and wrong password
/// are indistinguishable (401); an inactive account with correct
/// credentials gets 403.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let candidate = state.store.find_person_by_username(&input.username).await?;

    let person = authenticate(candidate, &input.password).map_err(|e| {
        tracing::info!(username = %input.username, reason = %e, "Login rejected");
        AppError::Login(e)
    })?;

    tracing::info!(person_id = %person.id, must_change_password = person.must_change_password, "Login succeeded");
    Ok(Json(auth_response(&state, person)?))
}

/// POST /api/v1/auth/change-password
///
/// Replace the password (first access or voluntary). Accepts tokens that
/// still carry the pending-change flag and returns a fresh, unrestricted one.
pub async fn change_password(
    State(state): State<AppState>,
    session: SessionUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<AuthResponse>> {
    let update = password_change_update(&input.new_password, &input.confirm_password)?;
    let person = state.store.update_person(&session.person_id, update).await?;

    tracing::info!(person_id = %person.id, "Password changed");
    Ok(Json(auth_response(&state, person)?))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<PersonResponse>>> {
    let person = state
        .store
        .find_person(&user.person_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Person",
                id: user.person_id.clone(),
            })
        })?;
    Ok(Json(DataResponse {
        data: PersonResponse::from(&person),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_response(state: &AppState, person: Person) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(&person, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        must_change_password: person.must_change_password,
        user: PersonResponse::from(&person),
    })
}
