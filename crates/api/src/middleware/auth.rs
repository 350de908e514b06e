//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use condo_core::auth::LoginError;
use condo_core::error::CoreError;
use condo_core::models::Person;
use condo_core::types::EntityId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Holder of any valid access token whose person is still active.
///
/// The token only identifies the person; role and the pending-change flag
/// are read from the stored record on every request, so deactivation and
/// admin resets take effect on tokens already issued.
///
/// Only the change-password route accepts this directly; everything else
/// goes through [`AuthUser`].
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub person_id: EntityId,
    pub role_id: EntityId,
    pub role: String,
    pub must_change_password: bool,
}

impl From<Person> for SessionUser {
    fn from(person: Person) -> Self {
        Self {
            person_id: person.id,
            role_id: person.role_id,
            role: person.role_name.unwrap_or_default(),
            must_change_password: person.must_change_password,
        }
    }
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let person = state.store.find_person(&claims.sub).await?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        if !person.active {
            tracing::info!(person_id = %person.id, "Token rejected for inactive account");
            return Err(AppError::Login(LoginError::Inactive));
        }

        Ok(person.into())
    }
}

/// Authenticated person extracted from a JWT Bearer token.
///
/// Rejects tokens issued while a password change is still pending.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(person_id = %user.person_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The person's id (the token subject).
    pub person_id: EntityId,
    /// The person's role id, used for permission lookups.
    pub role_id: EntityId,
    /// The person's role name (e.g. `"ADMIN"`, `"STAFF"`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = SessionUser::from_request_parts(parts, state).await?;
        if session.must_change_password {
            return Err(AppError::Core(CoreError::Forbidden(
                "Password change required before continuing".into(),
            )));
        }
        Ok(AuthUser {
            person_id: session.person_id,
            role_id: session.role_id,
            role: session.role,
        })
    }
}
