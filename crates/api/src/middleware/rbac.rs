//! Role-based access control.
//!
//! Admin-kind roles bypass every check. Everyone else is looked up in the
//! role permission matrix, where a missing row denies.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use condo_core::error::CoreError;
use condo_core::models::{Capability, Resource};
use condo_core::permissions::is_allowed;
use condo_core::roles::is_admin;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Requires an admin-kind role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_admin(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Ensure `user` holds `capability` on `resource`.
pub async fn authorize(
    state: &AppState,
    user: &AuthUser,
    resource: Resource,
    capability: Capability,
) -> AppResult<()> {
    if is_admin(&user.role) {
        return Ok(());
    }
    let rows = state.store.list_permissions().await?;
    if is_allowed(&rows, &user.role_id, resource, capability) {
        return Ok(());
    }
    tracing::debug!(
        person_id = %user.person_id,
        role = %user.role,
        resource = resource.as_str(),
        capability = capability.as_str(),
        "Permission denied"
    );
    Err(AppError::Core(CoreError::Forbidden(format!(
        "Missing '{}' permission on '{}'",
        capability.as_str(),
        resource.as_str()
    ))))
}
