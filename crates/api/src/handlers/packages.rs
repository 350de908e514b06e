//! Handlers for the `/packages` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use condo_core::error::CoreError;
use condo_core::models::{Capability, NewPackage, Package, Resource};
use condo_core::packages::{pickup_update, validate_new_package};
use condo_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::authorize;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /packages`. The receiving staff member is the
/// caller.
#[derive(Debug, Deserialize)]
pub struct RegisterPackageRequest {
    pub tracking_code: String,
    pub unit_id: String,
    pub recipient_name: String,
    pub location: String,
    /// Defaults to now.
    pub received_at: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
pub struct RegisterPackageResponse {
    pub package: Package,
    /// Text to forward to the recipient.
    pub notification: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/packages
///
/// Newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Package>>>> {
    authorize(&state, &user, Resource::Packages, Capability::View).await?;
    let packages = state.store.list_packages().await?;
    Ok(Json(DataResponse { data: packages }))
}

/// POST /api/v1/packages
///
/// The package is persisted before the notice is generated, so a failing
/// text API never loses a registration.
pub async fn register(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<RegisterPackageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RegisterPackageResponse>>)> {
    authorize(&state, &user, Resource::Packages, Capability::Create).await?;

    let new_package = NewPackage {
        tracking_code: input.tracking_code.trim().to_string(),
        received_at: input.received_at.unwrap_or_else(Utc::now),
        received_by_staff_id: user.person_id.clone(),
        unit_id: input.unit_id,
        recipient_name: input.recipient_name.trim().to_string(),
        location: input.location.trim().to_string(),
    };
    validate_new_package(&new_package)?;

    let package = state.store.add_package(new_package).await?;
    tracing::info!(package_id = %package.id, unit_id = %package.unit_id, "Package registered");

    let notification = state
        .notifier
        .package_notice(&package.recipient_name, &package.tracking_code, &package.location)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RegisterPackageResponse {
                package,
                notification,
            },
        }),
    ))
}

/// POST /api/v1/packages/{id}/pickup
///
/// Marks the package delivered. Picking up an already delivered package
/// returns it unchanged.
pub async fn pickup(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Package>>> {
    authorize(&state, &user, Resource::Packages, Capability::Edit).await?;

    let package = state.store.find_package(&id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Package",
            id: id.clone(),
        })
    })?;

    let package = match pickup_update(&package, Utc::now()) {
        Some(update) => {
            let delivered = state.store.update_package(&id, update).await?;
            tracing::info!(package_id = %id, "Package picked up");
            delivered
        }
        None => {
            tracing::debug!(package_id = %id, "Package already delivered");
            package
        }
    };

    Ok(Json(DataResponse { data: package }))
}
