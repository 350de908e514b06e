//! Handlers for the `/vehicles` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use condo_core::error::require_non_blank;
use condo_core::gate::normalize_plate;
use condo_core::models::{Capability, NewVehicle, Resource, Vehicle};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::authorize;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/vehicles
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Vehicle>>>> {
    authorize(&state, &user, Resource::Parking, Capability::View).await?;
    let vehicles = state.store.list_vehicles().await?;
    Ok(Json(DataResponse { data: vehicles }))
}

/// POST /api/v1/vehicles
///
/// Plates are stored normalized so gate lookups match regardless of input
/// casing. Duplicate plates are allowed.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<NewVehicle>,
) -> AppResult<(StatusCode, Json<DataResponse<Vehicle>>)> {
    authorize(&state, &user, Resource::Parking, Capability::Create).await?;
    require_non_blank("plate", &input.plate)?;
    input.plate = normalize_plate(&input.plate);

    let vehicle = state.store.add_vehicle(input).await?;
    tracing::info!(vehicle_id = %vehicle.id, plate = %vehicle.plate, "Vehicle registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: vehicle })))
}

/// DELETE /api/v1/vehicles/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    authorize(&state, &user, Resource::Parking, Capability::Delete).await?;
    state.store.delete_vehicle(&id).await?;
    tracing::info!(vehicle_id = %id, "Vehicle deleted");
    Ok(StatusCode::NO_CONTENT)
}
