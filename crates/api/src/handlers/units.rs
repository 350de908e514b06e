//! Handlers for the `/units` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use condo_core::error::require_non_blank;
use condo_core::models::{Capability, NewUnit, Resource, Unit};
use condo_core::units::{ensure_unique, generate_units};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::authorize;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /units`.
#[derive(Debug, Deserialize)]
pub struct CreateUnitRequest {
    pub block: String,
    pub number: String,
    pub floor: i32,
}

/// Request body for `POST /units/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateUnitsRequest {
    /// Comma-separated block names, e.g. `"A, B, C"`.
    pub blocks: String,
    pub floors: u32,
    pub apts_per_floor: u32,
}

#[derive(Debug, Serialize)]
pub struct GenerateUnitsResponse {
    pub created: usize,
    pub units: Vec<Unit>,
}

#[derive(Debug, Serialize)]
pub struct DeleteBlockResponse {
    pub block: String,
    pub deleted: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/units
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Unit>>>> {
    authorize(&state, &user, Resource::Units, Capability::View).await?;
    let units = state.store.list_units().await?;
    Ok(Json(DataResponse { data: units }))
}

/// POST /api/v1/units
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateUnitRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Unit>>)> {
    authorize(&state, &user, Resource::Units, Capability::Create).await?;
    require_non_blank("block", &input.block)?;
    require_non_blank("number", &input.number)?;

    let new_unit = NewUnit {
        block: input.block.trim().to_uppercase(),
        number: input.number.trim().to_string(),
        floor: input.floor,
    };
    let existing = state.store.list_units().await?;
    ensure_unique(&existing, std::slice::from_ref(&new_unit))?;

    let unit = state.store.add_unit(new_unit).await?;
    tracing::info!(unit_id = %unit.id, block = %unit.block, number = %unit.number, "Unit created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: unit })))
}

/// POST /api/v1/units/generate
///
/// Synthesize `blocks x floors x apts_per_floor` units in one write. Any
/// collision with an existing (block, number) rejects the whole batch.
pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<GenerateUnitsRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<GenerateUnitsResponse>>)> {
    authorize(&state, &user, Resource::Units, Capability::Create).await?;

    let batch = generate_units(&input.blocks, input.floors, input.apts_per_floor)?;
    let existing = state.store.list_units().await?;
    ensure_unique(&existing, &batch)?;

    let units = state.store.add_units(batch).await?;
    tracing::info!(created = units.len(), blocks = %input.blocks, "Units generated");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: GenerateUnitsResponse {
                created: units.len(),
                units,
            },
        }),
    ))
}

/// DELETE /api/v1/units/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    authorize(&state, &user, Resource::Units, Capability::Delete).await?;
    state.store.delete_unit(&id).await?;
    tracing::info!(unit_id = %id, "Unit deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/units/blocks/{block}
pub async fn delete_block(
    State(state): State<AppState>,
    user: AuthUser,
    Path(block): Path<String>,
) -> AppResult<Json<DataResponse<DeleteBlockResponse>>> {
    authorize(&state, &user, Resource::Units, Capability::Delete).await?;
    let block = block.trim().to_uppercase();
    let deleted = state.store.delete_block(&block).await?;
    tracing::info!(block = %block, deleted, "Block deleted");
    Ok(Json(DataResponse {
        data: DeleteBlockResponse { block, deleted },
    }))
}
