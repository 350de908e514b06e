//! Handlers for `/parking`: spot listing and the gate entry / exit flows.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use condo_core::gate::{plan_entry, plan_exit, Allocation, EntryType};
use condo_core::models::{AccessLog, Capability, ParkingSpot, Resource, SpotUpdate};
use condo_db::StoreError;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::authorize;
use crate::response::DataResponse;
use crate::state::AppState;

/// Allocation marker returned when no spot of the category is free.
const NO_CAPACITY: &str = "NO_CAPACITY";

/// How many times an entry re-plans after losing a spot to a concurrent entry.
const MAX_CLAIM_ATTEMPTS: usize = 3;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /parking/entry`.
#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub plate: String,
    pub unit_id: String,
    pub entry_type: EntryType,
}

/// Request body for `POST /parking/exit`. Accepts a plate or the id stored
/// as a spot's current occupant.
#[derive(Debug, Deserialize)]
pub struct ExitRequest {
    pub plate: String,
}

/// The assigned spot, or the string `"NO_CAPACITY"`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AllocationView {
    Spot(ParkingSpot),
    NoCapacity(&'static str),
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub allocation: AllocationView,
    pub log: AccessLog,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExitResponse {
    pub released: Vec<ParkingSpot>,
    pub log: AccessLog,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/parking/spots
pub async fn list_spots(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ParkingSpot>>>> {
    authorize(&state, &user, Resource::Parking, Capability::View).await?;
    let spots = state.store.list_parking_spots().await?;
    Ok(Json(DataResponse { data: spots }))
}

/// POST /api/v1/parking/entry
///
/// Always records the entry. When the category is full the response still
/// has 201 with `allocation = "NO_CAPACITY"` and a warning.
///
/// The spot is claimed before the log is written, so the log names the spot
/// actually held. A spot taken by a concurrent entry triggers a re-plan.
pub async fn entry(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<EntryRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<EntryResponse>>)> {
    authorize(&state, &user, Resource::Parking, Capability::Create).await?;

    let vehicles = state.store.list_vehicles().await?;
    let mut attempt = 1;
    let (plan, claimed) = loop {
        let spots = state.store.list_parking_spots().await?;
        let plan = plan_entry(
            &input.plate,
            &input.unit_id,
            input.entry_type,
            &vehicles,
            &spots,
            Utc::now(),
        )?;

        let Some((spot_id, update)) = plan.spot_update.clone() else {
            break (plan, None);
        };
        match state.store.update_parking_spot(&spot_id, update).await {
            Ok(spot) => break (plan, Some(spot)),
            Err(StoreError::SpotTaken { .. }) if attempt < MAX_CLAIM_ATTEMPTS => {
                tracing::debug!(spot_id = %spot_id, attempt, "Spot taken concurrently, re-planning");
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    };

    let log = state.store.add_access_log(plan.log).await?;

    let (allocation, warning) = match (plan.allocation, claimed) {
        (Allocation::Assigned { .. }, Some(spot)) => {
            tracing::info!(plate = %log.vehicle_plate, spot = %spot.code, "Gate entry allocated");
            (AllocationView::Spot(spot), None)
        }
        _ => {
            let category = input.entry_type.parking_category();
            tracing::warn!(
                plate = %log.vehicle_plate,
                category = category.as_str(),
                "Gate entry without a free spot"
            );
            (
                AllocationView::NoCapacity(NO_CAPACITY),
                Some(format!("No free {} spot available", category.as_str())),
            )
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: EntryResponse {
                allocation,
                log,
                warning,
            },
        }),
    ))
}

/// POST /api/v1/parking/exit
///
/// Releases every spot held by the plate and appends an EXIT log, even when
/// nothing matched.
pub async fn exit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ExitRequest>,
) -> AppResult<Json<DataResponse<ExitResponse>>> {
    authorize(&state, &user, Resource::Parking, Capability::Edit).await?;

    let vehicles = state.store.list_vehicles().await?;
    let spots = state.store.list_parking_spots().await?;
    let plan = plan_exit(&input.plate, &vehicles, &spots, Utc::now())?;

    let log = state.store.add_access_log(plan.log).await?;

    let mut released = Vec::with_capacity(plan.released.len());
    for spot_id in &plan.released {
        released.push(
            state
                .store
                .update_parking_spot(spot_id, SpotUpdate::Release)
                .await?,
        );
    }
    tracing::info!(plate = %log.vehicle_plate, released = released.len(), "Gate exit recorded");

    Ok(Json(DataResponse {
        data: ExitResponse { released, log },
    }))
}
